//! `MaybeDangling` as specified in <https://github.com/rust-lang/rfcs/pull/3336>,
//! polyfilled via `MaybeUninit`.
//!
//! Red nodes hold plain references to the root record. Wrapping the owning
//! `Box` keeps moves of the tree from asserting uniqueness over it.

use std::mem::MaybeUninit;
use std::ops::Deref;

#[repr(transparent)]
pub(crate) struct MaybeDangling<T> {
    value: MaybeUninit<T>,
}

impl<T> MaybeDangling<T> {
    #[inline]
    pub(crate) const fn new(value: T) -> Self {
        Self { value: MaybeUninit::new(value) }
    }
}

impl<T> Deref for MaybeDangling<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        // SAFETY: `value` is initialized in `new` and only dropped in `drop`.
        unsafe { self.value.assume_init_ref() }
    }
}

impl<T> Drop for MaybeDangling<T> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: `value` is initialized and never used again.
        unsafe {
            self.value.as_mut_ptr().drop_in_place();
        }
    }
}

//! Lock-free, race-to-initialize memoization.
//!
//! Concurrent first accesses may all run the constructor, but only one result
//! is published and every caller observes that one.

use std::fmt;

use once_cell::race::OnceBox;

/// A single value computed on first access from its owner.
pub struct LazyValue<O, T> {
    cell: OnceBox<T>,
    init: fn(&O) -> T,
}

impl<O, T> LazyValue<O, T> {
    pub fn new(init: fn(&O) -> T) -> Self {
        Self { cell: OnceBox::new(), init }
    }

    /// Returns the published value, computing it from `owner` if necessary.
    #[inline]
    pub fn get(&self, owner: &O) -> &T {
        self.cell.get_or_init(|| Box::new((self.init)(owner)))
    }

    #[inline]
    pub fn get_if_initialized(&self) -> Option<&T> {
        self.cell.get()
    }
}

impl<O, T: fmt::Debug> fmt::Debug for LazyValue<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get_if_initialized() {
            Some(value) => f.debug_tuple("LazyValue").field(value).finish(),
            None => f.write_str("LazyValue(<uninit>)"),
        }
    }
}

/// A fixed number of independently lazy slots, each computed from the owner
/// and its index.
pub struct LazyList<O, T> {
    slots: Box<[OnceBox<T>]>,
    init: fn(&O, usize) -> T,
}

impl<O, T> LazyList<O, T> {
    pub fn new(len: usize, init: fn(&O, usize) -> T) -> Self {
        Self { slots: (0..len).map(|_| OnceBox::new()).collect(), init }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the published value of slot `index`, computing it if necessary.
    #[inline]
    #[track_caller]
    pub fn get(&self, owner: &O, index: usize) -> &T {
        let Some(slot) = self.slots.get(index) else {
            panic!("index {index} is out of range for a lazy list of length {}", self.len())
        };
        slot.get_or_init(|| Box::new((self.init)(owner, index)))
    }

    #[inline]
    pub fn get_if_initialized(&self, index: usize) -> Option<&T> {
        self.slots.get(index)?.get()
    }

    /// Number of slots whose value has been published.
    pub fn initialized_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }
}

impl<O, T> fmt::Debug for LazyList<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyList")
            .field("len", &self.len())
            .field("initialized", &self.initialized_count())
            .finish()
    }
}

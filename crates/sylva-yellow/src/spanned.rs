//! Immutable sequences of length-carrying elements with precomputed offsets.

use std::fmt;
use std::ops::Index;

use text_size::TextSize;
use triomphe::{Arc, ThinArc};

/// Anything that occupies a known number of bytes of source text.
pub trait TextLength {
    fn text_len(&self) -> TextSize;
}

impl<T: TextLength + ?Sized> TextLength for Arc<T> {
    #[inline]
    fn text_len(&self) -> TextSize {
        T::text_len(self)
    }
}

impl<T: TextLength + ?Sized> TextLength for &T {
    #[inline]
    fn text_len(&self) -> TextSize {
        T::text_len(self)
    }
}

struct Entry<T> {
    offset: TextSize,
    element: T,
}

/// Header is the total length, entries carry their start offset.
type Storage<T> = ThinArc<TextSize, Entry<T>>;

fn build<T: TextLength>(
    elements: impl IntoIterator<Item = T>,
    separator_len: TextSize,
) -> Option<Storage<T>> {
    let mut total = TextSize::new(0);
    let entries = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            if index > 0 {
                total += separator_len;
            }
            let offset = total;
            total += element.text_len();
            Entry { offset, element }
        })
        .collect::<Vec<_>>();

    if entries.is_empty() {
        return None;
    }

    Some(ThinArc::from_header_and_iter(total, entries.into_iter()))
}

#[inline]
fn entries<T>(ptr: &Option<Storage<T>>) -> &[Entry<T>] {
    match ptr {
        Some(ptr) => &ptr.slice,
        None => &[],
    }
}

#[inline]
fn total_len<T>(ptr: &Option<Storage<T>>) -> TextSize {
    match ptr {
        Some(ptr) => ptr.header.header,
        None => TextSize::new(0),
    }
}

#[cold]
#[track_caller]
fn index_out_of_range(index: usize, len: usize) -> ! {
    panic!("index {index} is out of range for a list of length {len}")
}

/// An ordered list whose element offsets are computed once at construction.
pub struct SpannedList<T> {
    ptr: Option<Storage<T>>,
}

impl<T> SpannedList<T> {
    /// The shared empty list. It does not allocate.
    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    #[inline]
    pub fn len(&self) -> usize {
        entries(&self.ptr).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    /// Sum of the lengths of all elements.
    #[inline]
    pub fn text_len(&self) -> TextSize {
        total_len(&self.ptr)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        entries(&self.ptr).get(index).map(|entry| &entry.element)
    }

    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        match self.get(index) {
            Some(element) => element,
            None => index_out_of_range(index, self.len()),
        }
    }

    /// Start of the element at `index`, relative to the start of the list.
    #[inline]
    #[track_caller]
    pub fn offset_of(&self, index: usize) -> TextSize {
        match entries(&self.ptr).get(index) {
            Some(entry) => entry.offset,
            None => index_out_of_range(index, self.len()),
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + DoubleEndedIterator + Clone {
        entries(&self.ptr).iter().map(|entry| &entry.element)
    }

    /// Iterates `(offset, element)` pairs.
    pub fn iter_with_offsets(
        &self,
    ) -> impl ExactSizeIterator<Item = (TextSize, &T)> + DoubleEndedIterator + Clone {
        entries(&self.ptr).iter().map(|entry| (entry.offset, &entry.element))
    }

    /// Returns `true` when both lists share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.ptr, &other.ptr) {
            (Some(this), Some(other)) => std::ptr::eq(&this.header, &other.header),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: TextLength> SpannedList<T> {
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        Self { ptr: build(elements, TextSize::new(0)) }
    }
}

impl<T> Clone for SpannedList<T> {
    fn clone(&self) -> Self {
        Self { ptr: self.ptr.clone() }
    }
}

impl<T> Default for SpannedList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Index<usize> for SpannedList<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T: TextLength> FromIterator<T> for SpannedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: TextLength> From<Vec<T>> for SpannedList<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}

impl<T: TextLength> TextLength for SpannedList<T> {
    #[inline]
    fn text_len(&self) -> TextSize {
        total_len(&self.ptr)
    }
}

impl<T: PartialEq> PartialEq for SpannedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SpannedList<T> {}

impl<T: fmt::Debug> fmt::Debug for SpannedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// One position in the interleaved view of a [`SeparatedSpannedList`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Interleaved<T> {
    Element(T),
    /// The separator following the element with the same index.
    Separator(usize),
}

/// An ordered list whose elements are separated by a fixed-length separator,
/// such as the commas of a JSON list. The separators themselves are not stored.
pub struct SeparatedSpannedList<T> {
    ptr: Option<Storage<T>>,
    separator_len: TextSize,
}

impl<T> SeparatedSpannedList<T> {
    pub const fn empty(separator_len: TextSize) -> Self {
        Self { ptr: None, separator_len }
    }

    #[inline]
    pub fn len(&self) -> usize {
        entries(&self.ptr).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    #[inline]
    pub fn separator_len(&self) -> TextSize {
        self.separator_len
    }

    /// Length of all elements plus all separators.
    #[inline]
    pub fn text_len(&self) -> TextSize {
        total_len(&self.ptr)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        entries(&self.ptr).get(index).map(|entry| &entry.element)
    }

    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        match self.get(index) {
            Some(element) => element,
            None => index_out_of_range(index, self.len()),
        }
    }

    #[inline]
    #[track_caller]
    pub fn offset_of(&self, index: usize) -> TextSize {
        match entries(&self.ptr).get(index) {
            Some(entry) => entry.offset,
            None => index_out_of_range(index, self.len()),
        }
    }

    /// Start of the separator that follows element `index`. Valid for
    /// `index` in `[0, len - 1)`.
    #[inline]
    #[track_caller]
    pub fn separator_offset(&self, index: usize) -> TextSize {
        let separators = self.len().saturating_sub(1);
        if index >= separators {
            index_out_of_range(index, separators);
        }
        self.offset_of(index + 1) - self.separator_len
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + DoubleEndedIterator + Clone {
        entries(&self.ptr).iter().map(|entry| &entry.element)
    }

    pub fn iter_with_offsets(
        &self,
    ) -> impl ExactSizeIterator<Item = (TextSize, &T)> + DoubleEndedIterator + Clone {
        entries(&self.ptr).iter().map(|entry| (entry.offset, &entry.element))
    }

    /// Number of positions in the element, separator, element, ... view.
    #[inline]
    pub fn interleaved_len(&self) -> usize {
        (2 * self.len()).saturating_sub(1)
    }

    #[inline]
    #[track_caller]
    pub fn interleaved(&self, index: usize) -> Interleaved<&T> {
        if index >= self.interleaved_len() {
            index_out_of_range(index, self.interleaved_len());
        }
        if index % 2 == 0 {
            Interleaved::Element(&entries(&self.ptr)[index / 2].element)
        } else {
            Interleaved::Separator(index / 2)
        }
    }

    #[inline]
    #[track_caller]
    pub fn interleaved_offset(&self, index: usize) -> TextSize {
        if index % 2 == 0 { self.offset_of(index / 2) } else { self.separator_offset(index / 2) }
    }

    pub fn iter_interleaved(&self) -> impl Iterator<Item = (TextSize, Interleaved<&T>)> {
        (0..self.interleaved_len())
            .map(|index| (self.interleaved_offset(index), self.interleaved(index)))
    }
}

impl<T: TextLength> SeparatedSpannedList<T> {
    pub fn new(elements: impl IntoIterator<Item = T>, separator_len: TextSize) -> Self {
        Self { ptr: build(elements, separator_len), separator_len }
    }
}

impl<T> Clone for SeparatedSpannedList<T> {
    fn clone(&self) -> Self {
        Self { ptr: self.ptr.clone(), separator_len: self.separator_len }
    }
}

impl<T> Index<usize> for SeparatedSpannedList<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T: TextLength> TextLength for SeparatedSpannedList<T> {
    #[inline]
    fn text_len(&self) -> TextSize {
        total_len(&self.ptr)
    }
}

impl<T: PartialEq> PartialEq for SeparatedSpannedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.separator_len == other.separator_len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SeparatedSpannedList<T> {}

impl<T: fmt::Debug> fmt::Debug for SeparatedSpannedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

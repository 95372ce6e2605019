//! Position-aware view over a green tree.
//!
//! Red records are materialized on first access and then live as long as the
//! [`SyntaxTree`] that owns them. Handles are `Copy` and borrow the tree.

mod nodes;

use std::fmt;

use text_size::{TextRange, TextSize};
use triomphe::Arc;

pub use self::nodes::{
    BackgroundListParent, MultiValueParent, PunctuationParent, RedBackground, RedBackgroundList,
    RedBooleanLiteral, RedErrorString, RedIntegerLiteral, RedKeyValue, RedList, RedMap,
    RedMissingValue, RedMultiValue, RedPunctuation, RedStringLiteral, RedUndefinedValue,
    RedUnknownSymbol, RedValue, RedValueWithBackground,
};
use crate::SyntaxKind;
use crate::green::{GreenElement, GreenMultiValue};
use crate::lazy::{LazyList, LazyValue};
use crate::maybe_dangling::MaybeDangling;
use crate::spanned::TextLength;

/// The red view of one parsed document.
pub struct SyntaxTree {
    // Records borrow from `green`, so they are declared (and dropped) first.
    root: MaybeDangling<Box<RedData>>,
    green: Arc<GreenMultiValue>,
}

impl SyntaxTree {
    pub fn new(green: Arc<GreenMultiValue>) -> Self {
        // SAFETY: the green root is owned by `green`, which outlives every record.
        let green_root: &'static GreenMultiValue =
            unsafe { &*(&*green as *const GreenMultiValue) };
        let root = RedData::new(GreenElement::MultiValue(green_root), None, 0);
        Self { root: MaybeDangling::new(Box::new(root)), green }
    }

    #[inline]
    pub fn green(&self) -> &Arc<GreenMultiValue> {
        &self.green
    }

    #[inline]
    pub fn root(&self) -> RedMultiValue<'_> {
        RedMultiValue { data: self.root_data() }
    }

    #[inline]
    pub fn text_len(&self) -> TextSize {
        self.green.text_len()
    }

    #[inline]
    fn root_data(&self) -> &RedData {
        &self.root
    }

    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self.root_data())
    }

    /// Terminal elements in source order. Their text concatenates to the
    /// whole document.
    pub fn leaves(&self) -> impl Iterator<Item = RedElement<'_>> {
        self.root().as_element().leaves()
    }

    /// The non-empty leaf covering `offset`. Only the path from the root to
    /// that leaf is materialized.
    pub fn leaf_at(&self, offset: TextSize) -> Option<RedElement<'_>> {
        if offset >= self.text_len() {
            return None;
        }

        let mut data = self.root_data();
        let mut relative = offset;
        while !data.green.is_terminal() {
            let index = covering_child(data.green, relative)?;
            relative -= data.green.child_offset(index);
            data = data.child(index);
        }

        Some(RedElement::from_data(data))
    }

    /// Leaves touching `offset`: two when it sits exactly between them.
    pub fn leaf_at_offset(&self, offset: TextSize) -> LeafAtOffset<RedElement<'_>> {
        let right = self.leaf_at(offset);
        let left = match offset.checked_sub(TextSize::new(1)) {
            Some(before) => self.leaf_at(before),
            None => None,
        };

        match (left, right) {
            (Some(left), Some(right)) if left.ptr_eq(right) => LeafAtOffset::Single(right),
            (Some(left), Some(right)) => LeafAtOffset::Between(left, right),
            (Some(leaf), None) | (None, Some(leaf)) => LeafAtOffset::Single(leaf),
            (None, None) => LeafAtOffset::None,
        }
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree").field("text_len", &self.text_len()).finish_non_exhaustive()
    }
}

/// Index of the non-empty child of `green` that covers `offset`.
fn covering_child(green: GreenElement<'_>, offset: TextSize) -> Option<usize> {
    let (mut low, mut high) = (0, green.child_count());
    while low < high {
        let middle = low + (high - low) / 2;
        if green.child_offset(middle) <= offset {
            low = middle + 1;
        } else {
            high = middle;
        }
    }

    let index = low.checked_sub(1)?;
    let end = green.child_offset(index) + green.child(index).text_len();
    (offset < end).then_some(index)
}

/// A materialized red node.
///
/// Records are only ever created inside a [`SyntaxTree`]: the root in its
/// box and every other record in its parent's `children`. Neither moves
/// once created, which is what makes the `'static` references below sound
/// as long as they never escape with that lifetime.
pub(crate) struct RedData {
    green: GreenElement<'static>,
    parent: Option<&'static RedData>,
    index: usize,
    absolute_start: LazyValue<RedData, TextSize>,
    children: LazyList<RedData, RedData>,
}

impl RedData {
    fn new(green: GreenElement<'static>, parent: Option<&'static RedData>, index: usize) -> Self {
        Self {
            green,
            parent,
            index,
            absolute_start: LazyValue::new(Self::compute_absolute_start),
            children: LazyList::new(green.child_count(), Self::materialize_child),
        }
    }

    fn materialize_child(&self, index: usize) -> RedData {
        // SAFETY: `self` is stored in the tree and does not move or drop
        // before the child created here.
        let parent: &'static RedData = unsafe { &*(self as *const RedData) };
        Self::new(self.green.child(index), Some(parent), index)
    }

    fn compute_absolute_start(&self) -> TextSize {
        match self.parent {
            Some(parent) => parent.absolute_start() + parent.green.child_offset(self.index),
            None => TextSize::new(0),
        }
    }

    #[inline]
    fn green(&self) -> GreenElement<'_> {
        self.green
    }

    #[inline]
    fn parent(&self) -> Option<&RedData> {
        self.parent
    }

    #[inline]
    fn start(&self) -> TextSize {
        match self.parent {
            Some(parent) => parent.green.child_offset(self.index),
            None => TextSize::new(0),
        }
    }

    #[inline]
    fn absolute_start(&self) -> TextSize {
        *self.absolute_start.get(self)
    }

    #[inline]
    fn range(&self) -> TextRange {
        TextRange::at(self.absolute_start(), self.green.text_len())
    }

    #[inline]
    fn child_count(&self) -> usize {
        self.children.len()
    }

    #[inline]
    #[track_caller]
    fn child(&self, index: usize) -> &RedData {
        self.children.get(self, index)
    }
}

/// Any red node.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum RedElement<'a> {
    MultiValue(RedMultiValue<'a>),
    ValueWithBackground(RedValueWithBackground<'a>),
    BackgroundList(RedBackgroundList<'a>),
    Background(RedBackground<'a>),
    Value(RedValue<'a>),
    KeyValue(RedKeyValue<'a>),
    Punctuation(RedPunctuation<'a>),
}

impl<'a> RedElement<'a> {
    pub(crate) fn from_data(data: &'a RedData) -> Self {
        match data.green {
            GreenElement::MultiValue(_) => Self::MultiValue(RedMultiValue { data }),
            GreenElement::ValueWithBackground(_) => {
                Self::ValueWithBackground(RedValueWithBackground { data })
            }
            GreenElement::BackgroundList(_) => Self::BackgroundList(RedBackgroundList { data }),
            GreenElement::Background(_) => Self::Background(RedBackground { data }),
            GreenElement::Value(value) => Self::Value(RedValue::from_data(data, value)),
            GreenElement::KeyValue(_) => Self::KeyValue(RedKeyValue { data }),
            GreenElement::Punctuation(_) => Self::Punctuation(RedPunctuation { data }),
        }
    }

    fn data(self) -> &'a RedData {
        match self {
            Self::MultiValue(node) => node.data,
            Self::ValueWithBackground(node) => node.data,
            Self::BackgroundList(node) => node.data,
            Self::Background(node) => node.data,
            Self::Value(node) => node.data(),
            Self::KeyValue(node) => node.data,
            Self::Punctuation(node) => node.data,
        }
    }

    #[inline]
    pub fn green(self) -> GreenElement<'a> {
        self.data().green()
    }

    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.green().kind()
    }

    #[inline]
    pub fn text_len(self) -> TextSize {
        self.green().text_len()
    }

    #[inline]
    pub fn start(self) -> TextSize {
        self.data().start()
    }

    #[inline]
    pub fn absolute_start(self) -> TextSize {
        self.data().absolute_start()
    }

    #[inline]
    pub fn range(self) -> TextRange {
        self.data().range()
    }

    #[inline]
    pub fn index_in_parent(self) -> usize {
        self.data().index
    }

    pub fn parent(self) -> Option<RedElement<'a>> {
        self.data().parent().map(RedElement::from_data)
    }

    /// Iterates this element's ancestors, nearest first.
    pub fn ancestors(self) -> impl Iterator<Item = RedElement<'a>> {
        std::iter::successors(self.parent(), |element| element.parent())
    }

    #[inline]
    pub fn child_count(self) -> usize {
        self.data().child_count()
    }

    #[inline]
    #[track_caller]
    pub fn child(self, index: usize) -> RedElement<'a> {
        RedElement::from_data(self.data().child(index))
    }

    pub fn children(self) -> impl ExactSizeIterator<Item = RedElement<'a>> {
        let data = self.data();
        (0..data.child_count()).map(move |index| RedElement::from_data(data.child(index)))
    }

    /// Returns `true` for elements that never have children.
    #[inline]
    pub fn is_leaf(self) -> bool {
        self.green().is_terminal()
    }

    pub fn preorder(self) -> Preorder<'a> {
        Preorder::new(self.data())
    }

    pub fn leaves(self) -> impl Iterator<Item = RedElement<'a>> {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(element) if element.is_leaf() => Some(element),
            _ => None,
        })
    }

    /// Returns `true` if both handles refer to the same materialized node.
    #[inline]
    pub fn ptr_eq(self, other: Self) -> bool {
        std::ptr::eq(self.data(), other.data())
    }
}

impl fmt::Debug for RedElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.range())
    }
}

/// Preorder traversal over red elements.
#[derive(Clone)]
pub struct Preorder<'a> {
    stack: Vec<(&'a RedData, usize)>,
    root: Option<&'a RedData>,
}

impl<'a> Preorder<'a> {
    fn new(start: &'a RedData) -> Self {
        Self { stack: Vec::with_capacity(32), root: Some(start) }
    }

    /// Skips the children of the element that was just entered.
    pub fn skip_subtree(&mut self) {
        assert!(self.stack.pop().is_some(), "must have a subtree to skip");
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let Some((data, next_child)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root, 0));
            return Some(WalkEvent::Enter(RedElement::from_data(root)));
        };

        let data: &'a RedData = *data;
        if *next_child < data.child_count() {
            let child = data.child(*next_child);
            *next_child += 1;
            self.stack.push((child, 0));
            Some(WalkEvent::Enter(RedElement::from_data(child)))
        } else {
            self.stack.pop();
            Some(WalkEvent::Leave(RedElement::from_data(data)))
        }
    }
}

/// Preorder walk event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkEvent<'a> {
    Enter(RedElement<'a>),
    Leave(RedElement<'a>),
}

/// There might be zero, one or two leaves at a given offset.
#[derive(Clone, Debug)]
pub enum LeafAtOffset<T> {
    /// No leaves at offset.
    None,
    /// Only a single leaf at offset.
    Single(T),
    /// Offset is exactly between two leaves.
    Between(T, T),
}

impl<T> LeafAtOffset<T> {
    /// Convert to option, preferring the right leaf in case of a tie.
    pub fn right_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(leaf) | Self::Between(_, leaf) => Some(leaf),
        }
    }

    /// The leaf ranked highest by `priority`. Ties go to the right leaf.
    pub fn pick_best(self, priority: impl Fn(&T) -> u8) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(leaf) => Some(leaf),
            Self::Between(left, right) => {
                Some(if priority(&left) > priority(&right) { left } else { right })
            }
        }
    }
}

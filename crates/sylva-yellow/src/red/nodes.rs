//! Typed red handles and their parent unions.

use std::fmt;

use sylva_errors::Diagnostic;
use text_size::{TextRange, TextSize};

use super::{RedData, RedElement};
use crate::green::{
    GreenBackground, GreenBackgroundList, GreenElement, GreenErrorString, GreenKeyValue, GreenList,
    GreenMap, GreenMultiValue, GreenStringLiteral, GreenValue, GreenValueWithBackground,
    JsonInteger, Punctuation,
};

macro_rules! red_handles {
    ($($(#[$attr:meta])* $name:ident;)*) => {$(
        $(#[$attr])*
        #[derive(Clone, Copy)]
        pub struct $name<'a> {
            pub(super) data: &'a RedData,
        }

        impl<'a> $name<'a> {
            #[inline]
            pub fn text_len(self) -> TextSize {
                self.data.green.text_len()
            }

            /// Start relative to the parent.
            #[inline]
            pub fn start(self) -> TextSize {
                self.data.start()
            }

            #[inline]
            pub fn absolute_start(self) -> TextSize {
                self.data.absolute_start()
            }

            #[inline]
            pub fn range(self) -> TextRange {
                self.data.range()
            }

            #[inline]
            pub fn index_in_parent(self) -> usize {
                self.data.index
            }

            /// Returns `true` if both handles refer to the same materialized node.
            #[inline]
            pub fn ptr_eq(self, other: Self) -> bool {
                std::ptr::eq(self.data, other.data)
            }

            #[inline]
            pub fn as_element(self) -> RedElement<'a> {
                RedElement::from_data(self.data)
            }
        }

        impl PartialEq for $name<'_> {
            fn eq(&self, other: &Self) -> bool {
                std::ptr::eq(self.data, other.data)
            }
        }

        impl Eq for $name<'_> {}

        impl fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}@{:?}", stringify!($name), self.range())
            }
        }
    )*};
}

/// Child navigation for handles with children.
macro_rules! red_children {
    ($($name:ident),*) => {$(
        impl<'a> $name<'a> {
            #[inline]
            pub fn child_count(self) -> usize {
                self.data.child_count()
            }

            #[inline]
            #[track_caller]
            pub fn child(self, index: usize) -> RedElement<'a> {
                RedElement::from_data(self.data.child(index))
            }

            pub fn children(self) -> impl ExactSizeIterator<Item = RedElement<'a>> {
                self.as_element().children()
            }

            /// Start of child `index` relative to this node, without
            /// materializing the child.
            #[inline]
            #[track_caller]
            pub fn child_start(self, index: usize) -> TextSize {
                self.data.green.child_offset(index)
            }

            #[inline]
            #[track_caller]
            pub fn child_absolute_start(self, index: usize) -> TextSize {
                self.absolute_start() + self.child_start(index)
            }
        }
    )*};
}

/// Handles for the values a multi-value slot can hold.
macro_rules! red_values {
    ($($name:ident),*) => {$(
        impl<'a> $name<'a> {
            pub fn parent(self) -> RedValueWithBackground<'a> {
                RedValueWithBackground { data: parent_of(self.data) }
            }

            #[inline]
            pub fn as_value(self) -> RedValue<'a> {
                RedValue::from_data(self.data, green_value(self.data))
            }
        }
    )*};
}

red_handles! {
    /// A slot between two delimiters: its effective value, extra values and
    /// trailing background.
    RedMultiValue;
    RedValueWithBackground;
    RedBackgroundList;
    RedBackground;
    RedKeyValue;
    RedMap;
    RedList;
    RedStringLiteral;
    RedIntegerLiteral;
    RedBooleanLiteral;
    RedMissingValue;
    RedUndefinedValue;
    RedUnknownSymbol;
    RedErrorString;
    /// A bracket, comma or colon.
    RedPunctuation;
}

red_children!(RedMultiValue, RedValueWithBackground, RedBackgroundList, RedKeyValue, RedMap, RedList);

red_values!(
    RedMap,
    RedList,
    RedStringLiteral,
    RedIntegerLiteral,
    RedBooleanLiteral,
    RedMissingValue,
    RedUndefinedValue,
    RedUnknownSymbol,
    RedErrorString
);

#[inline]
#[track_caller]
fn parent_of(data: &RedData) -> &RedData {
    match data.parent() {
        Some(parent) => parent,
        None => unreachable!("only the root has no parent"),
    }
}

#[track_caller]
fn green_value(data: &RedData) -> &GreenValue {
    match data.green() {
        GreenElement::Value(value) => value,
        other => unreachable!("expected a value, found {:?}", other.kind()),
    }
}

/// Where a multi-value slot sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultiValueParent<'a> {
    Root,
    ListItem(RedList<'a>),
    KeyValueSection(RedKeyValue<'a>),
}

/// Where a background run sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundListParent<'a> {
    /// Background before a value.
    ValueWithBackground(RedValueWithBackground<'a>),
    /// Background after the last value of a slot.
    MultiValueTrailing(RedMultiValue<'a>),
}

/// Where a bracket or separator sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PunctuationParent<'a> {
    Map(RedMap<'a>),
    List(RedList<'a>),
    KeyValue(RedKeyValue<'a>),
}

impl<'a> RedMultiValue<'a> {
    pub fn green(self) -> &'a GreenMultiValue {
        match self.data.green() {
            GreenElement::MultiValue(green) => green,
            _ => unreachable!(),
        }
    }

    pub fn parent(self) -> MultiValueParent<'a> {
        let Some(parent) = self.data.parent() else {
            return MultiValueParent::Root;
        };
        match parent.green() {
            GreenElement::Value(GreenValue::List(_)) => {
                MultiValueParent::ListItem(RedList { data: parent })
            }
            GreenElement::KeyValue(_) => {
                MultiValueParent::KeyValueSection(RedKeyValue { data: parent })
            }
            other => unreachable!("multi-value inside {:?}", other.kind()),
        }
    }

    pub fn value_node_count(self) -> usize {
        self.green().value_nodes().len()
    }

    #[track_caller]
    pub fn value_node(self, index: usize) -> RedValueWithBackground<'a> {
        let count = self.value_node_count();
        assert!(index < count, "value index {index} is out of range for {count} values");
        RedValueWithBackground { data: self.data.child(index) }
    }

    pub fn value_nodes(self) -> impl ExactSizeIterator<Item = RedValueWithBackground<'a>> {
        (0..self.value_node_count()).map(move |index| self.value_node(index))
    }

    /// The effective value of this slot.
    pub fn value(self) -> RedValue<'a> {
        self.value_node(0).content()
    }

    pub fn background_after(self) -> RedBackgroundList<'a> {
        RedBackgroundList { data: self.data.child(self.value_node_count()) }
    }
}

impl<'a> RedValueWithBackground<'a> {
    pub fn green(self) -> &'a GreenValueWithBackground {
        match self.data.green() {
            GreenElement::ValueWithBackground(green) => green,
            _ => unreachable!(),
        }
    }

    pub fn parent(self) -> RedMultiValue<'a> {
        RedMultiValue { data: parent_of(self.data) }
    }

    pub fn background_before(self) -> RedBackgroundList<'a> {
        RedBackgroundList { data: self.data.child(0) }
    }

    pub fn content(self) -> RedValue<'a> {
        let data = self.data.child(1);
        RedValue::from_data(data, green_value(data))
    }
}

impl<'a> RedBackgroundList<'a> {
    pub fn green(self) -> &'a GreenBackgroundList {
        match self.data.green() {
            GreenElement::BackgroundList(green) => green,
            _ => unreachable!(),
        }
    }

    pub fn parent(self) -> BackgroundListParent<'a> {
        let parent = parent_of(self.data);
        match parent.green() {
            GreenElement::ValueWithBackground(_) => {
                BackgroundListParent::ValueWithBackground(RedValueWithBackground { data: parent })
            }
            GreenElement::MultiValue(_) => {
                BackgroundListParent::MultiValueTrailing(RedMultiValue { data: parent })
            }
            other => unreachable!("background inside {:?}", other.kind()),
        }
    }

    pub fn len(self) -> usize {
        self.data.child_count()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[track_caller]
    pub fn background(self, index: usize) -> RedBackground<'a> {
        RedBackground { data: self.data.child(index) }
    }

    pub fn iter(self) -> impl ExactSizeIterator<Item = RedBackground<'a>> {
        (0..self.len()).map(move |index| self.background(index))
    }
}

impl<'a> RedBackground<'a> {
    pub fn green(self) -> &'a GreenBackground {
        match self.data.green() {
            GreenElement::Background(green) => green,
            _ => unreachable!(),
        }
    }

    pub fn parent(self) -> RedBackgroundList<'a> {
        RedBackgroundList { data: parent_of(self.data) }
    }
}

impl<'a> RedKeyValue<'a> {
    pub fn green(self) -> &'a GreenKeyValue {
        match self.data.green() {
            GreenElement::KeyValue(green) => green,
            _ => unreachable!(),
        }
    }

    pub fn parent(self) -> RedMap<'a> {
        RedMap { data: parent_of(self.data) }
    }

    pub fn valid_key(self) -> Option<&'a GreenStringLiteral> {
        self.green().valid_key().map(|key| &**key)
    }

    pub fn section_count(self) -> usize {
        self.green().value_section_nodes().len()
    }

    /// Section `index`: 0 is the key, 1 the value, later ones are erroneous.
    #[track_caller]
    pub fn section(self, index: usize) -> RedMultiValue<'a> {
        let count = self.section_count();
        assert!(index < count, "section index {index} is out of range for {count} sections");
        RedMultiValue { data: self.data.child(2 * index) }
    }

    pub fn sections(self) -> impl ExactSizeIterator<Item = RedMultiValue<'a>> {
        (0..self.section_count()).map(move |index| self.section(index))
    }

    /// The colon following section `index`.
    #[track_caller]
    pub fn colon(self, index: usize) -> RedPunctuation<'a> {
        let count = self.section_count().saturating_sub(1);
        assert!(index < count, "colon index {index} is out of range for {count} colons");
        RedPunctuation { data: self.data.child(2 * index + 1) }
    }

    pub fn key_node(self) -> RedMultiValue<'a> {
        self.section(0)
    }

    pub fn value_node(self) -> Option<RedMultiValue<'a>> {
        (self.section_count() > 1).then(|| self.section(1))
    }
}

impl<'a> RedMap<'a> {
    pub fn green(self) -> &'a GreenMap {
        match green_value(self.data) {
            GreenValue::Map(green) => green,
            _ => unreachable!(),
        }
    }

    pub fn curly_open(self) -> RedPunctuation<'a> {
        RedPunctuation { data: self.data.child(0) }
    }

    pub fn key_value_count(self) -> usize {
        self.green().key_value_nodes().len()
    }

    pub fn filtered_key_value_count(self) -> usize {
        self.green().filtered_key_value_count()
    }

    #[track_caller]
    pub fn key_value_node(self, index: usize) -> RedKeyValue<'a> {
        let count = self.key_value_count();
        assert!(index < count, "key-value index {index} is out of range for {count} entries");
        RedKeyValue { data: self.data.child(1 + 2 * index) }
    }

    pub fn key_value_nodes(self) -> impl ExactSizeIterator<Item = RedKeyValue<'a>> {
        (0..self.key_value_count()).map(move |index| self.key_value_node(index))
    }

    /// The comma following entry `index`.
    #[track_caller]
    pub fn comma(self, index: usize) -> RedPunctuation<'a> {
        let count = self.key_value_count() - 1;
        assert!(index < count, "comma index {index} is out of range for {count} commas");
        RedPunctuation { data: self.data.child(2 + 2 * index) }
    }

    pub fn curly_close(self) -> Option<RedPunctuation<'a>> {
        if self.green().missing_curly_close() {
            return None;
        }
        Some(RedPunctuation { data: self.data.child(self.data.child_count() - 1) })
    }
}

impl<'a> RedList<'a> {
    pub fn green(self) -> &'a GreenList {
        match green_value(self.data) {
            GreenValue::List(green) => green,
            _ => unreachable!(),
        }
    }

    pub fn square_bracket_open(self) -> RedPunctuation<'a> {
        RedPunctuation { data: self.data.child(0) }
    }

    pub fn list_item_count(self) -> usize {
        self.green().list_item_nodes().len()
    }

    pub fn filtered_list_item_count(self) -> usize {
        self.green().filtered_list_item_count()
    }

    #[track_caller]
    pub fn list_item_node(self, index: usize) -> RedMultiValue<'a> {
        let count = self.list_item_count();
        assert!(index < count, "item index {index} is out of range for {count} items");
        RedMultiValue { data: self.data.child(1 + 2 * index) }
    }

    pub fn list_item_nodes(self) -> impl ExactSizeIterator<Item = RedMultiValue<'a>> {
        (0..self.list_item_count()).map(move |index| self.list_item_node(index))
    }

    /// The comma following item `index`.
    #[track_caller]
    pub fn comma(self, index: usize) -> RedPunctuation<'a> {
        let count = self.list_item_count() - 1;
        assert!(index < count, "comma index {index} is out of range for {count} commas");
        RedPunctuation { data: self.data.child(2 + 2 * index) }
    }

    pub fn square_bracket_close(self) -> Option<RedPunctuation<'a>> {
        if self.green().missing_square_bracket_close() {
            return None;
        }
        Some(RedPunctuation { data: self.data.child(self.data.child_count() - 1) })
    }
}

impl<'a> RedStringLiteral<'a> {
    pub fn green(self) -> &'a GreenStringLiteral {
        match green_value(self.data) {
            GreenValue::StringLiteral(green) => green,
            _ => unreachable!(),
        }
    }

    /// The unescaped string.
    pub fn value(self) -> &'a str {
        self.green().value()
    }
}

impl<'a> RedIntegerLiteral<'a> {
    pub fn value(self) -> &'a JsonInteger {
        match green_value(self.data) {
            GreenValue::IntegerLiteral(green) => green.value(),
            _ => unreachable!(),
        }
    }
}

impl RedBooleanLiteral<'_> {
    pub fn value(self) -> bool {
        match green_value(self.data) {
            GreenValue::BooleanLiteral(value) => *value,
            _ => unreachable!(),
        }
    }
}

impl RedUnknownSymbol<'_> {
    pub fn symbol(self) -> char {
        match green_value(self.data) {
            GreenValue::UnknownSymbol(green) => green.symbol(),
            _ => unreachable!(),
        }
    }
}

impl<'a> RedErrorString<'a> {
    pub fn green(self) -> &'a GreenErrorString {
        match green_value(self.data) {
            GreenValue::ErrorString(green) => green,
            _ => unreachable!(),
        }
    }

    /// Errors positioned in the source text rather than in the string.
    pub fn absolute_errors(self) -> impl Iterator<Item = Diagnostic> + 'a {
        let start = self.absolute_start();
        self.green().errors().iter().map(move |error| error.clone().offset_by(start))
    }
}

impl<'a> RedPunctuation<'a> {
    pub fn kind(self) -> Punctuation {
        match self.data.green() {
            GreenElement::Punctuation(punctuation) => punctuation,
            _ => unreachable!(),
        }
    }

    pub fn parent(self) -> PunctuationParent<'a> {
        let parent = parent_of(self.data);
        match parent.green() {
            GreenElement::Value(GreenValue::Map(_)) => PunctuationParent::Map(RedMap { data: parent }),
            GreenElement::Value(GreenValue::List(_)) => {
                PunctuationParent::List(RedList { data: parent })
            }
            GreenElement::KeyValue(_) => PunctuationParent::KeyValue(RedKeyValue { data: parent }),
            other => unreachable!("punctuation inside {:?}", other.kind()),
        }
    }
}

/// A red handle for any value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedValue<'a> {
    Map(RedMap<'a>),
    List(RedList<'a>),
    StringLiteral(RedStringLiteral<'a>),
    IntegerLiteral(RedIntegerLiteral<'a>),
    BooleanLiteral(RedBooleanLiteral<'a>),
    MissingValue(RedMissingValue<'a>),
    UndefinedValue(RedUndefinedValue<'a>),
    UnknownSymbol(RedUnknownSymbol<'a>),
    ErrorString(RedErrorString<'a>),
}

impl<'a> RedValue<'a> {
    pub(super) fn from_data(data: &'a RedData, value: &GreenValue) -> Self {
        match value {
            GreenValue::Map(_) => Self::Map(RedMap { data }),
            GreenValue::List(_) => Self::List(RedList { data }),
            GreenValue::StringLiteral(_) => Self::StringLiteral(RedStringLiteral { data }),
            GreenValue::IntegerLiteral(_) => Self::IntegerLiteral(RedIntegerLiteral { data }),
            GreenValue::BooleanLiteral(_) => Self::BooleanLiteral(RedBooleanLiteral { data }),
            GreenValue::MissingValue => Self::MissingValue(RedMissingValue { data }),
            GreenValue::UndefinedValue(_) => Self::UndefinedValue(RedUndefinedValue { data }),
            GreenValue::UnknownSymbol(_) => Self::UnknownSymbol(RedUnknownSymbol { data }),
            GreenValue::ErrorString(_) => Self::ErrorString(RedErrorString { data }),
        }
    }

    pub(super) fn data(self) -> &'a RedData {
        match self {
            Self::Map(node) => node.data,
            Self::List(node) => node.data,
            Self::StringLiteral(node) => node.data,
            Self::IntegerLiteral(node) => node.data,
            Self::BooleanLiteral(node) => node.data,
            Self::MissingValue(node) => node.data,
            Self::UndefinedValue(node) => node.data,
            Self::UnknownSymbol(node) => node.data,
            Self::ErrorString(node) => node.data,
        }
    }

    pub fn green(self) -> &'a GreenValue {
        green_value(self.data())
    }

    pub fn parent(self) -> RedValueWithBackground<'a> {
        RedValueWithBackground { data: parent_of(self.data()) }
    }

    #[inline]
    pub fn is_missing(self) -> bool {
        matches!(self, Self::MissingValue(_))
    }

    #[inline]
    pub fn text_len(self) -> TextSize {
        self.data().green.text_len()
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
    pub fn ptr_eq(self, other: Self) -> bool {
        std::ptr::eq(self.data(), other.data())
    }

    #[inline]
    pub fn as_element(self) -> RedElement<'a> {
        RedElement::Value(self)
    }
}

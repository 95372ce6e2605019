//! Immutable, position-independent syntax nodes.
//!
//! Green nodes know their length but not their position. Containers keep the
//! offsets of their children, so positions are recovered without scanning.

mod background;
mod container;
mod integer;
mod value;

use text_size::TextSize;

pub use self::background::{GreenBackground, GreenBackgroundList, ValueDelimiter};
pub use self::container::{
    GreenKeyValue, GreenList, GreenMap, GreenMultiValue, GreenValueWithBackground,
};
pub use self::integer::JsonInteger;
pub use self::value::{
    GreenErrorString, GreenIntegerLiteral, GreenStringLiteral, GreenUndefinedValue,
    GreenUnknownSymbol, GreenValue,
};
use crate::SyntaxKind;
use crate::spanned::{Interleaved, SeparatedSpannedList, TextLength};

/// Brackets and separators. Green containers store them implicitly.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Punctuation {
    CurlyOpen,
    CurlyClose,
    SquareBracketOpen,
    SquareBracketClose,
    Colon,
    Comma,
}

impl Punctuation {
    pub const fn as_char(self) -> char {
        match self {
            Self::CurlyOpen => '{',
            Self::CurlyClose => '}',
            Self::SquareBracketOpen => '[',
            Self::SquareBracketClose => ']',
            Self::Colon => ':',
            Self::Comma => ',',
        }
    }

    pub const fn kind(self) -> SyntaxKind {
        match self {
            Self::CurlyOpen => SyntaxKind::CURLY_OPEN,
            Self::CurlyClose => SyntaxKind::CURLY_CLOSE,
            Self::SquareBracketOpen => SyntaxKind::SQUARE_BRACKET_OPEN,
            Self::SquareBracketClose => SyntaxKind::SQUARE_BRACKET_CLOSE,
            Self::Colon => SyntaxKind::COLON,
            Self::Comma => SyntaxKind::COMMA,
        }
    }

    /// The delimiter this symbol becomes when it appears at the top level,
    /// or `None` for opening brackets.
    pub const fn as_value_delimiter(self) -> Option<ValueDelimiter> {
        match self {
            Self::Colon => Some(ValueDelimiter::Colon),
            Self::Comma => Some(ValueDelimiter::Comma),
            Self::CurlyClose => Some(ValueDelimiter::CurlyClose),
            Self::SquareBracketClose => Some(ValueDelimiter::SquareBracketClose),
            Self::CurlyOpen | Self::SquareBracketOpen => None,
        }
    }
}

impl TextLength for Punctuation {
    #[inline]
    fn text_len(&self) -> TextSize {
        TextSize::new(1)
    }
}

/// A borrowed view of any green node, including implicit punctuation.
///
/// This is the uniform shape the red layer walks: every element knows its
/// children and where each of them starts.
#[derive(Clone, Copy, Debug)]
pub enum GreenElement<'g> {
    MultiValue(&'g GreenMultiValue),
    ValueWithBackground(&'g GreenValueWithBackground),
    BackgroundList(&'g GreenBackgroundList),
    Background(&'g GreenBackground),
    Value(&'g GreenValue),
    KeyValue(&'g GreenKeyValue),
    Punctuation(Punctuation),
}

impl<'g> GreenElement<'g> {
    pub fn kind(self) -> SyntaxKind {
        match self {
            Self::MultiValue(_) => SyntaxKind::MULTI_VALUE,
            Self::ValueWithBackground(_) => SyntaxKind::VALUE_WITH_BACKGROUND,
            Self::BackgroundList(_) => SyntaxKind::BACKGROUND_LIST,
            Self::Background(background) => background.kind(),
            Self::Value(value) => value.kind(),
            Self::KeyValue(_) => SyntaxKind::KEY_VALUE,
            Self::Punctuation(punctuation) => punctuation.kind(),
        }
    }

    pub fn text_len(self) -> TextSize {
        match self {
            Self::MultiValue(node) => node.text_len(),
            Self::ValueWithBackground(node) => node.text_len(),
            Self::BackgroundList(node) => node.text_len(),
            Self::Background(node) => node.text_len(),
            Self::Value(node) => node.text_len(),
            Self::KeyValue(node) => node.text_len(),
            Self::Punctuation(node) => node.text_len(),
        }
    }

    /// Returns `true` for elements that never have children: background,
    /// punctuation and every value except maps and lists.
    pub fn is_terminal(self) -> bool {
        match self {
            Self::Background(_) | Self::Punctuation(_) => true,
            Self::Value(value) => !value.is_container(),
            Self::MultiValue(_)
            | Self::ValueWithBackground(_)
            | Self::BackgroundList(_)
            | Self::KeyValue(_) => false,
        }
    }

    pub fn child_count(self) -> usize {
        match self {
            Self::MultiValue(node) => node.value_nodes().len() + 1,
            Self::ValueWithBackground(_) => 2,
            Self::BackgroundList(node) => node.len(),
            Self::Value(GreenValue::Map(map)) => {
                bracketed_child_count(map.key_value_nodes(), map.missing_curly_close())
            }
            Self::Value(GreenValue::List(list)) => {
                bracketed_child_count(list.list_item_nodes(), list.missing_square_bracket_close())
            }
            Self::KeyValue(node) => node.value_section_nodes().interleaved_len(),
            Self::Value(_) | Self::Background(_) | Self::Punctuation(_) => 0,
        }
    }

    #[track_caller]
    pub fn child(self, index: usize) -> GreenElement<'g> {
        let count = self.child_count();
        if index >= count {
            child_out_of_range(self, index, count);
        }

        match self {
            Self::MultiValue(node) => match node.value_nodes().get(index) {
                Some(value_node) => Self::ValueWithBackground(value_node),
                None => Self::BackgroundList(node.background_after()),
            },
            Self::ValueWithBackground(node) => match index {
                0 => Self::BackgroundList(node.background_before()),
                _ => Self::Value(node.content()),
            },
            Self::BackgroundList(node) => Self::Background(&node[index]),
            Self::Value(GreenValue::Map(map)) => bracketed_child(
                map.key_value_nodes(),
                index,
                count,
                Punctuation::CurlyOpen,
                Punctuation::CurlyClose,
                |pair| Self::KeyValue(pair),
            ),
            Self::Value(GreenValue::List(list)) => bracketed_child(
                list.list_item_nodes(),
                index,
                count,
                Punctuation::SquareBracketOpen,
                Punctuation::SquareBracketClose,
                |item| Self::MultiValue(item),
            ),
            Self::KeyValue(node) => match node.value_section_nodes().interleaved(index) {
                Interleaved::Element(section) => Self::MultiValue(section),
                Interleaved::Separator(_) => Self::Punctuation(Punctuation::Colon),
            },
            Self::Value(_) | Self::Background(_) | Self::Punctuation(_) => unreachable!(),
        }
    }

    /// Start of child `index`, relative to the start of this element.
    #[track_caller]
    pub fn child_offset(self, index: usize) -> TextSize {
        let count = self.child_count();
        if index >= count {
            child_out_of_range(self, index, count);
        }

        match self {
            Self::MultiValue(node) => {
                if index < node.value_nodes().len() {
                    node.value_nodes().offset_of(index)
                } else {
                    node.background_after_offset()
                }
            }
            Self::ValueWithBackground(node) => match index {
                0 => TextSize::new(0),
                _ => node.background_before().text_len(),
            },
            Self::BackgroundList(node) => node.offset_of(index),
            Self::Value(GreenValue::Map(map)) => {
                bracketed_child_offset(map.key_value_nodes(), index, count)
            }
            Self::Value(GreenValue::List(list)) => {
                bracketed_child_offset(list.list_item_nodes(), index, count)
            }
            Self::KeyValue(node) => node.value_section_nodes().interleaved_offset(index),
            Self::Value(_) | Self::Background(_) | Self::Punctuation(_) => unreachable!(),
        }
    }
}

#[cold]
#[track_caller]
fn child_out_of_range(element: GreenElement<'_>, index: usize, count: usize) -> ! {
    panic!("child index {index} is out of range for {:?} with {count} children", element.kind())
}

/// Children of a bracketed container: the opening bracket, the interleaved
/// slots and separators, then the closing bracket unless it is missing.
fn bracketed_child_count<T>(slots: &SeparatedSpannedList<T>, missing_close: bool) -> usize {
    1 + slots.interleaved_len() + usize::from(!missing_close)
}

fn bracketed_child<'g, T>(
    slots: &'g SeparatedSpannedList<T>,
    index: usize,
    count: usize,
    open: Punctuation,
    close: Punctuation,
    slot: impl FnOnce(&'g T) -> GreenElement<'g>,
) -> GreenElement<'g> {
    if index == 0 {
        return GreenElement::Punctuation(open);
    }
    if index == slots.interleaved_len() + 1 {
        debug_assert_eq!(index, count - 1);
        return GreenElement::Punctuation(close);
    }
    match slots.interleaved(index - 1) {
        Interleaved::Element(element) => slot(element),
        Interleaved::Separator(_) => GreenElement::Punctuation(Punctuation::Comma),
    }
}

fn bracketed_child_offset<T>(
    slots: &SeparatedSpannedList<T>,
    index: usize,
    count: usize,
) -> TextSize {
    let open = TextSize::new(1);
    if index == 0 {
        return TextSize::new(0);
    }
    if index == slots.interleaved_len() + 1 {
        debug_assert_eq!(index, count - 1);
        return open + slots.text_len();
    }
    open + slots.interleaved_offset(index - 1)
}

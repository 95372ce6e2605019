use text_size::TextSize;

use crate::SyntaxKind;
use crate::spanned::{SpannedList, TextLength};

/// Text that carries no value: whitespace, comments and stray delimiters
/// at the top level.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GreenBackground {
    Whitespace(TextSize),
    Comment(TextSize),
    /// A `/*` comment that runs into the end of the input.
    UnterminatedComment(TextSize),
    RootLevelValueDelimiter(ValueDelimiter),
}

/// A control symbol that separates or terminates values.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueDelimiter {
    Colon,
    Comma,
    CurlyClose,
    SquareBracketClose,
}

impl ValueDelimiter {
    pub const fn as_char(self) -> char {
        match self {
            Self::Colon => ':',
            Self::Comma => ',',
            Self::CurlyClose => '}',
            Self::SquareBracketClose => ']',
        }
    }
}

impl GreenBackground {
    #[track_caller]
    pub fn whitespace(len: TextSize) -> Self {
        assert!(len > TextSize::new(0), "whitespace must not be empty");
        Self::Whitespace(len)
    }

    #[track_caller]
    pub fn comment(len: TextSize) -> Self {
        assert!(len >= TextSize::new(2), "a comment is at least `//` long");
        Self::Comment(len)
    }

    #[track_caller]
    pub fn unterminated_comment(len: TextSize) -> Self {
        assert!(len >= TextSize::new(2), "an unterminated comment is at least `/*` long");
        Self::UnterminatedComment(len)
    }

    pub fn kind(self) -> SyntaxKind {
        match self {
            Self::Whitespace(_) => SyntaxKind::WHITESPACE,
            Self::Comment(_) => SyntaxKind::COMMENT,
            Self::UnterminatedComment(_) => SyntaxKind::UNTERMINATED_COMMENT,
            Self::RootLevelValueDelimiter(_) => SyntaxKind::ROOT_LEVEL_VALUE_DELIMITER,
        }
    }
}

impl TextLength for GreenBackground {
    #[inline]
    fn text_len(&self) -> TextSize {
        match *self {
            Self::Whitespace(len) | Self::Comment(len) | Self::UnterminatedComment(len) => len,
            Self::RootLevelValueDelimiter(_) => TextSize::new(1),
        }
    }
}

/// A run of background, possibly empty.
pub type GreenBackgroundList = SpannedList<GreenBackground>;

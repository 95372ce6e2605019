use sylva_errors::Diagnostic;
use text_size::TextSize;
use triomphe::Arc;

use super::{GreenList, GreenMap, JsonInteger};
use crate::SyntaxKind;
use crate::spanned::TextLength;

/// Anything that can stand in a value position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GreenValue {
    Map(Arc<GreenMap>),
    List(Arc<GreenList>),
    StringLiteral(Arc<GreenStringLiteral>),
    IntegerLiteral(Arc<GreenIntegerLiteral>),
    BooleanLiteral(bool),
    /// Synthesized where a value was required but absent. Always empty.
    MissingValue,
    /// Value-shaped text that is not a legal literal, or a region skipped
    /// because it was nested too deeply.
    UndefinedValue(GreenUndefinedValue),
    /// A single character that cannot start any token.
    UnknownSymbol(GreenUnknownSymbol),
    /// A string literal with lexical errors.
    ErrorString(Arc<GreenErrorString>),
}

impl GreenValue {
    pub const TRUE: Self = Self::BooleanLiteral(true);
    pub const FALSE: Self = Self::BooleanLiteral(false);

    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Map(_) => SyntaxKind::MAP,
            Self::List(_) => SyntaxKind::LIST,
            Self::StringLiteral(_) => SyntaxKind::STRING_LITERAL,
            Self::IntegerLiteral(_) => SyntaxKind::INTEGER_LITERAL,
            Self::BooleanLiteral(_) => SyntaxKind::BOOLEAN_LITERAL,
            Self::MissingValue => SyntaxKind::MISSING_VALUE,
            Self::UndefinedValue(_) => SyntaxKind::UNDEFINED_VALUE,
            Self::UnknownSymbol(_) => SyntaxKind::UNKNOWN_SYMBOL,
            Self::ErrorString(_) => SyntaxKind::ERROR_STRING,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingValue)
    }

    /// Returns `true` for maps and lists.
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Map(_) | Self::List(_))
    }
}

impl TextLength for GreenValue {
    fn text_len(&self) -> TextSize {
        match self {
            Self::Map(map) => map.text_len(),
            Self::List(list) => list.text_len(),
            Self::StringLiteral(literal) => literal.text_len(),
            Self::IntegerLiteral(literal) => literal.text_len(),
            Self::BooleanLiteral(true) => TextSize::of("true"),
            Self::BooleanLiteral(false) => TextSize::of("false"),
            Self::MissingValue => TextSize::new(0),
            Self::UndefinedValue(value) => value.len,
            Self::UnknownSymbol(symbol) => symbol.text_len(),
            Self::ErrorString(string) => string.len,
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenStringLiteral {
    value: Box<str>,
    len: TextSize,
}

impl GreenStringLiteral {
    /// `value` is the unescaped content, `len` the length of the source text
    /// including both quotes.
    #[track_caller]
    pub fn new(value: impl Into<Box<str>>, len: TextSize) -> Self {
        assert!(len >= TextSize::new(2), "a string literal includes its quotes");
        Self { value: value.into(), len }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl TextLength for GreenStringLiteral {
    #[inline]
    fn text_len(&self) -> TextSize {
        self.len
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenIntegerLiteral {
    value: JsonInteger,
    len: TextSize,
}

impl GreenIntegerLiteral {
    #[track_caller]
    pub fn new(value: JsonInteger, len: TextSize) -> Self {
        assert!(len > TextSize::new(0), "an integer literal must not be empty");
        Self { value, len }
    }

    pub fn value(&self) -> &JsonInteger {
        &self.value
    }
}

impl TextLength for GreenIntegerLiteral {
    #[inline]
    fn text_len(&self) -> TextSize {
        self.len
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GreenUndefinedValue {
    len: TextSize,
}

impl GreenUndefinedValue {
    #[track_caller]
    pub fn new(len: TextSize) -> Self {
        assert!(len > TextSize::new(0), "an undefined value must not be empty");
        Self { len }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GreenUnknownSymbol {
    symbol: char,
}

impl GreenUnknownSymbol {
    pub fn new(symbol: char) -> Self {
        Self { symbol }
    }

    pub fn symbol(self) -> char {
        self.symbol
    }
}

impl TextLength for GreenUnknownSymbol {
    #[inline]
    fn text_len(&self) -> TextSize {
        TextSize::of(self.symbol)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenErrorString {
    len: TextSize,
    errors: Box<[Diagnostic]>,
}

impl GreenErrorString {
    /// `errors` are positioned relative to the opening quote.
    #[track_caller]
    pub fn new(len: TextSize, errors: impl Into<Box<[Diagnostic]>>) -> Self {
        let errors = errors.into();
        assert!(len > TextSize::new(0), "an error string must not be empty");
        assert!(!errors.is_empty(), "an error string carries at least one error");
        Self { len, errors }
    }

    /// Errors of this string, relative to its opening quote.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }
}

impl TextLength for GreenErrorString {
    #[inline]
    fn text_len(&self) -> TextSize {
        self.len
    }
}

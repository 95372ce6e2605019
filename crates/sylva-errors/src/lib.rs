//! Diagnostics produced while tokenizing and parsing JSON text.

use std::fmt::{self, Display};

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::{TextRange, TextSize};

/// Every kind of problem the tokenizer and parser can report.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum ErrorCode {
    UnterminatedString,
    UnterminatedComment,
    IllegalControlCharacter,
    BadEscapeSequence,
    UnknownSymbol,
    MissingValue,
    ExtraValue,
    MissingSeparator,
    MissingClosingBracket,
    InvalidPropertyKey,
    DuplicatePropertyKey,
    MissingPropertyKey,
    ExtraValueSection,
    ExpectedEndOfInput,
    NestingTooDeep,
}

impl ErrorCode {
    /// Human-readable description used when rendering.
    pub const fn message(self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string",
            Self::UnterminatedComment => "unterminated multi-line comment",
            Self::IllegalControlCharacter => "illegal control character in string",
            Self::BadEscapeSequence => "unrecognized escape sequence",
            Self::UnknownSymbol => "unexpected symbol",
            Self::MissingValue => "missing value",
            Self::ExtraValue => "expected `,` or a closing bracket before this value",
            Self::MissingSeparator => "expected `:`",
            Self::MissingClosingBracket => "missing closing bracket",
            Self::InvalidPropertyKey => "property keys must be strings",
            Self::DuplicatePropertyKey => "duplicate property key",
            Self::MissingPropertyKey => "missing property key",
            Self::ExtraValueSection => "unexpected `:`, a property has exactly one value",
            Self::ExpectedEndOfInput => "expected end of input",
            Self::NestingTooDeep => "nesting too deep",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::UnterminatedComment => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable kebab-case identifier, e.g. `missing-value`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated-string",
            Self::UnterminatedComment => "unterminated-comment",
            Self::IllegalControlCharacter => "illegal-control-character",
            Self::BadEscapeSequence => "bad-escape-sequence",
            Self::UnknownSymbol => "unknown-symbol",
            Self::MissingValue => "missing-value",
            Self::ExtraValue => "extra-value",
            Self::MissingSeparator => "missing-separator",
            Self::MissingClosingBracket => "missing-closing-bracket",
            Self::InvalidPropertyKey => "invalid-property-key",
            Self::DuplicatePropertyKey => "duplicate-property-key",
            Self::MissingPropertyKey => "missing-property-key",
            Self::ExtraValueSection => "extra-value-section",
            Self::ExpectedEndOfInput => "expected-end-of-input",
            Self::NestingTooDeep => "nesting-too-deep",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    fn level(self) -> Level {
        match self {
            Self::Warning => Level::Warning,
            Self::Error => Level::Error,
        }
    }
}

/// A problem found in the source, located by a byte range.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    code: ErrorCode,
    severity: Severity,
    start: TextSize,
    length: TextSize,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, start: TextSize, length: TextSize) -> Self {
        Self { code, severity: code.severity(), start, length }
    }

    pub fn at(code: ErrorCode, range: TextRange) -> Self {
        Self::new(code, range.start(), range.len())
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn start(&self) -> TextSize {
        self.start
    }

    pub fn length(&self) -> TextSize {
        self.length
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.start, self.length)
    }

    pub fn message(&self) -> &'static str {
        self.code.message()
    }

    /// Moves the diagnostic by `delta`, turning a position relative to some
    /// enclosing token into one relative to the enclosing text.
    #[must_use]
    pub fn offset_by(self, delta: TextSize) -> Self {
        Self { start: self.start + delta, ..self }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = self.severity.level();
        let message = level.title(self.message()).id(self.code.name()).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range().into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

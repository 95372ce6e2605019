//! Splits JSON text into green leaves and background.
//!
//! The tokenizer never fails: lexical problems become error-carrying symbols
//! and diagnostics, and scanning always continues.

mod cursor;
pub mod literal;

use cursor::Cursor;
use sylva_errors::{Diagnostic, ErrorCode};
use sylva_yellow::green::{
    GreenBackground, GreenErrorString, GreenStringLiteral, GreenUndefinedValue, GreenUnknownSymbol,
    GreenValue, Punctuation,
};
use sylva_yellow::{SyntaxKind, TextLength as _};
use text_size::{TextRange, TextSize};
use triomphe::Arc;

pub use crate::literal::classify;

/// One scanned piece of source text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Symbol {
    Background(GreenBackground),
    Value(GreenValue),
    Punctuation(Punctuation),
    Eof,
}

impl Symbol {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Background(background) => background.kind(),
            Self::Value(value) => value.kind(),
            Self::Punctuation(punctuation) => punctuation.kind(),
            Self::Eof => SyntaxKind::EOF,
        }
    }

    pub fn text_len(&self) -> TextSize {
        match self {
            Self::Background(background) => background.text_len(),
            Self::Value(value) => value.text_len(),
            Self::Punctuation(punctuation) => punctuation.text_len(),
            Self::Eof => TextSize::new(0),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub symbol: Symbol,
    pub range: TextRange,
}

impl Token {
    const EOF: Self = Self { symbol: Symbol::Eof, range: TextRange::empty(TextSize::new(0)) };

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.symbol.kind()
    }
}

pub struct Tokenizer<'t> {
    text: &'t str,
    cursor: Cursor<'t>,
    current: Token,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> Tokenizer<'t> {
    /// # Panics
    ///
    /// Panics if `text` is longer than `u32::MAX` bytes.
    #[track_caller]
    pub fn new(text: &'t str) -> Self {
        assert!(u32::try_from(text.len()).is_ok(), "text is longer than u32::MAX bytes");

        let mut tokenizer =
            Self { text, cursor: Cursor::new(text), current: Token::EOF, diagnostics: Vec::new() };
        tokenizer.next_token();
        tokenizer
    }

    /// The token that the next call to [`Tokenizer::next_token`] returns.
    pub fn peek(&self) -> &Token {
        &self.current
    }

    /// Diagnostics found so far, in discovery order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn drain_diagnostics(&mut self) -> std::vec::Drain<'_, Diagnostic> {
        self.diagnostics.drain(..)
    }

    /// Returns the current token and scans the one after it. Past the end,
    /// keeps returning `Eof`.
    pub fn next_token(&mut self) -> Token {
        let start = self.offset();
        let symbol = self.symbol(start);
        let range = TextRange::at(start, self.cursor.pos_within_token());
        self.cursor.reset_pos_within_token();

        debug_assert_eq!(range.len(), symbol.text_len(), "{symbol:?}");
        std::mem::replace(&mut self.current, Token { symbol, range })
    }

    fn offset(&self) -> TextSize {
        TextSize::of(self.text) - self.cursor.len()
    }

    fn token_text(&self, start: TextSize) -> &'t str {
        &self.text[TextRange::at(start, self.cursor.pos_within_token())]
    }

    fn error(&mut self, code: ErrorCode, start: TextSize, length: TextSize) {
        self.diagnostics.push(Diagnostic::new(code, start, length));
    }

    fn symbol(&mut self, start: TextSize) -> Symbol {
        let Some(first_char) = self.cursor.advance() else {
            return Symbol::Eof;
        };

        match first_char {
            '{' => Symbol::Punctuation(Punctuation::CurlyOpen),
            '}' => Symbol::Punctuation(Punctuation::CurlyClose),
            '[' => Symbol::Punctuation(Punctuation::SquareBracketOpen),
            ']' => Symbol::Punctuation(Punctuation::SquareBracketClose),
            ':' => Symbol::Punctuation(Punctuation::Colon),
            ',' => Symbol::Punctuation(Punctuation::Comma),
            '"' => self.string(start),
            '/' if self.cursor.matches('/') => {
                self.cursor.advance_while(|c| c != '\n' && c != '\r');
                Symbol::Background(GreenBackground::comment(self.cursor.pos_within_token()))
            }
            '/' if self.cursor.matches('*') => self.block_comment(start),
            c if c.is_whitespace() => {
                self.cursor.advance_while(char::is_whitespace);
                Symbol::Background(GreenBackground::whitespace(self.cursor.pos_within_token()))
            }
            c if is_value_char(c) => {
                self.cursor.advance_while(is_value_char);
                match classify(self.token_text(start)) {
                    Some(value) => Symbol::Value(value),
                    None => {
                        let len = self.cursor.pos_within_token();
                        self.error(ErrorCode::UnknownSymbol, start, len);
                        Symbol::Value(GreenValue::UndefinedValue(GreenUndefinedValue::new(len)))
                    }
                }
            }
            c => {
                self.error(ErrorCode::UnknownSymbol, start, TextSize::of(c));
                Symbol::Value(GreenValue::UnknownSymbol(GreenUnknownSymbol::new(c)))
            }
        }
    }

    fn block_comment(&mut self, start: TextSize) -> Symbol {
        self.cursor.advance();
        while let Some(c) = self.cursor.advance() {
            if c == '*' && self.cursor.matches('/') {
                self.cursor.advance();
                return Symbol::Background(GreenBackground::comment(self.cursor.pos_within_token()));
            }
        }

        let len = self.cursor.pos_within_token();
        self.error(ErrorCode::UnterminatedComment, start, len);
        Symbol::Background(GreenBackground::unterminated_comment(len))
    }

    fn string(&mut self, start: TextSize) -> Symbol {
        let mut value = String::new();
        // Relative to the opening quote.
        let mut errors = Vec::new();

        loop {
            let Some(c) = self.cursor.advance() else {
                let len = self.cursor.pos_within_token();
                errors.insert(0, Diagnostic::new(ErrorCode::UnterminatedString, TextSize::new(0), len));
                break;
            };

            match c {
                '"' => break,
                '\\' => self.escape(&mut value, &mut errors),
                c if c < '\u{20}' => {
                    let at = self.cursor.pos_within_token() - TextSize::of(c);
                    errors.push(Diagnostic::new(ErrorCode::IllegalControlCharacter, at, TextSize::of(c)));
                    value.push(c);
                }
                c => value.push(c),
            }
        }

        let len = self.cursor.pos_within_token();
        if errors.is_empty() {
            return Symbol::Value(GreenValue::StringLiteral(Arc::new(GreenStringLiteral::new(
                value, len,
            ))));
        }

        self.diagnostics.extend(errors.iter().map(|error| error.clone().offset_by(start)));
        Symbol::Value(GreenValue::ErrorString(Arc::new(GreenErrorString::new(len, errors))))
    }

    fn escape(&mut self, value: &mut String, errors: &mut Vec<Diagnostic>) {
        let escape_start = self.cursor.pos_within_token() - TextSize::of('\\');
        let unescaped = match self.cursor.peek() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => {
                self.cursor.advance();
                return self.unicode_escape(escape_start, value, errors);
            }
            Some(c) => {
                self.cursor.advance();
                let len = self.cursor.pos_within_token() - escape_start;
                errors.push(Diagnostic::new(ErrorCode::BadEscapeSequence, escape_start, len));
                if c < '\u{20}' {
                    let at = self.cursor.pos_within_token() - TextSize::of(c);
                    errors.push(Diagnostic::new(
                        ErrorCode::IllegalControlCharacter,
                        at,
                        TextSize::of(c),
                    ));
                }
                return;
            }
            // The caller reports the unterminated string.
            None => return,
        };

        self.cursor.advance();
        value.push(unescaped);
    }

    fn unicode_escape(
        &mut self,
        escape_start: TextSize,
        value: &mut String,
        errors: &mut Vec<Diagnostic>,
    ) {
        let Some(unit) = self.hex_code_unit() else {
            let len = self.cursor.pos_within_token() - escape_start;
            errors.push(Diagnostic::new(ErrorCode::BadEscapeSequence, escape_start, len));
            return;
        };

        let c = match unit {
            0xD800..=0xDBFF => self.low_surrogate().and_then(|low| {
                let high = u32::from(unit) - 0xD800;
                let low = u32::from(low) - 0xDC00;
                char::from_u32(0x10000 + (high << 10) + low)
            }),
            _ => char::from_u32(u32::from(unit)),
        };
        value.push(c.unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    /// Reads four hex digits, consuming only the valid ones.
    fn hex_code_unit(&mut self) -> Option<u16> {
        let mut unit = 0u16;
        for _ in 0..4 {
            let digit = self.cursor.peek().and_then(|c| c.to_digit(16))?;
            self.cursor.advance();
            unit = (unit << 4) | digit as u16;
        }
        Some(unit)
    }

    /// Consumes a following `\uXXXX` if it encodes a low surrogate.
    fn low_surrogate(&mut self) -> Option<u16> {
        let hex = self.cursor.rest().strip_prefix("\\u")?.get(..4)?;
        if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return None;
        }
        let unit = u16::from_str_radix(hex, 16).ok()?;
        if !(0xDC00..=0xDFFF).contains(&unit) {
            return None;
        }
        self.cursor.advance_ascii(6);
        Some(unit)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields every token before `Eof`.
    fn next(&mut self) -> Option<Token> {
        if self.current.symbol == Symbol::Eof {
            return None;
        }
        Some(self.next_token())
    }
}

fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '.')
}

#[cfg(test)]
mod tests;

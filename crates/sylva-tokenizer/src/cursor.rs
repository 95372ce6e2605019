use std::str::Chars;

use text_size::{TextLen, TextSize};

pub(crate) struct Cursor<'t> {
    chars: Chars<'t>,
    len: TextSize,
}

impl<'t> Cursor<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self { chars: text.chars(), len: text.text_len() }
    }

    /// Bytes left to scan.
    pub(crate) fn len(&self) -> TextSize {
        self.chars.as_str().text_len()
    }

    pub(crate) fn rest(&self) -> &'t str {
        self.chars.as_str()
    }

    pub(crate) fn pos_within_token(&self) -> TextSize {
        self.len - self.len()
    }

    pub(crate) fn reset_pos_within_token(&mut self) {
        self.len = self.len();
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub(crate) fn matches(&self, c: char) -> bool {
        self.peek() == Some(c)
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Advances over `n` bytes that are known to be ASCII.
    pub(crate) fn advance_ascii(&mut self, n: usize) {
        for _ in 0..n {
            self.chars.next();
        }
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) {
        while self.peek().is_some_and(f) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_within_token() {
        let mut cursor = Cursor::new("ab é");
        cursor.advance_while(|c| c.is_ascii_alphabetic());
        assert_eq!(cursor.pos_within_token(), TextSize::new(2));
        assert!(cursor.matches(' '));

        cursor.reset_pos_within_token();
        cursor.advance_ascii(1);
        assert_eq!(cursor.advance(), Some('é'));
        assert_eq!(cursor.pos_within_token(), TextSize::new(3));
        assert_eq!(cursor.len(), TextSize::new(0));
        assert_eq!(cursor.rest(), "");
        assert_eq!(cursor.peek(), None);
    }
}

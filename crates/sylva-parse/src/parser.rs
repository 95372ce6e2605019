use drop_bomb::DropBomb;
use sylva_errors::{Diagnostic, ErrorCode};
use sylva_tokenizer::{Token, Tokenizer};
use sylva_yellow::SyntaxKind;
use text_size::{TextRange, TextSize};

use crate::ParseOptions;

pub(crate) struct Parser<'t> {
    tokenizer: Tokenizer<'t>,
    diagnostics: Vec<Diagnostic>,
    depth: u32,
    max_depth: u32,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(text: &'t str, options: ParseOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(text),
            diagnostics: Vec::new(),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    pub(crate) fn peek(&self) -> &Token {
        self.tokenizer.peek()
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.tokenizer.peek().kind()
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    /// Start of the next token.
    pub(crate) fn offset(&self) -> TextSize {
        self.tokenizer.peek().range.start()
    }

    /// Consumes the next token together with its lexical diagnostics.
    pub(crate) fn bump(&mut self) -> Token {
        debug_assert!(!self.at(SyntaxKind::EOF), "cannot consume past the end");
        self.diagnostics.extend(self.tokenizer.drain_diagnostics());
        self.tokenizer.next_token()
    }

    /// Consumes the next token and drops its lexical diagnostics.
    pub(crate) fn skip(&mut self) -> Token {
        debug_assert!(!self.at(SyntaxKind::EOF), "cannot consume past the end");
        self.tokenizer.drain_diagnostics().for_each(drop);
        self.tokenizer.next_token()
    }

    pub(crate) fn error(&mut self, code: ErrorCode, range: TextRange) {
        self.diagnostics.push(Diagnostic::at(code, range));
    }

    /// Reports `code` on the next token, or at the end of input.
    pub(crate) fn error_at_next(&mut self, code: ErrorCode) {
        let range = self.peek().range;
        self.error(code, range);
    }

    /// Enters a map or list, or returns `None` if that would nest too deeply.
    pub(crate) fn enter(&mut self) -> Option<Nesting> {
        if self.depth >= self.max_depth {
            return None;
        }
        self.depth += 1;
        Some(Nesting::new())
    }

    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }

    /// Diagnostics ordered by start; ties keep discovery order.
    pub(crate) fn finish(mut self) -> Vec<Diagnostic> {
        debug_assert!(self.at(SyntaxKind::EOF), "the root consumes all input");
        self.diagnostics.extend(self.tokenizer.drain_diagnostics());
        self.diagnostics.sort_by_key(Diagnostic::start);
        self.diagnostics
    }
}

pub(crate) struct Nesting {
    bomb: DropBomb,
}

impl Nesting {
    fn new() -> Self {
        Self { bomb: DropBomb::new("Nesting must be exited") }
    }

    pub(crate) fn exit(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();
        p.depth -= 1;
    }
}

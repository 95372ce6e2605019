//! Error-tolerant parser producing lossless green trees.

use std::fmt::Write as _;

use sylva_errors::Diagnostic;
use sylva_yellow::green::GreenMultiValue;
use sylva_yellow::{SyntaxKind, SyntaxTree, WalkEvent};
use triomphe::Arc;

mod grammar;
mod parser;
#[cfg(test)]
mod tests;

/// Nesting limit used by [`ParseOptions::default`].
pub const DEFAULT_MAX_DEPTH: u32 = 128;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ParseOptions {
    /// Maps and lists nested deeper than this are skipped and reported.
    pub max_depth: u32,
}

impl ParseOptions {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// The result of parsing one document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parse {
    text: Box<str>,
    green: Arc<GreenMultiValue>,
    diagnostics: Box<[Diagnostic]>,
}

impl Parse {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The root slot. It spans the whole text.
    pub fn green(&self) -> &Arc<GreenMultiValue> {
        &self.green
    }

    /// Diagnostics ordered by start offset.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// A fresh red view of the tree.
    pub fn syntax(&self) -> SyntaxTree {
        SyntaxTree::new(self.green.clone())
    }

    /// Indented `KIND@range` dump. Leaves show their text, and empty
    /// background runs are left out.
    pub fn debug_tree(&self) -> String {
        let tree = self.syntax();
        let mut buf = String::new();
        let mut indent = 0;

        let mut preorder = tree.preorder();
        while let Some(event) = preorder.next() {
            match event {
                WalkEvent::Enter(element) => {
                    if element.kind() == SyntaxKind::BACKGROUND_LIST && element.child_count() == 0 {
                        preorder.skip_subtree();
                        continue;
                    }

                    _ = write!(buf, "{:indent$}{element:?}", "");
                    if element.is_leaf() {
                        _ = write!(buf, " {:?}", &self.text[element.range()]);
                    }
                    buf.push('\n');
                    indent += 2;
                }
                WalkEvent::Leave(_) => indent -= 2,
            }
        }

        buf
    }
}

pub fn parse(text: &str) -> Parse {
    parse_with(text, ParseOptions::default())
}

/// # Panics
///
/// Panics if `text` is longer than `u32::MAX` bytes.
pub fn parse_with(text: &str, options: ParseOptions) -> Parse {
    let mut parser = parser::Parser::new(text, options);
    let green = grammar::root(&mut parser);
    let diagnostics = parser.finish();

    tracing::debug!(len = text.len(), diagnostics = diagnostics.len(), "parsed");
    Parse { text: text.into(), green, diagnostics: diagnostics.into() }
}

//! Incremental storage for documents and their parses.

use camino::Utf8PathBuf;
pub use line_index::{LineCol, LineIndex};
pub use sylva_errors::Diagnostic;
use sylva_parse::{Parse, ParseOptions};

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
    pub options: ParseOptions,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref))]
    pub fn parse(self, db: &dyn salsa::Database) -> Parse {
        sylva_parse::parse_with(self.text(db), self.options(db))
    }

    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

/// Diagnostics of `file`, ordered by start offset.
#[salsa::tracked(returns(ref))]
pub fn check_file(db: &dyn salsa::Database, file: File) -> Vec<Diagnostic> {
    file.parse(db).diagnostics().to_vec()
}

#[salsa::db]
#[derive(Clone, Default)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {}

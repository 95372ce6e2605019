//! Lossless syntax trees for JSON-like documents.
//!
//! The green layer is immutable, shareable and position-independent. The red
//! layer adds parent links and absolute positions on demand, materializing
//! each record at most once even when several threads navigate together.

/// Position-independent tree nodes.
pub mod green;
mod lazy;
mod maybe_dangling;
mod red;
mod spanned;
mod syntax_kind;
mod syntax_set;

/// Race-to-initialize memoization used by the red layer.
pub use lazy::{LazyList, LazyValue};
/// Red handles and traversal.
pub use red::{
    BackgroundListParent, LeafAtOffset, MultiValueParent, Preorder, PunctuationParent,
    RedBackground, RedBackgroundList, RedBooleanLiteral, RedElement, RedErrorString,
    RedIntegerLiteral, RedKeyValue, RedList, RedMap, RedMissingValue, RedMultiValue,
    RedPunctuation, RedStringLiteral, RedUndefinedValue, RedUnknownSymbol, RedValue,
    RedValueWithBackground, SyntaxTree, WalkEvent,
};
/// Lists that know the offset of every element.
pub use spanned::{Interleaved, SeparatedSpannedList, SpannedList, TextLength};
/// Element kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use text_size::{TextRange, TextSize};

//! Syntax-tree access for token extraction.
//!
//! The extractor only needs a handful of operations on a node, captured by
//! [`SyntaxNode`]. The tree-sitter implementation lives in [`parser`].

pub mod extractor;
pub mod parser;

pub use extractor::{TokenExtractor, MAX_ANCESTOR_HOPS};
pub use parser::{ParsedFile, Parser, SourceNode};

use crate::languages::NodeClass;

/// Minimal view of a syntax node.
pub trait SyntaxNode: Clone {
    fn parent(&self) -> Option<Self>;

    fn class(&self) -> NodeClass;

    /// Children in source order.
    fn children(&self) -> Vec<Self>;

    /// Textual value for string literals, `None` for anything else.
    fn string_value(&self) -> Option<String>;

    /// Node identity (not structural equality).
    fn is_same(&self, other: &Self) -> bool;
}

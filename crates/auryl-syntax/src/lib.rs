//! # Auryl Syntax
//!
//! The raw syntax tree produced by the Auryl parser.
//!
//! Every node carries the label of the grammar rule that produced it and an
//! ordered list of children, each either a nested node or a plain text token
//! (identifier, dotted path or type name). Name resolution consumes this tree
//! without knowing anything about the surface syntax.

mod node;
mod span;

pub use node::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use span::Span;

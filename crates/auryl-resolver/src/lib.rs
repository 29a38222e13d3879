//! Scope resolution for the Auryl component language.
//!
//! Turns a raw syntax tree into nodes of a [`ComponentTree`]:
//! - entering (and reusing) the package chain named by `package`
//! - attaching components, declarations and runnables in source order
//! - resolving type names and dotted references with lexical scoping
//!
//! Several files can be resolved into the same tree one after another.

mod build;
mod error;
mod scope;

pub use build::TreeBuilder;
pub use error::ResolveError;
pub use scope::ScopeCursor;

use auryl_syntax::SyntaxNode;
use auryl_tree::ComponentTree;

/// Resolve one file's syntax tree into `tree`.
///
/// Each file starts again at the root. On error the nodes attached so far
/// stay in the tree.
pub fn resolve(tree: &mut ComponentTree, file: &SyntaxNode) -> Result<(), ResolveError> {
    TreeBuilder::new(ScopeCursor::new(tree)).build(file)
}

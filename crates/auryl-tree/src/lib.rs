//! # Auryl Tree
//!
//! The resolved component tree of the Auryl component language.
//!
//! All nodes live in one arena owned by [`ComponentTree`]. Each node has a
//! name that is unique among its siblings, a non-owning parent handle and
//! its children in declaration order, indexed by name. Links that are not
//! ownership, such as a runnable's trigger pointing at an input, are
//! [`Ref`]s validated when they are created.
//!
//! ## Example
//!
//! ```
//! use auryl_tree::{ComponentTree, NodeKind};
//!
//! let mut tree = ComponentTree::default();
//! let bar = tree.new_package("bar");
//! tree.add_child(tree.root(), bar).unwrap();
//! let foo = tree.new_component("foo");
//! tree.add_child(bar, foo).unwrap();
//!
//! let found = tree.lookup(tree.root(), &["bar", "foo"]).unwrap();
//! assert_eq!(tree.kind(found), &NodeKind::Component);
//! assert!(tree.lookup(found, &["in"]).is_some());
//! ```

mod error;
mod node;
mod printer;
mod reference;
mod tree;
mod visit;

pub use error::TreeError;
pub use node::{
    ComplexRef, Datum, Input, InputTrigger, Node, NodeId, NodeKind, Output, Primitive, Runnable,
    RunnableOutput, Trigger, Type, DATA, INPUTS, OUTPUTS, RUNNABLES,
};
pub use printer::TreePrinter;
pub use reference::{Ref, RefTarget};
pub use tree::ComponentTree;
pub use visit::Visitor;

//! Non-owning links between tree nodes.

use std::fmt;
use std::marker::PhantomData;

use smol_str::SmolStr;

use crate::error::TreeError;
use crate::node::{Input, NodeId, NodeKind, Output};
use crate::tree::ComponentTree;

/// A node payload a [`Ref`] can point at.
pub trait RefTarget {
    /// Kind description used in diagnostics.
    const KIND: &'static str;

    /// The payload of `kind`, if it is of this type.
    fn project(kind: &NodeKind) -> Option<&Self>;
}

impl RefTarget for Input {
    const KIND: &'static str = "an input";

    fn project(kind: &NodeKind) -> Option<&Self> {
        match kind {
            NodeKind::Input(input) => Some(input),
            _ => None,
        }
    }
}

impl RefTarget for Output {
    const KIND: &'static str = "an output";

    fn project(kind: &NodeKind) -> Option<&Self> {
        match kind {
            NodeKind::Output(output) => Some(output),
            _ => None,
        }
    }
}

/// A resolved link to a node that is not a child of the holder.
///
/// The target is checked when the reference is created, so a `Ref` never
/// dangles. References to nodes declared later in the source cannot be
/// created; there is no deferred resolution.
pub struct Ref<T> {
    path: SmolStr,
    target: NodeId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: RefTarget> Ref<T> {
    /// Link to `target`, remembering the dotted `path` it was written as.
    pub fn new(
        tree: &ComponentTree,
        path: impl Into<SmolStr>,
        target: NodeId,
    ) -> Result<Self, TreeError> {
        let kind = tree.kind(target);
        if T::project(kind).is_none() {
            return Err(TreeError::KindMismatch {
                name: tree.qualified_name(target).into(),
                expected: T::KIND,
                found: kind.describe(),
            });
        }
        Ok(Self {
            path: path.into(),
            target,
            _marker: PhantomData,
        })
    }

    /// The payload of the referenced node.
    pub fn get<'t>(&self, tree: &'t ComponentTree) -> Option<&'t T> {
        T::project(tree.kind(self.target))
    }
}

impl<T> Ref<T> {
    /// The reference as written in source.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn target(&self) -> NodeId {
        self.target
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            target: self.target,
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.path == other.path
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref")
            .field("path", &self.path)
            .field("target", &self.target)
            .finish()
    }
}

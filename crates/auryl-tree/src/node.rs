//! Tree nodes and their kind-specific payloads.

use std::fmt;
use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use la_arena::Idx;
use rustc_hash::FxHasher;
use smol_str::SmolStr;

use crate::reference::Ref;

/// Handle of a node inside a [`ComponentTree`](crate::ComponentTree).
pub type NodeId = Idx<Node>;

/// Children in insertion order, indexed by name.
pub(crate) type ChildMap = IndexMap<SmolStr, NodeId, BuildHasherDefault<FxHasher>>;

/// Name of the inputs container every component owns.
pub const INPUTS: &str = "in";
/// Name of the outputs container every component owns.
pub const OUTPUTS: &str = "out";
/// Name of the data container every component owns.
pub const DATA: &str = "data";
/// Name of the runnables container created by a `run { ... }` block.
pub const RUNNABLES: &str = "run";

/// A node of the component tree.
#[derive(Debug)]
pub struct Node {
    pub(crate) name: SmolStr,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: ChildMap,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(name: SmolStr, kind: NodeKind) -> Self {
        Self {
            name,
            parent: None,
            children: ChildMap::default(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node this one is attached to, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Children in declaration order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator + '_ {
        self.children.values().copied()
    }

    /// Direct child with the given name.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }
}

/// What a node represents.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An untyped node with no domain meaning.
    Plain,
    /// The entry point of a tree.
    Root,
    Package,
    Component,
    /// The `in` container of a component.
    Inputs,
    /// The `out` container of a component.
    Outputs,
    /// The `data` container of a component.
    Data,
    Input(Input),
    Output(Output),
    Datum(Datum),
    /// The `run` container of a component.
    Runnables,
    Runnable(Runnable),
}

impl NodeKind {
    /// Human readable kind, for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            NodeKind::Plain => "a node",
            NodeKind::Root => "the root",
            NodeKind::Package => "a package",
            NodeKind::Component => "a component",
            NodeKind::Inputs => "an inputs container",
            NodeKind::Outputs => "an outputs container",
            NodeKind::Data => "a data container",
            NodeKind::Input(_) => "an input",
            NodeKind::Output(_) => "an output",
            NodeKind::Datum(_) => "a datum",
            NodeKind::Runnables => "a runnables container",
            NodeKind::Runnable(_) => "a runnable",
        }
    }
}

// ============================================================================
// Types
// ============================================================================

/// Built-in types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
}

impl Primitive {
    /// All primitives, in declaration order.
    pub const ALL: [Primitive; 1] = [Primitive::Int];

    /// The name used for this primitive in source.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Int => "int",
        }
    }
}

/// A user-defined type referenced by name, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplexRef {
    pub ident: SmolStr,
}

/// The type of an input, output or datum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(Primitive),
    Complex(ComplexRef),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(primitive) => f.write_str(primitive.name()),
            Type::Complex(complex) => f.write_str(&complex.ident),
        }
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// A value a component receives.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub ty: Type,
}

/// A value a component produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub ty: Type,
}

/// Internal state of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct Datum {
    pub ty: Type,
}

/// An executable unit of a component.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Runnable {
    /// Conditions that make the runnable execute, in declaration order.
    pub triggers: Vec<Trigger>,
    /// Outputs the runnable writes, in declaration order.
    pub outputs: Vec<RunnableOutput>,
}

/// A condition under which a runnable fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Fires when the referenced input receives a value.
    Input(InputTrigger),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputTrigger {
    pub input: Ref<Input>,
}

/// An output a runnable writes to.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnableOutput {
    pub output: Ref<Output>,
}

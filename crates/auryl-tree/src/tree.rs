//! The component tree and its node hierarchy operations.

use la_arena::Arena;
use smol_str::SmolStr;

use crate::error::TreeError;
use crate::node::{
    Datum, Input, Node, NodeId, NodeKind, Output, Runnable, Type, DATA, INPUTS, OUTPUTS,
    RUNNABLES,
};

/// Owner of every node of one component tree.
///
/// Nodes are allocated detached and become part of the hierarchy through
/// [`ComponentTree::add_child`]. A node is owned by the arena; its parent
/// link is a plain handle used for traversal only.
#[derive(Debug)]
pub struct ComponentTree {
    nodes: Arena<Node>,
    root: NodeId,
}

impl ComponentTree {
    /// Name given to the root when none is configured.
    pub const DEFAULT_ROOT_NAME: &'static str = "Root";

    /// Create a tree holding only a root node.
    pub fn new(root_name: impl Into<SmolStr>) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::new(root_name.into(), NodeKind::Root));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `id` is this tree's root.
    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id].name
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Children of `id` in declaration order.
    pub fn children(&self, id: NodeId) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.nodes[id].children()
    }

    /// Direct child of `parent` named `name`.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[parent].child(name)
    }

    /// Number of nodes allocated, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mutable access to a runnable's triggers and outputs.
    pub fn runnable_mut(&mut self, id: NodeId) -> Option<&mut Runnable> {
        match &mut self.nodes[id].kind {
            NodeKind::Runnable(runnable) => Some(runnable),
            _ => None,
        }
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    fn alloc(&mut self, name: impl Into<SmolStr>, kind: NodeKind) -> NodeId {
        self.nodes.alloc(Node::new(name.into(), kind))
    }

    /// A detached node without domain meaning.
    pub fn new_node(&mut self, name: impl Into<SmolStr>) -> NodeId {
        self.alloc(name, NodeKind::Plain)
    }

    pub fn new_package(&mut self, name: impl Into<SmolStr>) -> NodeId {
        self.alloc(name, NodeKind::Package)
    }

    /// A detached component, already holding its `in`, `out` and `data` containers.
    pub fn new_component(&mut self, name: impl Into<SmolStr>) -> NodeId {
        let component = self.alloc(name, NodeKind::Component);
        for (container, kind) in [
            (INPUTS, NodeKind::Inputs),
            (OUTPUTS, NodeKind::Outputs),
            (DATA, NodeKind::Data),
        ] {
            let child = self.alloc(container, kind);
            self.link(component, child);
        }
        component
    }

    pub fn new_input(&mut self, name: impl Into<SmolStr>, ty: Type) -> NodeId {
        self.alloc(name, NodeKind::Input(Input { ty }))
    }

    pub fn new_output(&mut self, name: impl Into<SmolStr>, ty: Type) -> NodeId {
        self.alloc(name, NodeKind::Output(Output { ty }))
    }

    pub fn new_datum(&mut self, name: impl Into<SmolStr>, ty: Type) -> NodeId {
        self.alloc(name, NodeKind::Datum(Datum { ty }))
    }

    /// A detached `run` container.
    pub fn new_runnables(&mut self) -> NodeId {
        self.alloc(RUNNABLES, NodeKind::Runnables)
    }

    pub fn new_runnable(&mut self, name: impl Into<SmolStr>) -> NodeId {
        self.alloc(name, NodeKind::Runnable(Runnable::default()))
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Attach `child` under `parent` and index it by name.
    ///
    /// Returns `child` for chaining.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, TreeError> {
        if let Some(existing) = self.child(parent, self.name(child)) {
            let err = if existing == child {
                TreeError::AlreadyChild {
                    parent: self.qualified_name(parent).into(),
                    child: self.name(child).into(),
                }
            } else {
                TreeError::NameTaken {
                    parent: self.qualified_name(parent).into(),
                    child: self.name(child).into(),
                }
            };
            return Err(err);
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) || self.is_root(child) {
            return Err(TreeError::WouldCycle {
                parent: self.qualified_name(parent).into(),
                child: self.name(child).into(),
            });
        }
        if let Some(current) = self.parent(child) {
            return Err(TreeError::AlreadyAttached {
                parent: self.qualified_name(current).into(),
                child: self.name(child).into(),
            });
        }

        self.link(parent, child);
        Ok(child)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        let name = self.nodes[child].name.clone();
        self.nodes[parent].children.insert(name, child);
        self.nodes[child].parent = Some(parent);
    }

    /// Detach and return the child named `name`.
    ///
    /// The remaining children keep their order. The detached node loses its
    /// parent link and may be attached elsewhere.
    pub fn remove_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        let Some(child) = self.nodes[parent].children.shift_remove(name) else {
            return Err(TreeError::NoSuchChild {
                parent: self.qualified_name(parent).into(),
                child: name.into(),
            });
        };
        self.nodes[child].parent = None;
        Ok(child)
    }

    /// `id` followed by its parent, grandparent and so on.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), |&node| self.parent(node))
    }

    /// The root `id` is attached to, or `None` for a detached subtree.
    pub fn get_root(&self, id: NodeId) -> Option<NodeId> {
        let top = self.ancestors(id).last()?;
        self.is_root(top).then_some(top)
    }

    /// Resolve `path` below `from`, one segment per level.
    ///
    /// Lookup only descends; it never consults `from`'s ancestors. An empty
    /// path resolves to `from`. When `from` is the root, a leading segment
    /// equal to the root's own name is skipped, so fully qualified paths
    /// such as `Root.bar.biz` resolve.
    pub fn lookup<S: AsRef<str>>(&self, from: NodeId, path: &[S]) -> Option<NodeId> {
        let segments = match path.split_first() {
            Some((first, rest)) if self.is_root(from) && first.as_ref() == self.name(from) => rest,
            _ => path,
        };
        segments
            .iter()
            .try_fold(from, |node, segment| self.child(node, segment.as_ref()))
    }

    /// Dotted name of `id` from the top of its tree.
    ///
    /// The root's own name is left out unless `id` is the root itself.
    pub fn qualified_name(&self, id: NodeId) -> String {
        if self.is_root(id) {
            return self.name(id).to_string();
        }
        let mut names: Vec<&str> = self
            .ancestors(id)
            .filter(|&node| !self.is_root(node))
            .map(|node| self.name(node))
            .collect();
        names.reverse();
        names.join(".")
    }
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROOT_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Primitive;

    const INT: Type = Type::Primitive(Primitive::Int);

    #[test]
    fn test_parent_child() {
        let mut tree = ComponentTree::new("Root");
        let parent = tree.new_node("Parent");
        let child = tree.new_node("Child");
        assert_eq!(tree.add_child(parent, child), Ok(child));

        assert_eq!(tree.parent(child), Some(parent));
        assert_eq!(tree.lookup(parent, &["Child"]), Some(child));
        assert_eq!(tree.get_root(child), None);

        tree.add_child(tree.root(), parent).unwrap();
        assert_eq!(tree.get_root(child), Some(tree.root()));
        assert_eq!(tree.get_root(tree.root()), Some(tree.root()));
        assert!(tree.is_root(tree.root()));
        assert!(!tree.is_root(parent));
    }

    #[test]
    fn test_children_keep_declaration_order() {
        let mut tree = ComponentTree::default();
        let parent = tree.new_node("p");
        for name in ["z", "a", "m"] {
            let child = tree.new_node(name);
            tree.add_child(parent, child).unwrap();
        }
        let names: Vec<_> = tree.children(parent).map(|c| tree.name(c)).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_duplicate_children() {
        let mut tree = ComponentTree::default();
        let pkg = tree.new_package("bar");
        tree.add_child(tree.root(), pkg).unwrap();
        let first = tree.new_component("foo");
        let second = tree.new_component("foo");
        tree.add_child(pkg, first).unwrap();

        assert_eq!(
            tree.add_child(pkg, first),
            Err(TreeError::AlreadyChild {
                parent: "bar".into(),
                child: "foo".into(),
            })
        );
        assert_eq!(
            tree.add_child(pkg, second),
            Err(TreeError::NameTaken {
                parent: "bar".into(),
                child: "foo".into(),
            })
        );
        assert_eq!(tree.children(pkg).count(), 1);
    }

    #[test]
    fn test_reparenting_is_rejected() {
        let mut tree = ComponentTree::default();
        let a = tree.new_node("a");
        let b = tree.new_node("b");
        let c = tree.new_node("c");
        tree.add_child(a, c).unwrap();

        assert!(matches!(
            tree.add_child(b, c),
            Err(TreeError::AlreadyAttached { .. })
        ));
        assert_eq!(tree.parent(c), Some(a));
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut tree = ComponentTree::default();
        let a = tree.new_node("a");
        let b = tree.new_node("b");
        tree.add_child(a, b).unwrap();

        assert!(matches!(
            tree.add_child(b, a),
            Err(TreeError::WouldCycle { .. })
        ));
        let root = tree.root();
        assert!(matches!(
            tree.add_child(b, root),
            Err(TreeError::WouldCycle { .. })
        ));
    }

    #[test]
    fn test_remove_child() {
        let mut tree = ComponentTree::default();
        let parent = tree.new_node("p");
        let (x, y, z) = (tree.new_node("x"), tree.new_node("y"), tree.new_node("z"));
        for child in [x, y, z] {
            tree.add_child(parent, child).unwrap();
        }

        assert_eq!(tree.remove_child(parent, "y"), Ok(y));
        assert_eq!(tree.parent(y), None);
        assert_eq!(tree.lookup(parent, &["y"]), None);
        assert_eq!(tree.lookup(parent, &["z"]), Some(z));
        assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![x, z]);

        assert_eq!(
            tree.remove_child(parent, "y"),
            Err(TreeError::NoSuchChild {
                parent: "p".into(),
                child: "y".into(),
            })
        );

        let other = tree.new_node("other");
        assert_eq!(tree.add_child(other, y), Ok(y));
    }

    #[test]
    fn test_lookup_only_descends() {
        let mut tree = ComponentTree::default();
        let a = tree.new_node("a");
        let b = tree.new_node("b");
        let c = tree.new_node("c");
        tree.add_child(a, b).unwrap();
        tree.add_child(b, c).unwrap();

        assert_eq!(tree.lookup(a, &["a"]), None);
        assert_eq!(tree.lookup(a, &["b", "c"]), Some(c));
        assert_eq!(tree.lookup(a, &["b", "x"]), None);
        assert_eq!(tree.lookup(c, &["b"]), None);
        assert_eq!(tree.lookup::<&str>(b, &[]), Some(b));
    }

    #[test]
    fn test_root_absorbs_own_name() {
        let mut tree = ComponentTree::new("Root");
        let bar = tree.new_package("bar");
        tree.add_child(tree.root(), bar).unwrap();
        let root = tree.root();

        assert_eq!(tree.lookup(root, &["Root"]), Some(root));
        assert_eq!(tree.lookup(root, &["Root", "bar"]), Some(bar));
        assert_eq!(tree.lookup(root, &["bar"]), Some(bar));
        // Only the first segment is special.
        assert_eq!(tree.lookup(root, &["Root", "Root"]), None);
        assert_eq!(tree.lookup(bar, &["Root"]), None);
    }

    #[test]
    fn test_component_scaffolding() {
        let mut tree = ComponentTree::default();
        let comp = tree.new_component("foo");

        let names: Vec<_> = tree.children(comp).map(|c| tree.name(c)).collect();
        assert_eq!(names, vec!["in", "out", "data"]);

        let inputs = tree.child(comp, INPUTS).unwrap();
        assert_eq!(tree.kind(inputs), &NodeKind::Inputs);
        assert_eq!(tree.parent(inputs), Some(comp));
        assert_eq!(tree.kind(tree.child(comp, OUTPUTS).unwrap()), &NodeKind::Outputs);
        assert_eq!(tree.kind(tree.child(comp, DATA).unwrap()), &NodeKind::Data);
        assert_eq!(tree.children(inputs).count(), 0);
    }

    #[test]
    fn test_qualified_name() {
        let mut tree = ComponentTree::default();
        let bar = tree.new_package("bar");
        let comp = tree.new_component("foo");
        tree.add_child(tree.root(), bar).unwrap();
        tree.add_child(bar, comp).unwrap();
        let a = tree.new_input("a", INT);
        let inputs = tree.child(comp, INPUTS).unwrap();
        tree.add_child(inputs, a).unwrap();

        assert_eq!(tree.qualified_name(a), "bar.foo.in.a");
        assert_eq!(tree.qualified_name(tree.root()), "Root");

        let loose = tree.new_node("loose");
        assert_eq!(tree.qualified_name(loose), "loose");
    }

    #[test]
    fn test_runnable_mut() {
        let mut tree = ComponentTree::default();
        let run = tree.new_runnable("process");
        let pkg = tree.new_package("bar");

        assert_eq!(tree.runnable_mut(run).map(|r| r.triggers.len()), Some(0));
        assert!(tree.runnable_mut(pkg).is_none());
    }
}

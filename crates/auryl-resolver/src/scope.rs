//! The scope cursor: where in the component tree declarations land.

use auryl_tree::{ComponentTree, NodeId, NodeKind, Primitive, Type};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::error::ResolveError;

/// Tracks the current scope while a file is resolved.
///
/// Starts at the root. Packages are entered once per file and never left;
/// components and runnables are pushed and popped around their bodies.
pub struct ScopeCursor<'t> {
    tree: &'t mut ComponentTree,
    current: NodeId,
    primitives: FxHashMap<SmolStr, Primitive>,
}

impl<'t> ScopeCursor<'t> {
    pub fn new(tree: &'t mut ComponentTree) -> Self {
        let current = tree.root();
        let primitives = Primitive::ALL
            .iter()
            .map(|&primitive| (SmolStr::new_inline(primitive.name()), primitive))
            .collect();
        Self {
            tree,
            current,
            primitives,
        }
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn tree(&self) -> &ComponentTree {
        self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        self.tree
    }

    /// Descend through `path`, creating missing packages on the way.
    ///
    /// Existing packages are reused, so several files can contribute to
    /// the same package.
    pub fn enter_package<S: AsRef<str>>(&mut self, path: &[S]) -> Result<NodeId, ResolveError> {
        for segment in path {
            let segment = segment.as_ref();
            self.current = match self.tree.child(self.current, segment) {
                Some(existing) => {
                    if *self.tree.kind(existing) != NodeKind::Package {
                        return Err(ResolveError::NotAPackage {
                            name: self.tree.qualified_name(existing).into(),
                            found: self.tree.kind(existing).describe(),
                            span: None,
                        });
                    }
                    trace!("reusing package {}", segment);
                    existing
                }
                None => {
                    debug!("creating package {}", segment);
                    let package = self.tree.new_package(segment);
                    self.tree.add_child(self.current, package)?
                }
            };
        }
        Ok(self.current)
    }

    /// Attach `node` to the current scope and make it the current scope.
    pub fn push_scope(&mut self, node: NodeId) -> Result<(), ResolveError> {
        self.current = self.tree.add_child(self.current, node)?;
        trace!("entered scope {}", self.tree.qualified_name(self.current));
        Ok(())
    }

    /// Return to the enclosing scope.
    pub fn pop_scope(&mut self) -> Result<NodeId, ResolveError> {
        let Some(parent) = self.tree.parent(self.current) else {
            return Err(ResolveError::Invariant {
                message: format!(
                    "cannot leave scope `{}`: it has no parent",
                    self.tree.qualified_name(self.current)
                ),
                span: None,
            });
        };
        trace!("left scope {}", self.tree.qualified_name(self.current));
        self.current = parent;
        Ok(parent)
    }

    /// Resolve a type name written in a declaration.
    ///
    /// Only primitives are known; user-defined types are not supported yet.
    pub fn resolve_type(&self, name: &str) -> Result<Type, ResolveError> {
        self.primitives
            .get(name)
            .map(|&primitive| Type::Primitive(primitive))
            .ok_or_else(|| ResolveError::TypeNotFound {
                name: name.into(),
                span: None,
            })
    }

    /// Resolve a dotted path with lexical scoping.
    ///
    /// The first segment is searched in the current scope, then in each
    /// enclosing scope up to the root. The rest of the path must resolve
    /// below the scope where the first segment was found.
    pub fn lookup_qualified<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        let first = path.first()?;
        let scope = self
            .tree
            .ancestors(self.current)
            .find(|&scope| self.tree.lookup(scope, std::slice::from_ref(first)).is_some())?;
        self.tree.lookup(scope, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auryl_tree::{TreeError, INPUTS};

    #[test]
    fn test_enter_package_creates_and_reuses() {
        let mut tree = ComponentTree::default();

        let biz = ScopeCursor::new(&mut tree)
            .enter_package(&["bar", "biz"])
            .unwrap();
        let again = ScopeCursor::new(&mut tree)
            .enter_package(&["bar", "biz"])
            .unwrap();
        let sibling = ScopeCursor::new(&mut tree)
            .enter_package(&["bar", "baz"])
            .unwrap();

        assert_eq!(biz, again);
        assert_ne!(biz, sibling);
        let bar = tree.lookup(tree.root(), &["bar"]).unwrap();
        assert_eq!(tree.children(bar).count(), 2);
        assert_eq!(tree.kind(bar), &NodeKind::Package);
        assert_eq!(tree.parent(sibling), Some(bar));
    }

    #[test]
    fn test_enter_package_through_component_fails() {
        let mut tree = ComponentTree::default();
        let foo = tree.new_component("foo");
        tree.add_child(tree.root(), foo).unwrap();

        let err = ScopeCursor::new(&mut tree)
            .enter_package(&["foo", "inner"])
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::NotAPackage {
                name: "foo".into(),
                found: "a component",
                span: None,
            }
        );
    }

    #[test]
    fn test_push_and_pop() {
        let mut tree = ComponentTree::default();
        let mut scope = ScopeCursor::new(&mut tree);
        let root = scope.current();

        let comp = scope.tree_mut().new_component("foo");
        scope.push_scope(comp).unwrap();
        assert_eq!(scope.current(), comp);
        assert_eq!(scope.tree().parent(comp), Some(root));

        assert_eq!(scope.pop_scope(), Ok(root));
        assert!(scope.pop_scope().unwrap_err().is_internal());
        assert_eq!(scope.current(), root);
    }

    #[test]
    fn test_push_duplicate_scope() {
        let mut tree = ComponentTree::default();
        let mut scope = ScopeCursor::new(&mut tree);
        let first = scope.tree_mut().new_component("foo");
        let second = scope.tree_mut().new_component("foo");
        scope.push_scope(first).unwrap();
        scope.pop_scope().unwrap();

        let err = scope.push_scope(second).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Tree {
                source: TreeError::NameTaken { .. },
                ..
            }
        ));
        assert_eq!(scope.current(), scope.tree().root());
    }

    #[test]
    fn test_resolve_type() {
        let mut tree = ComponentTree::default();
        let scope = ScopeCursor::new(&mut tree);

        assert_eq!(scope.resolve_type("int"), Ok(Type::Primitive(Primitive::Int)));
        assert_eq!(
            scope.resolve_type("bogustype"),
            Err(ResolveError::TypeNotFound {
                name: "bogustype".into(),
                span: None,
            })
        );
    }

    #[test]
    fn test_lookup_walks_outward() {
        let mut tree = ComponentTree::default();
        let comp = tree.new_component("foo");
        tree.add_child(tree.root(), comp).unwrap();
        let a = tree.new_input("a", Type::Primitive(Primitive::Int));
        let inputs = tree.child(comp, INPUTS).unwrap();
        tree.add_child(inputs, a).unwrap();

        let mut scope = ScopeCursor::new(&mut tree);
        let runnables = scope.tree_mut().new_runnables();
        let process = scope.tree_mut().new_runnable("process");
        scope.current = comp;
        scope.push_scope(runnables).unwrap();
        scope.push_scope(process).unwrap();

        assert_eq!(scope.lookup_qualified(&["in", "a"]), Some(a));
        assert_eq!(scope.lookup_qualified(&["foo", "in", "a"]), Some(a));
        assert_eq!(scope.lookup_qualified(&["Root", "foo", "in", "a"]), Some(a));
        // Once `in` is found, the rest must resolve below it.
        assert_eq!(scope.lookup_qualified(&["in", "b"]), None);
        assert_eq!(scope.lookup_qualified(&["nowhere"]), None);
        assert_eq!(scope.lookup_qualified::<&str>(&[]), None);
    }
}

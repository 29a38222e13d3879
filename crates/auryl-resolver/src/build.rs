//! Builds the component tree from a raw syntax tree.

use auryl_syntax::{Span, SyntaxKind, SyntaxNode, SyntaxToken};
use auryl_tree::{
    Input, InputTrigger, Output, Ref, RefTarget, Runnable, RunnableOutput, Trigger, DATA, INPUTS,
    OUTPUTS,
};
use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::scope::ScopeCursor;

/// Depth-first walker over one file's syntax tree.
///
/// Declarations are resolved in source order, so a reference can only
/// name something declared earlier.
pub struct TreeBuilder<'t> {
    scope: ScopeCursor<'t>,
}

impl<'t> TreeBuilder<'t> {
    pub fn new(scope: ScopeCursor<'t>) -> Self {
        Self { scope }
    }

    /// Walk `file`, stopping at the first error.
    pub fn build(mut self, file: &SyntaxNode) -> Result<(), ResolveError> {
        self.visit(file)
    }

    fn visit(&mut self, node: &SyntaxNode) -> Result<(), ResolveError> {
        trace!("visiting {}", node.kind);
        match node.kind {
            SyntaxKind::File => self.visit_children(node),
            SyntaxKind::PackageDecl => self.package_decl(node),
            SyntaxKind::Component => self.component(node),
            SyntaxKind::Input | SyntaxKind::Output | SyntaxKind::Datum => self.declaration(node),
            SyntaxKind::Runnables => self.runnables(node),
            SyntaxKind::Run => self.run(node),
            SyntaxKind::RunTrigger => {
                let input = self.reference::<Input>(node)?;
                self.current_runnable(node.span)?
                    .triggers
                    .push(Trigger::Input(InputTrigger { input }));
                Ok(())
            }
            SyntaxKind::RunOutput => {
                let output = self.reference::<Output>(node)?;
                self.current_runnable(node.span)?
                    .outputs
                    .push(RunnableOutput { output });
                Ok(())
            }
        }
    }

    fn visit_children(&mut self, node: &SyntaxNode) -> Result<(), ResolveError> {
        for child in node.nodes() {
            self.visit(child)?;
        }
        Ok(())
    }

    fn package_decl(&mut self, node: &SyntaxNode) -> Result<(), ResolveError> {
        let path = token(node, 0, "a package name")?;
        let package = self
            .scope
            .enter_package(&path.segments())
            .map_err(|err| err.with_span(path.span))?;
        debug!("in package {}", self.scope.tree().qualified_name(package));
        Ok(())
    }

    fn component(&mut self, node: &SyntaxNode) -> Result<(), ResolveError> {
        let name = token(node, 0, "a component name")?;
        let component = self.scope.tree_mut().new_component(name.text.clone());
        self.enter(component, name.span)?;
        debug!("component {}", self.scope.tree().qualified_name(component));

        self.visit_children(node)?;
        self.leave(node.span)
    }

    fn declaration(&mut self, node: &SyntaxNode) -> Result<(), ResolveError> {
        let name = token(node, 0, "a name")?;
        let ty_name = token(node, 1, "a type")?;
        let container_name = match node.kind {
            SyntaxKind::Input => INPUTS,
            SyntaxKind::Output => OUTPUTS,
            _ => DATA,
        };

        let current = self.scope.current();
        let Some(container) = self.scope.tree().child(current, container_name) else {
            return Err(ResolveError::Invariant {
                message: format!(
                    "`{}` has no `{}` container",
                    self.scope.tree().qualified_name(current),
                    container_name
                ),
                span: Some(node.span),
            });
        };
        let ty = self
            .scope
            .resolve_type(&ty_name.text)
            .map_err(|err| err.with_span(ty_name.span))?;

        let tree = self.scope.tree_mut();
        let leaf = match node.kind {
            SyntaxKind::Input => tree.new_input(name.text.clone(), ty),
            SyntaxKind::Output => tree.new_output(name.text.clone(), ty),
            _ => tree.new_datum(name.text.clone(), ty),
        };
        tree.add_child(container, leaf)
            .map_err(|err| ResolveError::from(err).with_span(name.span))?;
        trace!("declared {}", tree.qualified_name(leaf));
        Ok(())
    }

    fn runnables(&mut self, node: &SyntaxNode) -> Result<(), ResolveError> {
        let runnables = self.scope.tree_mut().new_runnables();
        self.enter(runnables, node.span)?;
        self.visit_children(node)?;
        self.leave(node.span)
    }

    fn run(&mut self, node: &SyntaxNode) -> Result<(), ResolveError> {
        let name = token(node, 0, "a runnable name")?;
        let runnable = self.scope.tree_mut().new_runnable(name.text.clone());
        self.enter(runnable, name.span)?;
        self.visit_children(node)?;
        self.leave(node.span)
    }

    /// Resolve the clause's dotted path to a node of kind `T`.
    fn reference<T: RefTarget>(&self, node: &SyntaxNode) -> Result<Ref<T>, ResolveError> {
        let path = token(node, 0, "a reference")?;
        let Some(target) = self.scope.lookup_qualified(&path.segments()) else {
            return Err(ResolveError::UnresolvedReference {
                path: path.text.clone(),
                span: Some(path.span),
            });
        };

        let tree = self.scope.tree();
        let kind = tree.kind(target);
        if T::project(kind).is_none() {
            return Err(ResolveError::WrongReferenceKind {
                path: path.text.clone(),
                expected: T::KIND,
                found: kind.describe(),
                span: Some(path.span),
            });
        }
        trace!("{} resolved to {}", path.text, tree.qualified_name(target));
        Ref::new(tree, path.text.clone(), target)
            .map_err(|err| ResolveError::from(err).with_span(path.span))
    }

    fn current_runnable(&mut self, span: Span) -> Result<&mut Runnable, ResolveError> {
        let current = self.scope.current();
        let found = self.scope.tree().kind(current).describe();
        self.scope
            .tree_mut()
            .runnable_mut(current)
            .ok_or_else(|| ResolveError::Invariant {
                message: format!("run clause inside {found}"),
                span: Some(span),
            })
    }

    fn enter(&mut self, node: auryl_tree::NodeId, span: Span) -> Result<(), ResolveError> {
        self.scope
            .push_scope(node)
            .map_err(|err| err.with_span(span))
    }

    fn leave(&mut self, span: Span) -> Result<(), ResolveError> {
        self.scope.pop_scope().map(drop).map_err(|err| err.with_span(span))
    }
}

fn token<'n>(
    node: &'n SyntaxNode,
    index: usize,
    expected: &'static str,
) -> Result<&'n SyntaxToken, ResolveError> {
    node.token(index).ok_or(ResolveError::Malformed {
        kind: node.kind,
        expected,
        span: Some(node.span),
    })
}

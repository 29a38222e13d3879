//! Visitor dispatch and tree traversals.

use std::collections::VecDeque;

use crate::node::{Datum, Input, NodeId, NodeKind, Output, Runnable};
use crate::tree::ComponentTree;

/// Callbacks for each kind of node.
///
/// Every kind-specific method falls back to [`Visitor::visit_node`], so a
/// visitor only overrides what it cares about.
pub trait Visitor {
    fn visit_node(&mut self, _tree: &ComponentTree, _id: NodeId) {}

    fn visit_root(&mut self, tree: &ComponentTree, id: NodeId) {
        self.visit_node(tree, id)
    }

    fn visit_package(&mut self, tree: &ComponentTree, id: NodeId) {
        self.visit_node(tree, id)
    }

    fn visit_component(&mut self, tree: &ComponentTree, id: NodeId) {
        self.visit_node(tree, id)
    }

    fn visit_inputs(&mut self, tree: &ComponentTree, id: NodeId) {
        self.visit_node(tree, id)
    }

    fn visit_outputs(&mut self, tree: &ComponentTree, id: NodeId) {
        self.visit_node(tree, id)
    }

    fn visit_data(&mut self, tree: &ComponentTree, id: NodeId) {
        self.visit_node(tree, id)
    }

    fn visit_input(&mut self, tree: &ComponentTree, id: NodeId, _input: &Input) {
        self.visit_node(tree, id)
    }

    fn visit_output(&mut self, tree: &ComponentTree, id: NodeId, _output: &Output) {
        self.visit_node(tree, id)
    }

    fn visit_datum(&mut self, tree: &ComponentTree, id: NodeId, _datum: &Datum) {
        self.visit_node(tree, id)
    }

    fn visit_runnables(&mut self, tree: &ComponentTree, id: NodeId) {
        self.visit_node(tree, id)
    }

    fn visit_runnable(&mut self, tree: &ComponentTree, id: NodeId, _runnable: &Runnable) {
        self.visit_node(tree, id)
    }
}

impl ComponentTree {
    /// Dispatch `id` to the visitor method for its kind.
    pub fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) {
        match self.kind(id) {
            NodeKind::Plain => visitor.visit_node(self, id),
            NodeKind::Root => visitor.visit_root(self, id),
            NodeKind::Package => visitor.visit_package(self, id),
            NodeKind::Component => visitor.visit_component(self, id),
            NodeKind::Inputs => visitor.visit_inputs(self, id),
            NodeKind::Outputs => visitor.visit_outputs(self, id),
            NodeKind::Data => visitor.visit_data(self, id),
            NodeKind::Input(input) => visitor.visit_input(self, id, input),
            NodeKind::Output(output) => visitor.visit_output(self, id, output),
            NodeKind::Datum(datum) => visitor.visit_datum(self, id, datum),
            NodeKind::Runnables => visitor.visit_runnables(self, id),
            NodeKind::Runnable(runnable) => visitor.visit_runnable(self, id, runnable),
        }
    }

    /// Visit `start` and its descendants depth first, parents before children.
    pub fn walk_df_pre<V: Visitor>(&self, start: NodeId, mut visitor: V) -> V {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            self.accept(id, &mut visitor);
            stack.extend(self.children(id).rev());
        }
        visitor
    }

    /// Visit `start` and its descendants level by level.
    pub fn walk_bf_pre<V: Visitor>(&self, start: NodeId, mut visitor: V) -> V {
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            self.accept(id, &mut visitor);
            queue.extend(self.children(id));
        }
        visitor
    }
}

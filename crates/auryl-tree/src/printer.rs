//! Human readable dump of a component tree.

use crate::node::{Datum, Input, NodeId, Output, Runnable, Trigger};
use crate::tree::ComponentTree;
use crate::visit::Visitor;

/// Renders one line per node, indented by depth.
///
/// Runnables list where their triggers and outputs point, by qualified name.
#[derive(Debug, Default)]
pub struct TreePrinter {
    base_depth: Option<usize>,
    out: String,
}

impl TreePrinter {
    /// Render `start` and everything below it.
    pub fn render(tree: &ComponentTree, start: NodeId) -> String {
        tree.walk_df_pre(start, TreePrinter::default()).finish()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, tree: &ComponentTree, id: NodeId, text: &str) {
        let depth = tree.ancestors(id).count();
        let base = *self.base_depth.get_or_insert(depth);
        let indent = depth.saturating_sub(base);
        self.out.push_str(&"  ".repeat(indent));
        self.out.push_str(text);
        self.out.push('\n');
    }
}

impl Visitor for TreePrinter {
    fn visit_node(&mut self, tree: &ComponentTree, id: NodeId) {
        self.line(tree, id, tree.name(id));
    }

    fn visit_package(&mut self, tree: &ComponentTree, id: NodeId) {
        self.line(tree, id, &format!("package {}", tree.name(id)));
    }

    fn visit_component(&mut self, tree: &ComponentTree, id: NodeId) {
        self.line(tree, id, &format!("comp {}", tree.name(id)));
    }

    fn visit_input(&mut self, tree: &ComponentTree, id: NodeId, input: &Input) {
        self.line(tree, id, &format!("{}: {}", tree.name(id), input.ty));
    }

    fn visit_output(&mut self, tree: &ComponentTree, id: NodeId, output: &Output) {
        self.line(tree, id, &format!("{}: {}", tree.name(id), output.ty));
    }

    fn visit_datum(&mut self, tree: &ComponentTree, id: NodeId, datum: &Datum) {
        self.line(tree, id, &format!("{}: {}", tree.name(id), datum.ty));
    }

    fn visit_runnable(&mut self, tree: &ComponentTree, id: NodeId, runnable: &Runnable) {
        let clauses: Vec<String> = runnable
            .triggers
            .iter()
            .map(|trigger| match trigger {
                Trigger::Input(input) => {
                    format!("on {}", tree.qualified_name(input.input.target()))
                }
            })
            .chain(
                runnable
                    .outputs
                    .iter()
                    .map(|out| format!("to {}", tree.qualified_name(out.output.target()))),
            )
            .collect();

        let text = if clauses.is_empty() {
            tree.name(id).to_string()
        } else {
            format!("{} [{}]", tree.name(id), clauses.join("; "))
        };
        self.line(tree, id, &text);
    }
}

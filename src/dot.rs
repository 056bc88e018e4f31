//! Graphviz serialization.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::bdd::Bdd;
use crate::node::Node;
use crate::types::NodeId;

impl Bdd {
    /// Renders the subgraph reachable from `root` as a Graphviz digraph.
    ///
    /// Each node becomes one line labeled with its variable (or
    /// `TRUE`/`FALSE` for terminals); each internal node gets a solid edge
    /// to its high child and a dashed edge to its low child.
    pub fn to_dot(&self, root: NodeId) -> String {
        let mut order = Vec::new();
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            if let Node::Internal { high, low, .. } = self.node(id) {
                queue.push_back(high);
                queue.push_back(low);
            }
        }

        let mut dot = String::from("digraph G {\n");
        for &id in &order {
            let label = match self.node(id) {
                Node::False => "FALSE",
                Node::True => "TRUE",
                Node::Internal { var, .. } => self.var_name(var),
            };
            dot.push_str(&format!("  {} [label=\"{}\"];\n", id, label));
        }
        for &id in &order {
            if let Node::Internal { high, low, .. } = self.node(id) {
                dot.push_str(&format!("  {} -> {};\n", id, high));
                dot.push_str(&format!("  {} -> {} [style=dashed];\n", id, low));
            }
        }
        dot.push('}');
        dot
    }
}

//! Satisfiability checking.

use crate::bdd::Bdd;
use crate::node::Node;
use crate::types::NodeId;

impl Bdd {
    /// Checks whether any assignment satisfies the diagram.
    ///
    /// Because the diagram is reduced, only the FALSE terminal is
    /// unsatisfiable; the traversal with its memo exists so that repeated
    /// queries over large shared diagrams stay linear.
    pub fn is_sat(&mut self, id: NodeId) -> bool {
        if id == NodeId::FALSE {
            return false;
        }
        if id == NodeId::TRUE {
            return true;
        }
        if let Some(res) = self.sat_cache.get(&id) {
            return res;
        }

        let Node::Internal { high, low, .. } = self.node(id) else {
            unreachable!("terminal cases handled above");
        };
        let res = self.is_sat(high) || self.is_sat(low);
        self.sat_cache.insert(id, res);
        res
    }
}

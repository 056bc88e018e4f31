//! The canonical node table.
//!
//! All BDD nodes live here, hash-consed: interning a node that is
//! structurally equal to an existing one returns the existing id, so the
//! whole engine shares one canonical DAG. Ids grow monotonically and are
//! never reissued, which keeps memo-cache keys stable across the life of
//! the process even when a sweep removes nodes.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::node::Node;
use crate::types::NodeId;

pub struct NodeTable {
    node_to_id: FxHashMap<Node, NodeId>,
    id_to_node: FxHashMap<NodeId, Node>,
    next_id: u32,
}

impl NodeTable {
    /// Creates a table with the two terminals preallocated at ids 0 and 1.
    pub fn new() -> Self {
        let mut table = Self {
            node_to_id: FxHashMap::default(),
            id_to_node: FxHashMap::default(),
            next_id: 2,
        };
        table.node_to_id.insert(Node::False, NodeId::FALSE);
        table.node_to_id.insert(Node::True, NodeId::TRUE);
        table.id_to_node.insert(NodeId::FALSE, Node::False);
        table.id_to_node.insert(NodeId::TRUE, Node::True);
        table
    }

    /// Number of nodes currently stored, terminals included.
    pub fn len(&self) -> usize {
        self.id_to_node.len()
    }

    pub fn is_empty(&self) -> bool {
        false // terminals are never removed
    }

    /// Returns the existing id for `node`, or allocates a fresh one.
    ///
    /// The caller must already have collapsed `high == low` duplicates and
    /// established the variable-ordering invariant; `intern` stores
    /// whatever it is given.
    pub fn intern(&mut self, node: Node) -> NodeId {
        match node {
            Node::False => NodeId::FALSE,
            Node::True => NodeId::TRUE,
            Node::Internal { .. } => {
                if let Some(&id) = self.node_to_id.get(&node) {
                    return id;
                }
                let id = NodeId::new(self.next_id);
                self.next_id += 1;
                self.node_to_id.insert(node, id);
                self.id_to_node.insert(id, node);
                id
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<Node> {
        self.id_to_node.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_to_node.contains_key(&id)
    }

    /// Drops every node whose id is not in `live`.
    ///
    /// The terminals must be in `live`; the id counter is not rewound, so
    /// ids freed here are never reused.
    pub fn retain_live(&mut self, live: &FxHashSet<NodeId>) {
        debug_assert!(live.contains(&NodeId::FALSE) && live.contains(&NodeId::TRUE));
        self.id_to_node.retain(|id, _| live.contains(id));
        self.node_to_id.retain(|_, id| live.contains(id));
    }
}

impl Default for NodeTable {
    fn default() -> Self {
        Self::new()
    }
}

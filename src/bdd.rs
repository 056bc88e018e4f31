//! The BDD manager and its core algorithms.
//!
//! All operations go through the [`Bdd`] manager, which owns the canonical
//! node table, the global variable order, and the operation caches. This
//! keeps the diagram reduced, ordered and fully shared: logically
//! equivalent formulas always reduce to the same node id.

use std::fmt::Debug;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cache::OpCache;
use crate::node::Node;
use crate::table::NodeTable;
use crate::types::{NodeId, Var};

/// A binary Boolean connective of the Apply engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Op {
    And,
    Or,
}

impl Op {
    /// The terminal that annihilates this operation (`x ∧ 0 = 0`,
    /// `x ∨ 1 = 1`).
    fn absorbing(self) -> NodeId {
        match self {
            Op::And => NodeId::FALSE,
            Op::Or => NodeId::TRUE,
        }
    }

    /// The terminal that is the identity of this operation (`x ∧ 1 = x`,
    /// `x ∨ 0 = x`).
    fn identity(self) -> NodeId {
        match self {
            Op::And => NodeId::TRUE,
            Op::Or => NodeId::FALSE,
        }
    }
}

/// A quantifier kind.
///
/// Eliminating a variable combines the two cofactors with the quantifier's
/// connective: `∃v. f = f[v:=1] ∨ f[v:=0]` and `∀v. f = f[v:=1] ∧ f[v:=0]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Quant {
    Exists,
    Forall,
}

impl Quant {
    fn combiner(self) -> Op {
        match self {
            Quant::Exists => Op::Or,
            Quant::Forall => Op::And,
        }
    }
}

pub struct Bdd {
    table: NodeTable,
    /// Declaration order of symbolic variables. Append-only: sweeps never
    /// touch it, so `Var` indices stay valid forever.
    order: Vec<String>,
    order_index: FxHashMap<String, Var>,
    binop_cache: OpCache<(NodeId, NodeId, Op), NodeId>,
    not_cache: OpCache<NodeId, NodeId>,
    quant_cache: OpCache<(NodeId, usize), NodeId>,
    pub(crate) sat_cache: OpCache<NodeId, bool>,
}

impl Bdd {
    pub fn new() -> Self {
        Self {
            table: NodeTable::new(),
            order: Vec::new(),
            order_index: FxHashMap::default(),
            binop_cache: OpCache::new(),
            not_cache: OpCache::new(),
            quant_cache: OpCache::new(),
            sat_cache: OpCache::new(),
        }
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::new()
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bdd")
            .field("nodes", &self.table.len())
            .field("vars", &self.order.len())
            .finish()
    }
}

impl Bdd {
    /// Registers `name` in the global variable order and returns its
    /// handle. Registering the same name again returns the existing
    /// handle.
    pub fn declare(&mut self, name: &str) -> Var {
        if let Some(&var) = self.order_index.get(name) {
            return var;
        }
        let var = Var::new(self.order.len() as u32);
        debug!("declare(name = {}) -> {}", name, var);
        self.order.push(name.to_owned());
        self.order_index.insert(name.to_owned(), var);
        var
    }

    pub fn var_named(&self, name: &str) -> Option<Var> {
        self.order_index.get(name).copied()
    }

    /// The declared name of `var`.
    pub fn var_name(&self, var: Var) -> &str {
        &self.order[var.index() as usize]
    }

    pub fn num_vars(&self) -> usize {
        self.order.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.table.len()
    }

    /// Looks up a node by id; `None` if the id was never allocated or has
    /// been swept.
    pub fn get(&self, id: NodeId) -> Option<Node> {
        self.table.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.table.contains(id)
    }

    /// Looks up a node the engine knows to be present.
    pub(crate) fn node(&self, id: NodeId) -> Node {
        match self.table.get(id) {
            Some(node) => node,
            None => panic!("no node with id {}", id),
        }
    }

    /// Interns an internal node, collapsing the `high == low` duplicate
    /// case to keep the diagram reduced.
    pub fn mk_node(&mut self, var: Var, high: NodeId, low: NodeId) -> NodeId {
        if high == low {
            debug!("mk_node: duplicates {} == {}", high, low);
            return high;
        }
        debug_assert!(
            self.node(high).var().map_or(true, |v| var < v),
            "ordering violated on high child"
        );
        debug_assert!(
            self.node(low).var().map_or(true, |v| var < v),
            "ordering violated on low child"
        );
        self.table.intern(Node::Internal { var, high, low })
    }

    /// The single-variable diagram `var ? TRUE : FALSE`.
    pub fn mk_var(&mut self, var: Var) -> NodeId {
        self.mk_node(var, NodeId::TRUE, NodeId::FALSE)
    }

    pub fn apply_and(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.apply(Op::And, a, b)
    }

    pub fn apply_or(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.apply(Op::Or, a, b)
    }

    /// Applies a binary connective to two diagrams.
    pub fn apply(&mut self, op: Op, a: NodeId, b: NodeId) -> NodeId {
        debug!("apply({:?}, a = {}, b = {})", op, a, b);
        self.rec_apply(op, a, b)
    }

    fn rec_apply(&mut self, op: Op, a: NodeId, b: NodeId) -> NodeId {
        if a == b {
            return a;
        }
        if a == op.absorbing() || b == op.absorbing() {
            return op.absorbing();
        }
        if a == op.identity() {
            return b;
        }
        if b == op.identity() {
            return a;
        }

        // AND and OR are commutative, so cache under a canonical key.
        let key = (a.min(b), a.max(b), op);
        if let Some(res) = self.binop_cache.get(&key) {
            debug!("cache: apply({:?}, {}, {}) -> {}", op, a, b, res);
            return res;
        }

        let (na, nb) = (self.node(a), self.node(b));
        let (Node::Internal { var: va, high: ha, low: la }, Node::Internal { var: vb, high: hb, low: lb }) =
            (na, nb)
        else {
            unreachable!("terminal cases handled above");
        };

        // Pivot on the variable that comes first in the global order.
        let pivot_on_a = va <= vb;
        let (high, low) = if va == vb {
            (self.rec_apply(op, ha, hb), self.rec_apply(op, la, lb))
        } else if pivot_on_a {
            (self.rec_apply(op, ha, b), self.rec_apply(op, la, b))
        } else {
            (self.rec_apply(op, a, hb), self.rec_apply(op, a, lb))
        };

        let pivot = if pivot_on_a { va } else { vb };
        let res = if high == low {
            high
        } else {
            self.mk_node(pivot, high, low)
        };
        debug!("computed: apply({:?}, {}, {}) -> {}", op, a, b, res);
        self.binop_cache.insert(key, res);
        res
    }

    /// Negates a diagram.
    pub fn apply_not(&mut self, a: NodeId) -> NodeId {
        debug!("apply_not(a = {})", a);
        self.rec_not(a)
    }

    fn rec_not(&mut self, a: NodeId) -> NodeId {
        if a == NodeId::FALSE {
            return NodeId::TRUE;
        }
        if a == NodeId::TRUE {
            return NodeId::FALSE;
        }
        if let Some(res) = self.not_cache.get(&a) {
            debug!("cache: apply_not({}) -> {}", a, res);
            return res;
        }

        let Node::Internal { var, high, low } = self.node(a) else {
            unreachable!("terminal cases handled above");
        };

        let nhigh = self.rec_not(high);
        let nlow = self.rec_not(low);

        // high != low implies the negated children differ as well, so the
        // result is always an internal node under the same variable.
        let res = self.mk_node(var, nhigh, nlow);
        self.not_cache.insert(a, res);
        res
    }

    /// Eliminates the given bound variables from `body`.
    ///
    /// `bound` must be sorted by the global order and contain only
    /// variables at or below `body`'s top variable; the
    /// [Builder][crate::build] establishes this before calling in. The
    /// quantifier cache is only valid for one such list, so callers clear
    /// it via [`clear_quant_cache`][Bdd::clear_quant_cache] between
    /// top-level eliminations.
    pub fn quantify(&mut self, quant: Quant, body: NodeId, bound: &[Var]) -> NodeId {
        debug!("quantify({:?}, body = {}, bound = {:?})", quant, body, bound);
        debug_assert!(bound.windows(2).all(|w| w[0] <= w[1]), "bound vars not sorted");
        self.rec_quant(quant.combiner(), body, bound)
    }

    fn rec_quant(&mut self, op: Op, a: NodeId, mut bound: &[Var]) -> NodeId {
        if a.is_terminal() {
            return a;
        }

        let Node::Internal { var, high, low } = self.node(a) else {
            unreachable!("terminal case handled above");
        };

        // Restore the invariant `bound[0] >= var`: bound variables above
        // this node cannot occur below it, so eliminating them here is the
        // identity.
        while let Some((&first, rest)) = bound.split_first() {
            if first < var {
                bound = rest;
            } else {
                break;
            }
        }
        if bound.is_empty() {
            return a;
        }

        let key = (a, bound.len());
        if let Some(res) = self.quant_cache.get(&key) {
            return res;
        }

        if var == bound[0] {
            // This variable is quantified out: combine the cofactors.
            let high = self.rec_quant(op, high, &bound[1..]);
            let low = self.rec_quant(op, low, &bound[1..]);
            if high == low {
                return high;
            }
            let res = self.rec_apply(op, high, low);
            self.quant_cache.insert(key, res);
            res
        } else {
            let high = self.rec_quant(op, high, bound);
            let low = self.rec_quant(op, low, bound);
            if high == low {
                return high;
            }
            let res = self.mk_node(var, high, low);
            self.quant_cache.insert(key, res);
            res
        }
    }

    /// Clears the quantifier cache. Its entries are keyed by the remaining
    /// length of one particular bound-variable list, so they must not leak
    /// into the next elimination.
    pub fn clear_quant_cache(&mut self) {
        self.quant_cache.clear();
    }

    /// Clears every operation cache (binary, NOT, quantifier,
    /// satisfiability).
    pub fn clear_caches(&mut self) {
        self.binop_cache.clear();
        self.not_cache.clear();
        self.quant_cache.clear();
        self.sat_cache.clear();
    }

    /// Collects every id reachable from `roots` through `high`/`low`
    /// edges. The terminals are always included.
    pub fn reachable(&self, roots: &[NodeId]) -> FxHashSet<NodeId> {
        let mut live = FxHashSet::default();
        live.insert(NodeId::FALSE);
        live.insert(NodeId::TRUE);
        let mut queue: Vec<NodeId> = roots.to_vec();
        while let Some(id) = queue.pop() {
            if !live.insert(id) {
                continue;
            }
            if let Node::Internal { high, low, .. } = self.node(id) {
                queue.push(high);
                queue.push(low);
            }
        }
        live
    }

    /// Drops every node not in `live`. Callers must clear the caches
    /// first; see [`Interp::sweep`][crate::interp::Interp].
    pub fn retain(&mut self, live: &FxHashSet<NodeId>) {
        self.table.retain_live(live);
    }

    /// Renders `id` as a decision tree: `var ? (HIGH) : (LOW)` with
    /// `TRUE`/`FALSE` leaves. Shared subgraphs are expanded, so the text
    /// can be exponentially larger than the diagram.
    pub fn to_tree_string(&self, id: NodeId) -> String {
        match self.node(id) {
            Node::False => "FALSE".to_owned(),
            Node::True => "TRUE".to_owned(),
            Node::Internal { var, high, low } => format!(
                "{} ? ({}) : ({})",
                self.var_name(var),
                self.to_tree_string(high),
                self.to_tree_string(low)
            ),
        }
    }
}

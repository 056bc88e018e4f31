//! Memory management: preserve, unpreserve, clear_cache and sweep.
//!
//! The engine has no refcounts. Liveness is user-controlled: the root set
//! of a sweep is the preserved bound entries plus the terminals, and
//! everything unreachable from it is discarded.

use log::debug;

use crate::env::Binding;
use crate::error::ExecutionError;
use crate::interp::Interp;
use crate::types::NodeId;

impl Interp {
    /// Sets or clears the preserved bit on a bound entry.
    pub(crate) fn preserve(&mut self, name: &str, flag: bool) -> Result<(), ExecutionError> {
        let func = if flag { "preserve" } else { "unpreserve" };
        match self.env.get(name) {
            Some(Binding::Bound { .. }) => {
                self.env.set_preserved(name, flag);
                Ok(())
            }
            Some(Binding::Symbolic(_)) => Err(ExecutionError::BadArgument {
                func,
                message: format!("`{}` is not bound to a BDD", name),
            }),
            None => Err(ExecutionError::UnknownName {
                name: name.to_owned(),
                function: func,
            }),
        }
    }

    /// Clears every memo cache: the engine's operation caches and the
    /// reification memo.
    pub fn clear_cache(&mut self) {
        self.bdd.clear_caches();
        self.expr_memo.clear();
    }

    /// Discards every non-preserved binding and every node unreachable
    /// from what remains.
    ///
    /// Caches go first: their entries may reference ids that are about to
    /// disappear. Terminals are always live and the variable order is
    /// untouched, so symbolic names keep working. Idempotent.
    pub fn sweep(&mut self) {
        self.clear_cache();
        self.env.retain_preserved();
        let roots: Vec<NodeId> = self.env.bound_ids().collect();
        let live = self.bdd.reachable(&roots);
        debug!("sweep: {} roots, {} live nodes", roots.len(), live.len());
        self.bdd.retain(&live);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::scan;
    use crate::parser::parse;

    fn feed(interp: &mut Interp, input: &str) {
        let stmts = parse(&scan(input).unwrap()).unwrap();
        interp.walk_statements(&stmts);
    }

    #[test]
    fn test_sweep_drops_unpreserved_bindings() {
        let mut interp = Interp::new();
        feed(&mut interp, "bvar x y z; set a = x & y; set b = x | z;");
        feed(&mut interp, "preserve a; sweep;");
        interp.take_output();

        feed(&mut interp, "is_sat b;");
        let out = interp.take_output();
        assert!(out.contains("unknown identifier `b`"));

        feed(&mut interp, "is_sat a;");
        let out = interp.take_output();
        assert!(out.contains("satisfiable"));
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let mut interp = Interp::new();
        feed(&mut interp, "bvar x y; set a = x & y; preserve a;");
        feed(&mut interp, "sweep;");
        let nodes = interp.bdd().num_nodes();
        feed(&mut interp, "sweep;");
        assert_eq!(interp.bdd().num_nodes(), nodes);
    }

    #[test]
    fn test_sweep_preserves_reachable_subgraph() {
        let mut interp = Interp::new();
        feed(&mut interp, "bvar x y z; set a = x & (y | z); preserve a;");
        interp.take_output();
        feed(&mut interp, "sweep; display_tree a;");
        let out = interp.take_output();
        assert!(out.contains("x ? (y ? (TRUE) : (z ? (TRUE) : (FALSE))) : (FALSE)"));
    }

    #[test]
    fn test_preserve_unknown_name_errors() {
        let mut interp = Interp::new();
        feed(&mut interp, "preserve ghost;");
        let out = interp.take_output();
        assert!(out.contains("unknown identifier `ghost`"));
    }

    #[test]
    fn test_preserve_symbolic_errors() {
        let mut interp = Interp::new();
        feed(&mut interp, "bvar x; preserve x;");
        let out = interp.take_output();
        assert!(out.contains("is not bound to a BDD"));
    }

    #[test]
    fn test_preserve_all_then_sweep_keeps_everything() {
        let mut interp = Interp::new();
        feed(&mut interp, "bvar x y; set a = x & y; set b = x | y;");
        feed(&mut interp, "preserve_all; sweep; is_sat a; is_sat b;");
        let out = interp.take_output();
        assert!(!out.contains("ExecutionError"));
    }

    #[test]
    fn test_clear_cache_emits_cleared() {
        let mut interp = Interp::new();
        feed(&mut interp, "clear_cache;");
        assert!(interp.take_output().contains("Cleared"));
    }

    #[test]
    fn test_swept_id_literal_becomes_unknown() {
        let mut interp = Interp::new();
        feed(&mut interp, "bvar x y; set a = x & y;");
        interp.take_output();
        feed(&mut interp, "x & y;");
        let out = interp.take_output();
        let id_line = out.lines().find(|l| l.starts_with("BDD ID:")).unwrap();
        let id: u32 = id_line.trim_start_matches("BDD ID: ").trim().parse().unwrap();

        feed(&mut interp, "sweep;");
        interp.take_output();
        feed(&mut interp, &format!("is_sat {};", id));
        let out = interp.take_output();
        assert!(out.contains(&format!("no BDD with id {}", id)));
    }
}

//! Lowering expressions to node ids.

use crate::ast::{Expr, Lit};
use crate::env::Binding;
use crate::error::ExecutionError;
use crate::interp::Interp;
use crate::node::Node;
use crate::types::NodeId;

impl Interp {
    /// Reduces an expression to its canonical node id.
    ///
    /// Identifiers resolve through the environment: a symbolic name builds
    /// the single-variable diagram, a bound name yields its stored id.
    /// Bare integer literals must name an id that is still in the table.
    pub fn build(&mut self, expr: &Expr) -> Result<NodeId, ExecutionError> {
        match expr {
            Expr::Binary { left, right, op } => {
                let left = self.build(left)?;
                let right = self.build(right)?;
                Ok(self.bdd.apply(*op, left, right))
            }
            Expr::Not(operand) => {
                let operand = self.build(operand)?;
                Ok(self.bdd.apply_not(operand))
            }
            Expr::Lit(Lit::True) => Ok(NodeId::TRUE),
            Expr::Lit(Lit::False) => Ok(NodeId::FALSE),
            Expr::Lit(Lit::Id(raw)) => {
                let id = NodeId::new(*raw);
                if self.bdd.contains(id) {
                    Ok(id)
                } else {
                    Err(ExecutionError::UnknownId {
                        id: *raw,
                        function: "build",
                    })
                }
            }
            Expr::Ident(name) => match self.env.get(name) {
                Some(Binding::Symbolic(var)) => Ok(self.bdd.mk_var(var)),
                Some(Binding::Bound { id, .. }) => Ok(id),
                None => Err(ExecutionError::UnknownName {
                    name: name.clone(),
                    function: "build",
                }),
            },
            Expr::Quantified { quant, bound, body } => {
                let body_id = self.build(body)?;
                if body_id.is_terminal() {
                    return Ok(body_id);
                }
                let Node::Internal { var: top, .. } = self.bdd.node(body_id) else {
                    unreachable!("terminal case handled above");
                };

                // Variables above the body's top variable cannot occur in
                // it, so eliminating them is the identity; drop them and
                // sort the rest so the engine's recursion invariant holds.
                let mut vars = Vec::with_capacity(bound.len());
                for name in bound {
                    let Some(var) = self.bdd.var_named(name) else {
                        return Err(ExecutionError::UnknownName {
                            name: name.clone(),
                            function: "build",
                        });
                    };
                    if var >= top {
                        vars.push(var);
                    }
                }
                vars.sort_unstable();

                self.bdd.clear_quant_cache();
                Ok(self.bdd.quantify(*quant, body_id, &vars))
            }
            Expr::Substitute { pairs, body } => self.substitute(pairs, body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::scan;
    use crate::parser::{parse, parse_expression};

    fn interp_with(decls: &str) -> Interp {
        let mut interp = Interp::new();
        let stmts = parse(&scan(decls).unwrap()).unwrap();
        interp.walk_statements(&stmts);
        interp.take_output();
        interp
    }

    fn build_str(interp: &mut Interp, input: &str) -> Result<NodeId, ExecutionError> {
        let expr = parse_expression(&scan(input).unwrap()).unwrap();
        interp.build(&expr)
    }

    #[test]
    fn test_terminal_identity() {
        let mut interp = Interp::new();
        assert_eq!(build_str(&mut interp, "true").unwrap(), NodeId::TRUE);
        assert_eq!(build_str(&mut interp, "false").unwrap(), NodeId::FALSE);
    }

    #[test]
    fn test_canonicity_of_equivalent_expressions() {
        let mut interp = interp_with("bvar x y z;");
        let a = build_str(&mut interp, "x & (y | z)").unwrap();
        let b = build_str(&mut interp, "(x & y) | (x & z)").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_name() {
        let mut interp = Interp::new();
        let err = build_str(&mut interp, "ghost").unwrap_err();
        assert!(matches!(err, ExecutionError::UnknownName { .. }));
    }

    #[test]
    fn test_id_literal_roundtrip() {
        let mut interp = interp_with("bvar x y;");
        let id = build_str(&mut interp, "x & y").unwrap();
        let again = build_str(&mut interp, &id.to_string()).unwrap();
        assert_eq!(id, again);
    }

    #[test]
    fn test_unknown_id_literal() {
        let mut interp = interp_with("bvar x;");
        let err = build_str(&mut interp, "x & 100").unwrap_err();
        assert!(matches!(err, ExecutionError::UnknownId { id: 100, .. }));
    }

    #[test]
    fn test_quantifier_over_absent_variable() {
        // Eliminating a variable that does not occur in the body leaves
        // the body unchanged.
        let mut interp = interp_with("bvar x y;");
        let body = build_str(&mut interp, "y").unwrap();
        let quantified = build_str(&mut interp, "exists (x) y").unwrap();
        assert_eq!(body, quantified);
    }

    #[test]
    fn test_quantifier_over_terminal() {
        let mut interp = interp_with("bvar x;");
        assert_eq!(build_str(&mut interp, "exists (x) true").unwrap(), NodeId::TRUE);
        assert_eq!(build_str(&mut interp, "forall (x) false").unwrap(), NodeId::FALSE);
    }

    #[test]
    fn test_quantifier_unknown_bound_variable() {
        let mut interp = interp_with("bvar x;");
        let err = build_str(&mut interp, "exists (ghost) x").unwrap_err();
        assert!(matches!(err, ExecutionError::UnknownName { .. }));
    }
}

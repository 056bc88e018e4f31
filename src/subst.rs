//! Substitution: reifying diagrams back into expressions and replacing
//! free symbolic identifiers.
//!
//! A substitution first reduces its body to a node id, lifts that id back
//! into an expression, replaces the mapped identifiers simultaneously, and
//! hands the result to the builder for canonicalization. Replacements are
//! inserted verbatim and never re-walked, which is what makes `{x: y,
//! y: z}` substitute x to y (not z) and keeps the operation capture-free.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::ast::{Expr, Lit};
use crate::bdd::Op;
use crate::env::Binding;
use crate::error::ExecutionError;
use crate::interp::Interp;
use crate::node::Node;
use crate::types::NodeId;

impl Interp {
    /// Lifts a node id back into an expression.
    ///
    /// Each internal node `v ? h : l` becomes `(!v | H) & (v | L)`.
    /// Results are memoized per id, so shared subgraphs reify to shared
    /// subtrees; the memo lives until `clear_cache` or `sweep`.
    pub fn reify(&mut self, id: NodeId) -> Result<Rc<Expr>, ExecutionError> {
        if !self.bdd.contains(id) {
            return Err(ExecutionError::UnknownId {
                id: id.raw(),
                function: "reify",
            });
        }
        Ok(self.construct_expr(id))
    }

    fn construct_expr(&mut self, id: NodeId) -> Rc<Expr> {
        if let Some(expr) = self.expr_memo.get(&id) {
            return expr.clone();
        }
        let expr = match self.bdd.node(id) {
            Node::False => Rc::new(Expr::Lit(Lit::False)),
            Node::True => Rc::new(Expr::Lit(Lit::True)),
            Node::Internal { var, high, low } => {
                let high = self.construct_expr(high);
                let low = self.construct_expr(low);
                let ident = Rc::new(Expr::Ident(self.bdd.var_name(var).to_owned()));
                // v ? h : l  ==  (!v | H) & (v | L)
                let if_high = Rc::new(Expr::Binary {
                    left: Rc::new(Expr::Not(ident.clone())),
                    right: high,
                    op: Op::Or,
                });
                let if_low = Rc::new(Expr::Binary {
                    left: ident,
                    right: low,
                    op: Op::Or,
                });
                Rc::new(Expr::Binary {
                    left: if_high,
                    right: if_low,
                    op: Op::And,
                })
            }
        };
        self.expr_memo.insert(id, expr.clone());
        expr
    }

    /// Applies a substitution expression: all pairs simultaneously, on the
    /// reduced form of `body`, with duplicate names resolved last-wins.
    pub(crate) fn substitute(
        &mut self,
        pairs: &[(String, Rc<Expr>)],
        body: &Expr,
    ) -> Result<NodeId, ExecutionError> {
        let body_id = self.build(body)?;

        let mut map: FxHashMap<&str, Rc<Expr>> = FxHashMap::default();
        for (name, replacement) in pairs {
            if !matches!(self.env.get(name), Some(Binding::Symbolic(_))) {
                return Err(ExecutionError::NotABddVariable {
                    name: name.clone(),
                    function: "substitute",
                });
            }
            map.insert(name.as_str(), replacement.clone());
        }

        let reified = self.construct_expr(body_id);
        let mut replaced_memo = FxHashMap::default();
        let replaced = replace(&reified, &map, &mut replaced_memo);
        self.build(&replaced)
    }
}

/// Structurally replaces mapped identifiers in a reified expression. The
/// memo is per-substitution: it is keyed by subtree identity, which is
/// only stable while the reified tree is held alive by this call.
fn replace(
    expr: &Rc<Expr>,
    map: &FxHashMap<&str, Rc<Expr>>,
    memo: &mut FxHashMap<*const Expr, Rc<Expr>>,
) -> Rc<Expr> {
    let key = Rc::as_ptr(expr);
    if let Some(done) = memo.get(&key) {
        return done.clone();
    }
    let result = match &**expr {
        Expr::Binary { left, right, op } => Rc::new(Expr::Binary {
            left: replace(left, map, memo),
            right: replace(right, map, memo),
            op: *op,
        }),
        Expr::Not(operand) => Rc::new(Expr::Not(replace(operand, map, memo))),
        Expr::Lit(_) => expr.clone(),
        Expr::Ident(name) => match map.get(name.as_str()) {
            Some(replacement) => replacement.clone(),
            None => expr.clone(),
        },
        Expr::Quantified { .. } | Expr::Substitute { .. } => {
            unreachable!("reified expressions contain only AND/OR/NOT, literals and identifiers")
        }
    };
    memo.insert(key, result.clone());
    result
}

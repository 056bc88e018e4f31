//! The abstract syntax of the scripting language.
//!
//! The parser desugars `->`, `==` and `!=` before building these trees, so
//! expressions downstream carry only AND, OR, NOT, quantifiers,
//! substitutions, literals and identifiers. Subtrees are `Rc`-shared:
//! desugaring duplicates operands and substitution reuses whole replacement
//! expressions without cloning them structurally.

use std::rc::Rc;

use crate::bdd::{Op, Quant};

#[derive(Debug, Clone)]
pub enum Expr {
    Binary {
        left: Rc<Expr>,
        right: Rc<Expr>,
        op: Op,
    },
    Not(Rc<Expr>),
    Quantified {
        quant: Quant,
        bound: Vec<String>,
        body: Rc<Expr>,
    },
    /// `sub { name: expr, … } body`. The pairs keep their source order;
    /// duplicate names are resolved last-wins when the substitution is
    /// applied.
    Substitute {
        pairs: Vec<(String, Rc<Expr>)>,
        body: Rc<Expr>,
    },
    Lit(Lit),
    Ident(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Lit {
    True,
    False,
    /// A bare integer naming an existing node id.
    Id(u32),
}

/// The operation named by a function-call statement.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Func {
    DisplayTree,
    DisplayGraph,
    IsSat,
    Source,
    ClearCache,
    Preserve,
    PreserveAll,
    Unpreserve,
    UnpreserveAll,
    Sweep,
}

impl Func {
    /// The keyword spelling, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Func::DisplayTree => "display_tree",
            Func::DisplayGraph => "display_graph",
            Func::IsSat => "is_sat",
            Func::Source => "source",
            Func::ClearCache => "clear_cache",
            Func::Preserve => "preserve",
            Func::PreserveAll => "preserve_all",
            Func::Unpreserve => "unpreserve",
            Func::UnpreserveAll => "unpreserve_all",
            Func::Sweep => "sweep",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Decl { names: Vec<String> },
    Assign { target: String, value: Rc<Expr> },
    Call { func: Func, args: Vec<Rc<Expr>> },
    Expr(Rc<Expr>),
}

//! Shared harness: drives the full lex → parse → walk pipeline from
//! script text.
#![allow(dead_code)] // not every test binary uses every helper

use std::rc::Rc;

use bddsh::ast::Expr;
use bddsh::error::ExecutionError;
use bddsh::interp::Interp;
use bddsh::lexer::scan;
use bddsh::parser::{parse, parse_expression};
use bddsh::types::NodeId;

pub struct Tester {
    pub interp: Interp,
}

impl Tester {
    pub fn new() -> Self {
        Self {
            interp: Interp::new(),
        }
    }

    /// Executes a chunk of script text as one batch.
    pub fn feed(&mut self, input: &str) {
        let tokens = scan(input).expect("input should lex");
        let stmts = parse(&tokens).expect("input should parse");
        self.interp.walk_statements(&stmts);
    }

    fn expr(&self, input: &str) -> Rc<Expr> {
        let tokens = scan(input).expect("input should lex");
        parse_expression(&tokens).expect("input should parse")
    }

    pub fn try_build(&mut self, input: &str) -> Result<NodeId, ExecutionError> {
        let expr = self.expr(input);
        self.interp.build(&expr)
    }

    pub fn build(&mut self, input: &str) -> NodeId {
        self.try_build(input).expect("expression should build")
    }

    /// The tree representation of an expression's diagram.
    pub fn tree(&mut self, input: &str) -> String {
        let id = self.build(input);
        self.interp.bdd().to_tree_string(id)
    }

    pub fn is_sat(&mut self, input: &str) -> bool {
        let id = self.build(input);
        self.interp.bdd_mut().is_sat(id)
    }

    /// Returns and clears the interpreter's output buffer.
    pub fn output(&mut self) -> String {
        self.interp.take_output()
    }
}

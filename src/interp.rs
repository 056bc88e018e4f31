//! The tree-walking interpreter.
//!
//! One [`Interp`] instance owns the BDD manager, the environment and the
//! output buffer. Everything a statement prints is appended to the buffer;
//! flushing it to the terminal is the caller's business. Execution errors
//! are rendered into the same buffer in red.
//!
//! Batch execution ([`walk_statements`][Interp::walk_statements], used by
//! `source`) stops at the first execution error. The REPL drives
//! [`walk_single`][Interp::walk_single] instead, which isolates each
//! statement so the session can continue.

use std::rc::Rc;

use log::debug;
use rustc_hash::FxHashMap;

use crate::ast::{Expr, Func, Stmt};
use crate::bdd::Bdd;
use crate::colour::{paint, Colour};
use crate::env::{Binding, Env};
use crate::error::ExecutionError;
use crate::lexer::scan;
use crate::parser::parse;
use crate::types::NodeId;

pub struct Interp {
    pub(crate) bdd: Bdd,
    pub(crate) env: Env,
    out: String,
    /// Reification memo for substitution: node id -> expression. Reusable
    /// across statements; flushed by `clear_cache` and `sweep`.
    pub(crate) expr_memo: FxHashMap<NodeId, Rc<Expr>>,
}

impl Interp {
    pub fn new() -> Self {
        Self {
            bdd: Bdd::new(),
            env: Env::new(),
            out: String::new(),
            expr_memo: FxHashMap::default(),
        }
    }

    pub fn bdd(&self) -> &Bdd {
        &self.bdd
    }

    pub fn bdd_mut(&mut self) -> &mut Bdd {
        &mut self.bdd
    }

    /// Returns and clears the accumulated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }

    fn emit(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn emit_error(&mut self, text: &str) {
        self.out.push_str(&paint(Colour::Red, text));
        self.out.push('\n');
    }

    /// Executes statements in order, stopping at the first execution
    /// error, which is rendered into the output buffer.
    pub fn walk_statements(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            if let Err(err) = self.walk(stmt) {
                self.emit_error(&err.to_string());
                return;
            }
        }
    }

    /// Executes one statement, rendering any error without poisoning the
    /// session. REPL entry point.
    pub fn walk_single(&mut self, stmt: &Stmt) {
        if let Err(err) = self.walk(stmt) {
            self.emit_error(&err.to_string());
        }
    }

    fn walk(&mut self, stmt: &Stmt) -> Result<(), ExecutionError> {
        match stmt {
            Stmt::Decl { names } => {
                debug!("executing declaration of {:?}", names);
                self.walk_decl(names);
                Ok(())
            }
            Stmt::Assign { target, value } => {
                debug!("executing assignment to {}", target);
                self.walk_assign(target, value)
            }
            Stmt::Call { func, args } => {
                debug!("executing function call {}", func.name());
                self.walk_call(*func, args)
            }
            Stmt::Expr(expr) => {
                debug!("executing expression statement");
                let id = self.build(expr)?;
                self.emit(&format!("BDD ID: {}", id));
                Ok(())
            }
        }
    }

    fn walk_decl(&mut self, names: &[String]) {
        for name in names {
            match self.env.get(name) {
                None => {
                    let var = self.bdd.declare(name);
                    self.env.insert_symbolic(name, var);
                    self.emit(&format!("Declared Symbolic Variable: {}", name));
                }
                Some(Binding::Symbolic(_)) => {
                    self.emit(&format!("Variable already declared: {}", name));
                }
                Some(Binding::Bound { .. }) => {
                    self.emit(&format!(
                        "Variable name conflict (making a variable holding a bdd symbolic), ignoring: {}",
                        name
                    ));
                }
            }
        }
    }

    fn walk_assign(&mut self, target: &str, value: &Expr) -> Result<(), ExecutionError> {
        if matches!(self.env.get(target), Some(Binding::Symbolic(_))) {
            self.emit(&format!(
                "Variable name conflict (assigning to symbolic variable), ignoring assignment of: {}",
                target
            ));
            return Ok(());
        }
        let id = self.build(value)?;
        self.env.bind(target, id);
        self.emit(&format!("Assigned to {} with BDD ID: {}", target, id));
        Ok(())
    }

    fn walk_call(&mut self, func: Func, args: &[Rc<Expr>]) -> Result<(), ExecutionError> {
        match func {
            Func::DisplayTree => {
                check_arity(func, args, 1)?;
                let id = self.build(&args[0])?;
                self.emit(&format!("BDD ID: {}", id));
                let tree = self.bdd.to_tree_string(id);
                self.emit(&tree);
            }
            Func::DisplayGraph => {
                check_arity(func, args, 1)?;
                let id = self.build(&args[0])?;
                let dot = self.bdd.to_dot(id);
                self.emit(&dot);
            }
            Func::IsSat => {
                check_arity(func, args, 1)?;
                let id = self.build(&args[0])?;
                if self.bdd.is_sat(id) {
                    self.emit("satisfiable");
                } else {
                    self.emit("unsatisfiable");
                }
            }
            Func::Source => {
                check_arity(func, args, 1)?;
                let path = ident_arg(func, &args[0])?.to_owned();
                self.run_source(&path)?;
            }
            Func::ClearCache => {
                check_arity(func, args, 0)?;
                self.clear_cache();
                self.emit("Cleared");
            }
            Func::Preserve => {
                check_arity(func, args, 1)?;
                let name = ident_arg(func, &args[0])?.to_owned();
                self.preserve(&name, true)?;
                self.emit(&format!("Preserved: {}", name));
            }
            Func::Unpreserve => {
                check_arity(func, args, 1)?;
                let name = ident_arg(func, &args[0])?.to_owned();
                self.preserve(&name, false)?;
                self.emit(&format!("Unpreserved: {}", name));
            }
            Func::PreserveAll => {
                check_arity(func, args, 0)?;
                self.env.set_all_preserved(true);
                self.emit("Preserved all bindings");
            }
            Func::UnpreserveAll => {
                check_arity(func, args, 0)?;
                self.env.set_all_preserved(false);
                self.emit("Unpreserved all bindings");
            }
            Func::Sweep => {
                check_arity(func, args, 0)?;
                self.sweep();
                self.emit("Swept");
            }
        }
        Ok(())
    }

    /// Reads, parses and executes a script file. Lexer and parser errors
    /// of the sub-script are rendered as ordinary error text; a missing
    /// file is an execution error.
    fn run_source(&mut self, path: &str) -> Result<(), ExecutionError> {
        let text =
            std::fs::read_to_string(path).map_err(|source| ExecutionError::SourceIo {
                path: path.to_owned(),
                source,
            })?;

        let tokens = match scan(&text) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.emit_error(&err.to_string());
                return Ok(());
            }
        };
        match parse(&tokens) {
            Ok(stmts) => self.walk_statements(&stmts),
            Err(errors) => {
                for err in errors {
                    self.emit_error(&err.to_string());
                }
            }
        }
        Ok(())
    }
}

impl Default for Interp {
    fn default() -> Self {
        Self::new()
    }
}

fn check_arity(func: Func, args: &[Rc<Expr>], expected: usize) -> Result<(), ExecutionError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ExecutionError::Arity {
            func: func.name(),
            expected,
            got: args.len(),
        })
    }
}

fn ident_arg(func: Func, arg: &Expr) -> Result<&str, ExecutionError> {
    match arg {
        Expr::Ident(name) => Ok(name),
        _ => Err(ExecutionError::BadArgument {
            func: func.name(),
            message: "argument must be an identifier".to_owned(),
        }),
    }
}

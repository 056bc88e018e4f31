//! The recursive-descent parser.
//!
//! Precedence, lowest to highest: substitution, equality (non-associative),
//! implication (right-associative), disjunction, conjunction, quantifier,
//! unary, primary.
//!
//! `->`, `==` and `!=` are pure syntax: they are rewritten here into
//! AND/OR/NOT so that the builder's case analysis and the engine's cache
//! keys stay small. On a grammar violation the parser records the error,
//! skips to the next `;` and keeps going; a batch with any recorded error
//! is rejected as a whole.

use std::rc::Rc;

use crate::ast::{Expr, Func, Lit, Stmt};
use crate::bdd::{Op, Quant};
use crate::error::ParserError;
use crate::token::{Token, TokenKind};

/// Parses a token stream into statements, collecting every parse error.
pub fn parse(tokens: &[Token]) -> Result<Vec<Stmt>, Vec<ParserError>> {
    let mut parser = Parser::new(tokens);
    let mut stmts = Vec::new();
    let mut errors = Vec::new();
    while !parser.at_end() {
        match parser.statement() {
            Ok(stmt) => stmts.push(stmt),
            Err(err) => {
                errors.push(err);
                parser.synchronize();
            }
        }
    }
    if errors.is_empty() {
        Ok(stmts)
    } else {
        Err(errors)
    }
}

/// Parses a single expression, ignoring anything after it. Used by tests
/// and tooling that evaluate expression snippets directly.
pub fn parse_expression(tokens: &[Token]) -> Result<Rc<Expr>, ParserError> {
    Parser::new(tokens).expression()
}

fn and(left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
    Rc::new(Expr::Binary {
        left,
        right,
        op: Op::And,
    })
}

fn or(left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
    Rc::new(Expr::Binary {
        left,
        right,
        op: Op::Or,
    })
}

fn not(operand: Rc<Expr>) -> Rc<Expr> {
    Rc::new(Expr::Not(operand))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn found(&self) -> String {
        match self.peek() {
            Some(token) => token.lexeme.clone(),
            None => "<end of input>".to_owned(),
        }
    }

    fn error(&self, message: impl Into<String>, function: &'static str) -> ParserError {
        ParserError {
            message: message.into(),
            found: self.found(),
            function,
        }
    }

    fn expect(
        &mut self,
        kind: TokenKind,
        message: &str,
        function: &'static str,
    ) -> Result<(), ParserError> {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(message, function))
        }
    }

    /// Skips past the next `;` so the statement after a syntax error can
    /// still be checked.
    fn synchronize(&mut self) {
        while let Some(token) = self.advance() {
            if token.kind == TokenKind::Semicolon {
                break;
            }
        }
    }

    fn statement(&mut self) -> Result<Stmt, ParserError> {
        match self.peek_kind() {
            Some(TokenKind::Bvar) => self.declaration(),
            Some(TokenKind::Set) => self.assignment(),
            Some(TokenKind::DisplayTree) => self.func_call(Func::DisplayTree),
            Some(TokenKind::DisplayGraph) => self.func_call(Func::DisplayGraph),
            Some(TokenKind::IsSat) => self.func_call(Func::IsSat),
            Some(TokenKind::Source) => self.func_call(Func::Source),
            Some(TokenKind::ClearCache) => self.func_call(Func::ClearCache),
            Some(TokenKind::Preserve) => self.func_call(Func::Preserve),
            Some(TokenKind::PreserveAll) => self.func_call(Func::PreserveAll),
            Some(TokenKind::Unpreserve) => self.func_call(Func::Unpreserve),
            Some(TokenKind::UnpreserveAll) => self.func_call(Func::UnpreserveAll),
            Some(TokenKind::Sweep) => self.func_call(Func::Sweep),
            _ => self.expr_statement(),
        }
    }

    fn declaration(&mut self) -> Result<Stmt, ParserError> {
        self.advance(); // bvar
        if self.peek_kind() != Some(TokenKind::Ident) {
            return Err(self.error("Expected identifier after 'bvar'", "parse_decl"));
        }
        let mut names = Vec::new();
        while self.peek_kind() == Some(TokenKind::Ident) {
            names.push(self.identifier()?);
        }
        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after identifiers",
            "parse_decl",
        )?;
        Ok(Stmt::Decl { names })
    }

    fn assignment(&mut self) -> Result<Stmt, ParserError> {
        self.advance(); // set
        let target = self.identifier()?;
        self.expect(
            TokenKind::Equal,
            "Expected '=' after identifier",
            "parse_assign",
        )?;
        let value = self.expression()?;
        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after assignment",
            "parse_assign",
        )?;
        Ok(Stmt::Assign { target, value })
    }

    fn func_call(&mut self, func: Func) -> Result<Stmt, ParserError> {
        self.advance(); // function keyword
        let mut args = Vec::new();
        while !self.at_end() && self.peek_kind() != Some(TokenKind::Semicolon) {
            args.push(self.expression()?);
        }
        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after function call",
            "parse_func_call",
        )?;
        Ok(Stmt::Call { func, args })
    }

    fn expr_statement(&mut self) -> Result<Stmt, ParserError> {
        let expr = self.expression()?;
        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after expression",
            "parse_expr_stmt",
        )?;
        Ok(Stmt::Expr(expr))
    }

    fn expression(&mut self) -> Result<Rc<Expr>, ParserError> {
        self.substitution()
    }

    // 'sub' '{' (ID ':' expr (',' ID ':' expr)*)? '}' expr
    fn substitution(&mut self) -> Result<Rc<Expr>, ParserError> {
        if !self.eat(TokenKind::Sub) {
            return self.equality();
        }
        self.expect(
            TokenKind::LeftBrace,
            "Expected '{' after 'sub'",
            "parse_substitute",
        )?;

        let mut pairs = Vec::new();
        while self.peek_kind() == Some(TokenKind::Ident) {
            let name = self.identifier()?;
            self.expect(
                TokenKind::Colon,
                "Expected ':' after identifier",
                "parse_substitute",
            )?;
            let value = self.expression()?;
            pairs.push((name, value));

            match self.peek_kind() {
                Some(TokenKind::Comma) => {
                    self.advance();
                }
                Some(TokenKind::RightBrace) => break,
                _ => {
                    return Err(
                        self.error("Expected ',' or '}' after substitution", "parse_substitute")
                    )
                }
            }
        }
        self.expect(
            TokenKind::RightBrace,
            "Expected '}' after substitutions",
            "parse_substitute",
        )?;
        let body = self.expression()?;
        Ok(Rc::new(Expr::Substitute { pairs, body }))
    }

    // Non-associative: a second '==' in a chain is left for the statement
    // parser to reject at the ';' check.
    fn equality(&mut self) -> Result<Rc<Expr>, ParserError> {
        let left = self.implication()?;
        match self.peek_kind() {
            Some(TokenKind::EqualEqual) => {
                self.advance();
                let right = self.implication()?;
                // p == q  ~>  (p & q) | (!p & !q)
                let both = and(left.clone(), right.clone());
                let neither = and(not(left), not(right));
                Ok(or(both, neither))
            }
            Some(TokenKind::BangEqual) => {
                self.advance();
                let right = self.implication()?;
                // p != q  ~>  (p & !q) | (!p & q)
                let only_left = and(left.clone(), not(right.clone()));
                let only_right = and(not(left), right);
                Ok(or(only_left, only_right))
            }
            _ => Ok(left),
        }
    }

    // Right-associative: p -> q -> r parses as p -> (q -> r).
    fn implication(&mut self) -> Result<Rc<Expr>, ParserError> {
        let premise = self.disjunction()?;
        if self.eat(TokenKind::Arrow) {
            let conclusion = self.implication()?;
            // p -> q  ~>  !p | q
            Ok(or(not(premise), conclusion))
        } else {
            Ok(premise)
        }
    }

    fn disjunction(&mut self) -> Result<Rc<Expr>, ParserError> {
        let mut expr = self.conjunction()?;
        while self.eat(TokenKind::Or) {
            let right = self.conjunction()?;
            expr = or(expr, right);
        }
        Ok(expr)
    }

    fn conjunction(&mut self) -> Result<Rc<Expr>, ParserError> {
        let mut expr = self.quantifier()?;
        while self.eat(TokenKind::And) {
            let right = self.quantifier()?;
            expr = and(expr, right);
        }
        Ok(expr)
    }

    // ('exists' | 'forall') (ID | '(' ID+ ')') unary
    fn quantifier(&mut self) -> Result<Rc<Expr>, ParserError> {
        let quant = match self.peek_kind() {
            Some(TokenKind::Exists) => Quant::Exists,
            Some(TokenKind::Forall) => Quant::Forall,
            _ => return self.unary(),
        };
        self.advance();

        let mut bound = Vec::new();
        match self.peek_kind() {
            Some(TokenKind::Ident) => {
                bound.push(self.identifier()?);
            }
            Some(TokenKind::LeftParen) => {
                self.advance();
                if self.peek_kind() != Some(TokenKind::Ident) {
                    return Err(
                        self.error("Expected identifier after quantifier", "parse_quantifier")
                    );
                }
                while self.peek_kind() == Some(TokenKind::Ident) {
                    bound.push(self.identifier()?);
                }
                self.expect(
                    TokenKind::RightParen,
                    "Expected ')' after bound variables",
                    "parse_quantifier",
                )?;
            }
            _ => {
                return Err(
                    self.error("Expected '(' or identifier after quantifier", "parse_quantifier")
                )
            }
        }

        let body = self.unary()?;
        Ok(Rc::new(Expr::Quantified { quant, bound, body }))
    }

    fn unary(&mut self) -> Result<Rc<Expr>, ParserError> {
        if self.eat(TokenKind::Bang) {
            let operand = self.unary()?;
            Ok(not(operand))
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> Result<Rc<Expr>, ParserError> {
        match self.peek_kind() {
            Some(TokenKind::Ident) => Ok(Rc::new(Expr::Ident(self.identifier()?))),
            Some(TokenKind::IdLit(id)) => {
                self.advance();
                Ok(Rc::new(Expr::Lit(Lit::Id(id))))
            }
            Some(TokenKind::True) => {
                self.advance();
                Ok(Rc::new(Expr::Lit(Lit::True)))
            }
            Some(TokenKind::False) => {
                self.advance();
                Ok(Rc::new(Expr::Lit(Lit::False)))
            }
            Some(TokenKind::LeftParen) => {
                self.advance();
                let expr = self.expression()?;
                self.expect(
                    TokenKind::RightParen,
                    "Expected ')' after expression",
                    "parse_primary",
                )?;
                Ok(expr)
            }
            _ => Err(self.error("Expected identifier, literal, or '('", "parse_primary")),
        }
    }

    fn identifier(&mut self) -> Result<String, ParserError> {
        if let Some(token) = self.peek() {
            if token.kind == TokenKind::Ident {
                self.pos += 1;
                return Ok(token.lexeme.clone());
            }
        }
        Err(self.error("Expected identifier", "parse_ident"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::scan;

    fn parse_str(input: &str) -> Result<Vec<Stmt>, Vec<ParserError>> {
        parse(&scan(input).unwrap())
    }

    fn expr_str(input: &str) -> Rc<Expr> {
        parse_expression(&scan(input).unwrap()).unwrap()
    }

    #[test]
    fn test_parse_statement_kinds() {
        let stmts = parse_str(
            "bvar x y z;\
             set a = x & y;\
             set b = a | z;\
             set c = exists x (a & b);\
             display_tree a;",
        )
        .unwrap();

        assert_eq!(stmts.len(), 5);
        assert!(matches!(stmts[0], Stmt::Decl { .. }));
        assert!(matches!(stmts[1], Stmt::Assign { .. }));
        assert!(matches!(stmts[2], Stmt::Assign { .. }));
        assert!(matches!(stmts[3], Stmt::Assign { .. }));
        assert!(matches!(
            stmts[4],
            Stmt::Call {
                func: Func::DisplayTree,
                ..
            }
        ));
    }

    #[test]
    fn test_precedence_and_binds_tighter_than_or() {
        // x & y | z  =>  (x & y) | z
        let expr = expr_str("x & y | z");
        let Expr::Binary { left, op: Op::Or, .. } = &*expr else {
            panic!("expected top-level OR, got {:?}", expr);
        };
        assert!(matches!(&**left, Expr::Binary { op: Op::And, .. }));
    }

    #[test]
    fn test_implication_desugars() {
        // p -> q  =>  !p | q
        let expr = expr_str("x -> y");
        let Expr::Binary { left, right, op: Op::Or } = &*expr else {
            panic!("expected OR, got {:?}", expr);
        };
        assert!(matches!(&**left, Expr::Not(_)));
        assert!(matches!(&**right, Expr::Ident(name) if name == "y"));
    }

    #[test]
    fn test_equality_desugars() {
        // p == q  =>  (p & q) | (!p & !q)
        let expr = expr_str("x == y");
        let Expr::Binary { left, right, op: Op::Or } = &*expr else {
            panic!("expected OR, got {:?}", expr);
        };
        assert!(matches!(&**left, Expr::Binary { op: Op::And, .. }));
        let Expr::Binary { left: nl, right: nr, op: Op::And } = &**right else {
            panic!("expected AND");
        };
        assert!(matches!(&**nl, Expr::Not(_)));
        assert!(matches!(&**nr, Expr::Not(_)));
    }

    #[test]
    fn test_equality_non_associative() {
        let errors = parse_str("x == y == z;").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("Expected ';'"));
    }

    #[test]
    fn test_quantifier_sugar_single_identifier() {
        // forall x x | x  =>  (forall x x) | x
        let expr = expr_str("forall x x | x");
        let Expr::Binary { left, op: Op::Or, .. } = &*expr else {
            panic!("expected OR, got {:?}", expr);
        };
        assert!(matches!(&**left, Expr::Quantified { quant: Quant::Forall, .. }));
    }

    #[test]
    fn test_quantifier_bound_list() {
        let expr = expr_str("exists (x y) (x & y)");
        let Expr::Quantified { quant: Quant::Exists, bound, .. } = &*expr else {
            panic!("expected quantifier, got {:?}", expr);
        };
        assert_eq!(bound, &["x", "y"]);
    }

    #[test]
    fn test_substitution_pairs_keep_order() {
        let expr = expr_str("sub { x: y, y: z } (x & y)");
        let Expr::Substitute { pairs, .. } = &*expr else {
            panic!("expected substitution, got {:?}", expr);
        };
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "x");
        assert_eq!(pairs[1].0, "y");
    }

    #[test]
    fn test_error_recovery_resyncs_at_semicolon() {
        let errors = parse_str("set = x; bvar ; set a = x;").unwrap_err();
        // Two bad statements, each reported; the batch as a whole fails
        // even though the last statement is fine.
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("ParserError"));
    }

    #[test]
    fn test_zero_argument_call() {
        let stmts = parse_str("sweep;").unwrap();
        assert!(matches!(
            &stmts[0],
            Stmt::Call { func: Func::Sweep, args } if args.is_empty()
        ));
    }

    #[test]
    fn test_unterminated_statement() {
        let errors = parse_str("x & y").unwrap_err();
        assert!(errors[0].to_string().contains("<end of input>"));
    }
}

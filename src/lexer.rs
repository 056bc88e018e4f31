//! The scanner.
//!
//! Whitespace-insensitive, single pass. An unrecognized character aborts
//! the whole input: partial token streams are never handed to the parser.

use crate::error::LexerError;
use crate::token::{keyword, Token, TokenKind};

fn is_lexeme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Scans `source` into a token stream.
pub fn scan(source: &str) -> Result<Vec<Token>, LexerError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '(' => tokens.push(Token::new(TokenKind::LeftParen, "(")),
            ')' => tokens.push(Token::new(TokenKind::RightParen, ")")),
            '{' => tokens.push(Token::new(TokenKind::LeftBrace, "{")),
            '}' => tokens.push(Token::new(TokenKind::RightBrace, "}")),
            '&' => tokens.push(Token::new(TokenKind::And, "&")),
            '|' => tokens.push(Token::new(TokenKind::Or, "|")),
            ';' => tokens.push(Token::new(TokenKind::Semicolon, ";")),
            ',' => tokens.push(Token::new(TokenKind::Comma, ",")),
            ':' => tokens.push(Token::new(TokenKind::Colon, ":")),
            '=' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::new(TokenKind::EqualEqual, "=="));
                    i += 1;
                } else {
                    tokens.push(Token::new(TokenKind::Equal, "="));
                }
            }
            '!' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::new(TokenKind::BangEqual, "!="));
                    i += 1;
                } else {
                    tokens.push(Token::new(TokenKind::Bang, "!"));
                }
            }
            '-' => {
                if chars.get(i + 1) == Some(&'>') {
                    tokens.push(Token::new(TokenKind::Arrow, "->"));
                    i += 1;
                } else {
                    tokens.push(Token::new(TokenKind::Minus, "-"));
                }
            }
            ' ' | '\t' | '\r' | '\n' => {}
            _ if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && is_lexeme_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                match keyword(&word) {
                    Some(kind) => tokens.push(Token::new(kind, word)),
                    None => tokens.push(Token::new(TokenKind::Ident, word)),
                }
                continue;
            }
            _ if c.is_ascii_digit() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                let value = word.parse::<u32>().map_err(|_| LexerError {
                    message: format!("integer literal out of range: `{}`", word),
                    function: "scan",
                })?;
                tokens.push(Token::new(TokenKind::IdLit(value), word));
                continue;
            }
            _ => {
                return Err(LexerError {
                    message: format!("unexpected character `{}`", c),
                    function: "scan",
                });
            }
        }
        i += 1;
    }
    Ok(tokens)
}

//! User-visible error types.
//!
//! Three categories surface to the user, each tagged with its category,
//! the originating function and the offending lexeme or id. Invariant
//! violations inside the engine are not errors but panics
//! (`unreachable!`/`debug_assert!`) and propagate uncaught.

use thiserror::Error;

/// An unrecognized character. The whole input is discarded.
#[derive(Debug, Clone, Error)]
#[error("LexerError: [{function}] {message}")]
pub struct LexerError {
    pub message: String,
    pub function: &'static str,
}

/// A violated grammar rule. The parser resyncs at the next `;` and keeps
/// collecting, but a batch with any parser error is rejected as a whole.
#[derive(Debug, Clone, Error)]
#[error("ParserError: [{function}] {message}, but next token is `{found}`")]
pub struct ParserError {
    pub message: String,
    pub found: String,
    pub function: &'static str,
}

/// A domain error raised while executing a statement.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("ExecutionError: [{function}] unknown identifier `{name}`")]
    UnknownName { name: String, function: &'static str },

    #[error("ExecutionError: [{function}] no BDD with id {id}")]
    UnknownId { id: u32, function: &'static str },

    #[error("ExecutionError: [{function}] `{name}` is not a symbolic variable")]
    NotABddVariable { name: String, function: &'static str },

    #[error("ExecutionError: [{func}] expected {expected} argument(s), got {got}")]
    Arity {
        func: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("ExecutionError: [{func}] {message}")]
    BadArgument { func: &'static str, message: String },

    #[error("ExecutionError: [source] Failed to open file `{path}`: {source}")]
    SourceIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_category_and_function() {
        let err = LexerError {
            message: "unexpected character `+`".to_owned(),
            function: "scan",
        };
        assert_eq!(err.to_string(), "LexerError: [scan] unexpected character `+`");

        let err = ExecutionError::UnknownName {
            name: "a".to_owned(),
            function: "build",
        };
        assert_eq!(err.to_string(), "ExecutionError: [build] unknown identifier `a`");

        let err = ExecutionError::Arity {
            func: "is_sat",
            expected: 1,
            got: 2,
        };
        assert!(err.to_string().contains("is_sat"));
        assert!(err.to_string().starts_with("ExecutionError:"));
    }
}

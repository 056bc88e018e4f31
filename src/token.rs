//! Tokens of the scripting language.

/// The kind of a scanned token. Integer literals carry their parsed value;
/// everything else is identified by the lexeme on the [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    And,
    Or,
    Semicolon,
    Comma,
    Colon,

    // Single- or double-character tokens
    Equal,
    EqualEqual,
    Bang,
    BangEqual,
    Arrow,
    Minus,

    // Literals and names
    Ident,
    IdLit(u32),
    True,
    False,

    // Keywords
    Bvar,
    Set,
    Sub,
    Exists,
    Forall,

    // Function keywords
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
        }
    }
}

/// Resolves a scanned word to its keyword kind, if it is one.
pub fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "bvar" => TokenKind::Bvar,
        "set" => TokenKind::Set,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "sub" => TokenKind::Sub,
        "exists" => TokenKind::Exists,
        "forall" => TokenKind::Forall,
        "display_tree" => TokenKind::DisplayTree,
        "display_graph" => TokenKind::DisplayGraph,
        "is_sat" => TokenKind::IsSat,
        "source" => TokenKind::Source,
        "clear_cache" => TokenKind::ClearCache,
        "preserve" => TokenKind::Preserve,
        "preserve_all" => TokenKind::PreserveAll,
        "unpreserve" => TokenKind::Unpreserve,
        "unpreserve_all" => TokenKind::UnpreserveAll,
        "sweep" => TokenKind::Sweep,
        _ => return None,
    };
    Some(kind)
}

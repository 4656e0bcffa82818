//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens serialize to SQLite text. Bound values travel with the stream:
//! a [`Token::Param`] renders as a `?` placeholder and contributes its value
//! to [`TokenStream::params`] in rendering order, so the SQL text and its
//! parameter list can never drift apart.

use rusqlite::types::Value;

/// SQL Token - every element the lookup queries are built from.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    Distinct,
    From,
    Where,
    And,
    As,
    On,
    Join,
    Inner,
    LeftOuter,
    GroupBy,
    OrderBy,
    Asc,
    Limit,
    Like,
    Escape,
    Exists,

    // === Punctuation ===
    Comma,
    Dot,
    LParen,
    RParen,

    // === Operators ===
    Eq,

    // === Whitespace / Formatting ===
    Space,
    Newline,
    Indent(usize),

    // === Dynamic Content ===
    /// Identifier (table, column, alias), always double-quoted.
    Ident(String),
    /// Integer literal
    LitInt(i64),
    /// String literal
    LitString(String),
    /// Function name, rendered upper-case.
    FunctionName(String),
    /// Bound parameter, rendered as `?`.
    Param(Value),
}

impl Token {
    /// Serialize this token to SQLite text.
    pub fn serialize(&self) -> String {
        match self {
            // Keywords
            Token::Select => "SELECT".into(),
            Token::Distinct => "DISTINCT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::As => "AS".into(),
            Token::On => "ON".into(),
            Token::Join => "JOIN".into(),
            Token::Inner => "INNER".into(),
            Token::LeftOuter => "LEFT OUTER".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Asc => "ASC".into(),
            Token::Limit => "LIMIT".into(),
            Token::Like => "LIKE".into(),
            Token::Escape => "ESCAPE".into(),
            Token::Exists => "EXISTS".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            // Operators
            Token::Eq => "=".into(),

            // Whitespace
            Token::Space => " ".into(),
            Token::Newline => "\n".into(),
            Token::Indent(n) => "  ".repeat(*n),

            Token::Ident(name) => quote_identifier(name),
            Token::LitInt(n) => n.to_string(),
            Token::LitString(s) => quote_string(s),
            Token::FunctionName(name) => name.to_uppercase(),
            Token::Param(_) => "?".into(),
        }
    }
}

/// Quote an identifier with double quotes, doubling embedded quotes.
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a string literal with single quotes, doubling embedded quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self) -> String {
        self.tokens.iter().map(Token::serialize).collect()
    }

    /// Values bound to the `?` placeholders, in placeholder order.
    pub fn params(&self) -> Vec<Value> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Param(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }

    /// The same stream laid out on one line: newlines become spaces and
    /// indentation is dropped. Used to embed subqueries.
    pub fn inline(&self) -> TokenStream {
        let tokens = self
            .tokens
            .iter()
            .filter_map(|t| match t {
                Token::Newline => Some(Token::Space),
                Token::Indent(_) => None,
                other => Some(other.clone()),
            })
            .collect();
        TokenStream { tokens }
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }
    pub fn indent(&mut self, n: usize) -> &mut Self {
        self.push(Token::Indent(n))
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}

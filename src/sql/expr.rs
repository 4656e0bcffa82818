//! Expression AST - the core of SQL expression building.
//!
//! This module provides a strongly-typed AST for the predicates, join
//! conditions and select items the lookup queries need, with exhaustive
//! pattern matching enforced by the compiler.

use rusqlite::types::Value;

use super::query::Query;
use super::token::{Token, TokenStream};

/// Escape character used by every `LIKE` predicate built here.
pub const LIKE_ESCAPE: char = '\\';

// =============================================================================
// Expression AST
// =============================================================================

/// A SQL expression.
///
/// Every variant must be handled in `to_tokens()` - the compiler enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference: optional_table.column
    Column {
        table: Option<String>,
        column: String,
    },

    /// Literal values
    Literal(Literal),

    /// Bound parameter. User input only ever reaches the SQL text this way.
    Param(Value),

    /// Binary operation: left op right
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },

    /// Function call: name([DISTINCT] args...)
    Function {
        name: String,
        args: Vec<Expr>,
        distinct: bool,
    },

    /// LIKE with ESCAPE: expr LIKE pattern ESCAPE escape_char
    LikeEscape {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: char,
    },

    /// Correlated subquery test: EXISTS (subquery)
    Exists(Box<Query>),
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Eq,
    // Logical
    And,
}

fn binary_op_to_token(op: BinaryOperator) -> Token {
    match op {
        BinaryOperator::Eq => Token::Eq,
        BinaryOperator::And => Token::And,
    }
}

impl Expr {
    /// Convert to a token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        match self {
            Expr::Column { table, column } => {
                if let Some(t) = table {
                    ts.push(Token::Ident(t.clone()));
                    ts.push(Token::Dot);
                }
                ts.push(Token::Ident(column.clone()));
            }

            Expr::Literal(lit) => {
                ts.push(match lit {
                    Literal::Int(n) => Token::LitInt(*n),
                });
            }

            Expr::Param(value) => {
                ts.push(Token::Param(value.clone()));
            }

            Expr::BinaryOp { left, op, right } => {
                ts.append(&left.to_tokens());
                ts.space();
                ts.push(binary_op_to_token(*op));
                ts.space();
                ts.append(&right.to_tokens());
            }

            Expr::Function {
                name,
                args,
                distinct,
            } => {
                ts.push(Token::FunctionName(name.clone()));
                ts.lparen();
                if *distinct {
                    ts.push(Token::Distinct).space();
                }
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    ts.append(&arg.to_tokens());
                }
                ts.rparen();
            }

            Expr::LikeEscape {
                expr,
                pattern,
                escape_char,
            } => {
                ts.append(&expr.to_tokens())
                    .space()
                    .push(Token::Like)
                    .space()
                    .append(&pattern.to_tokens())
                    .space()
                    .push(Token::Escape)
                    .space()
                    .push(Token::LitString(escape_char.to_string()));
            }

            Expr::Exists(query) => {
                ts.push(Token::Exists)
                    .space()
                    .lparen()
                    .append(&query.to_tokens().inline())
                    .rparen();
            }
        }

        ts
    }
}

// =============================================================================
// Builder DSL
// =============================================================================

/// Table-qualified column reference.
pub fn table_col(table: &str, column: &str) -> Expr {
    Expr::Column {
        table: Some(table.into()),
        column: column.into(),
    }
}

pub fn lit_int(n: i64) -> Expr {
    Expr::Literal(Literal::Int(n))
}

/// Bound parameter.
pub fn param(value: impl Into<Value>) -> Expr {
    Expr::Param(value.into())
}

/// `EXISTS (query)`, rendered on one line.
pub fn exists(query: Query) -> Expr {
    Expr::Exists(Box::new(query))
}

/// `GROUP_CONCAT(DISTINCT expr)`.
///
/// SQLite only accepts a single argument for DISTINCT aggregates, so the
/// separator is always the default `,`.
pub fn group_concat_distinct(expr: Expr) -> Expr {
    Expr::Function {
        name: "group_concat".into(),
        args: vec![expr],
        distinct: true,
    }
}

/// Escape `text` for use inside a `LIKE` pattern and wrap it in `%...%`,
/// so the user's text is matched literally as a substring.
pub fn contains_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if c == LIKE_ESCAPE || c == '%' || c == '_' {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Extension trait for fluent expression building.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    // Comparison operators
    fn eq(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Eq, other.into())
    }

    // Logical operators
    fn and(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::And, other.into())
    }

    /// Case-insensitive (ASCII) substring match against a bound parameter.
    fn contains(self, text: &str) -> Expr {
        Expr::LikeEscape {
            expr: Box::new(self.into_expr()),
            pattern: Box::new(param(contains_pattern(text))),
            escape_char: LIKE_ESCAPE,
        }
    }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        lit_int(n)
    }
}

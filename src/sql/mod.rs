//! SQL generation module.
//!
//! A small type-safe builder for the SQLite statements the lookup engine
//! issues. It includes:
//!
//! - [`query`] - SELECT query builder
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//!
//! User input never reaches the SQL text: it enters as [`Expr::Param`] and
//! comes out of [`Query::build`] as a bound value.

pub mod expr;
pub mod query;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use expr::{
    contains_pattern, exists, group_concat_distinct, lit_int, param, table_col, BinaryOperator,
    Expr, ExprExt, Literal,
};
pub use query::{Join, JoinType, OrderByExpr, Query, SelectExpr, Statement};
pub use token::{Token, TokenStream};

//! Query builder - construct SELECT statements with a fluent API.

use rusqlite::types::Value;

use super::expr::{Expr, ExprExt};
use super::token::{Token, TokenStream};

// =============================================================================
// Select Expression (column with optional alias)
// =============================================================================

/// A SELECT list item: expression with optional alias.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct SelectExpr {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl SelectExpr {
    pub fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = self.expr.to_tokens();
        if let Some(alias) = &self.alias {
            ts.space()
                .push(Token::As)
                .space()
                .push(Token::Ident(alias.clone()));
        }
        ts
    }
}

impl From<Expr> for SelectExpr {
    fn from(expr: Expr) -> Self {
        SelectExpr::new(expr)
    }
}

// =============================================================================
// Joins
// =============================================================================

/// Type of join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    /// `LEFT OUTER JOIN`: keeps the left row when nothing matches.
    Left,
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub join_type: JoinType,
    pub table: String,
    pub on: Expr,
}

impl Join {
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        match self.join_type {
            JoinType::Inner => ts.push(Token::Inner),
            JoinType::Left => ts.push(Token::LeftOuter),
        };

        ts.space()
            .push(Token::Join)
            .space()
            .push(Token::Ident(self.table.clone()))
            .space()
            .push(Token::On)
            .space()
            .append(&self.on.to_tokens());

        ts
    }
}

// =============================================================================
// ORDER BY
// =============================================================================

/// An ascending ORDER BY expression.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct OrderByExpr {
    pub expr: Expr,
}

impl OrderByExpr {
    pub fn asc(expr: Expr) -> Self {
        Self { expr }
    }

    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = self.expr.to_tokens();
        ts.space().push(Token::Asc);
        ts
    }
}

// =============================================================================
// Statement
// =============================================================================

/// Rendered SQL text plus the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

// =============================================================================
// Query Builder
// =============================================================================

/// A SELECT query.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "Query has no effect until converted to SQL with build()"]
pub struct Query {
    pub select: Vec<SelectExpr>,
    pub distinct: bool,
    pub from: Option<String>,
    pub joins: Vec<Join>,
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<u64>,
}

impl Query {
    /// Create a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SELECT list.
    pub fn select(mut self, exprs: Vec<impl Into<SelectExpr>>) -> Self {
        self.select = exprs.into_iter().map(|e| e.into()).collect();
        self
    }

    /// Add DISTINCT.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the FROM table.
    pub fn from(mut self, table: &str) -> Self {
        self.from = Some(table.into());
        self
    }

    /// Add a JOIN.
    pub fn join(mut self, join_type: JoinType, table: &str, on: Expr) -> Self {
        self.joins.push(Join {
            join_type,
            table: table.into(),
            on,
        });
        self
    }

    /// Add an INNER JOIN.
    pub fn inner_join(self, table: &str, on: Expr) -> Self {
        self.join(JoinType::Inner, table, on)
    }

    /// Add a LEFT OUTER JOIN.
    pub fn left_join(self, table: &str, on: Expr) -> Self {
        self.join(JoinType::Left, table, on)
    }

    /// Add a WHERE condition (ANDed with existing conditions).
    pub fn filter(mut self, condition: Expr) -> Self {
        self.where_clause = Some(match self.where_clause {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    /// Add a WHERE condition only when `condition` is `Some`.
    pub fn filter_opt(self, condition: Option<Expr>) -> Self {
        match condition {
            Some(c) => self.filter(c),
            None => self,
        }
    }

    /// Set the GROUP BY clause.
    pub fn group_by(mut self, exprs: Vec<Expr>) -> Self {
        self.group_by = exprs;
        self
    }

    /// Set the ORDER BY clause.
    pub fn order_by(mut self, exprs: Vec<OrderByExpr>) -> Self {
        self.order_by = exprs;
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        // SELECT
        ts.push(Token::Select);
        if self.distinct {
            ts.space().push(Token::Distinct);
        }

        // Columns
        for (i, select_expr) in self.select.iter().enumerate() {
            if i == 0 {
                ts.newline().indent(1);
            } else {
                ts.comma().newline().indent(1);
            }
            ts.append(&select_expr.to_tokens());
        }

        // FROM
        if let Some(from) = &self.from {
            ts.newline()
                .push(Token::From)
                .space()
                .push(Token::Ident(from.clone()));
        }

        // JOINs
        for join in &self.joins {
            ts.newline();
            ts.append(&join.to_tokens());
        }

        // WHERE
        if let Some(where_clause) = &self.where_clause {
            ts.newline().push(Token::Where).space();
            ts.append(&where_clause.to_tokens());
        }

        // GROUP BY
        if !self.group_by.is_empty() {
            ts.newline().push(Token::GroupBy).space();
            for (i, expr) in self.group_by.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&expr.to_tokens());
            }
        }

        // ORDER BY
        if !self.order_by.is_empty() {
            ts.newline().push(Token::OrderBy).space();
            for (i, order_expr) in self.order_by.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&order_expr.to_tokens());
            }
        }

        // LIMIT
        if let Some(limit) = self.limit {
            ts.newline()
                .push(Token::Limit)
                .space()
                .push(Token::LitInt(limit as i64));
        }

        ts
    }

    /// Render SQL text together with its bound parameters.
    pub fn build(&self) -> Statement {
        let ts = self.to_tokens();
        Statement {
            sql: ts.serialize(),
            params: ts.params(),
        }
    }
}

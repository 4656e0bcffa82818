//! Test utilities for SQL emission validation.
//!
//! Provides helpers for validating that emitted SQL is syntactically correct
//! using sqlparser-rs for roundtrip validation.

use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

/// Validates that a SQL string is syntactically valid SQLite.
///
/// Uses sqlparser-rs to parse the SQL and returns an error if parsing fails.
/// This provides roundtrip validation to ensure emitted SQL is always valid.
///
/// # Example
///
/// ```ignore
/// use crate::sql::test_utils::validate_sql;
///
/// validate_sql("SELECT * FROM objects").unwrap();
/// ```
pub fn validate_sql(sql: &str) -> Result<(), String> {
    Parser::parse_sql(&SQLiteDialect {}, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQLite: {}\nSQL: {}", e, sql))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_sql() {
        validate_sql("SELECT * FROM objects").unwrap();
        validate_sql("SELECT \"label\" FROM \"objects\" WHERE \"id\" = ?").unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        let result = validate_sql("SELEC * FORM objects");
        assert!(result.is_err());
    }
}

//! Query engine error types.

use thiserror::Error;

use crate::normalize::TimespanError;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while answering a lookup.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The detail query matched no rows.
    #[error("no object matches the requested id")]
    NotFound,

    /// The store rejected or failed the query.
    #[error(transparent)]
    Store(#[from] rusqlite::Error),

    /// An agent date in the store is not `YYYY-MM-DD`.
    #[error(transparent)]
    Date(#[from] TimespanError),
}

impl QueryError {
    /// The single line of text sent back to the client for this error.
    pub fn client_message(&self) -> String {
        match self {
            Self::NotFound => "Invalid id".to_string(),
            Self::Store(err) => err.to_string(),
            Self::Date(err) => err.to_string(),
        }
    }
}

//! Query engine: the two lookup modes over the collection store.
//!
//! Both modes run the same three-stage pipeline, expressed as capability
//! traits so each stage can be exercised on its own:
//!
//! ```text
//! Search::fetch_rows ──▶ CleanRows::clean_rows ──▶ FormatRows::format_rows
//!   (parameterized join)   (dedup / reshape)         (response payload)
//! ```
//!
//! | Mode | Request | Response |
//! |------|---------|----------|
//! | [`DetailQuery`] | [`ObjectId`](crate::model::ObjectId) | [`DetailResponse`] |
//! | [`FilterQuery`] | [`FilterParams`] | [`FilterResponse`] |

mod detail;
mod error;
mod filter;

pub use detail::{
    detail_statement, DetailQuery, DetailResponse, COLUMNS_INFORMATION, COLUMNS_PRODUCED_BY,
    FORMAT_INFORMATION, FORMAT_PRODUCED,
};
pub use error::{QueryError, QueryResult};
pub use filter::{filter_statement, FilterParams, FilterQuery, FilterResponse, FilterRow, COLUMNS};

use serde::Serialize;

/// Maximum number of rows any response carries.
pub const DEFAULT_ROW_LIMIT: usize = 1000;

/// Reshape raw store rows into the mode's intermediate form.
pub trait CleanRows {
    /// One row as read from the store.
    type Row;
    /// Cleaned intermediate form.
    type Clean;

    fn clean_rows(&self, rows: Vec<Self::Row>) -> QueryResult<Self::Clean>;
}

/// Turn cleaned rows into the payload written to the client.
pub trait FormatRows: CleanRows {
    type Response: Serialize;

    fn format_rows(&self, clean: Self::Clean) -> Self::Response;
}

/// Execute a lookup end to end.
pub trait Search: FormatRows {
    type Request;

    /// Run the parameterized query and read every row.
    fn fetch_rows(&self, request: &Self::Request) -> QueryResult<Vec<Self::Row>>;

    fn search(&self, request: &Self::Request) -> QueryResult<Self::Response> {
        let rows = self.fetch_rows(request)?;
        let clean = self.clean_rows(rows)?;
        Ok(self.format_rows(clean))
    }
}

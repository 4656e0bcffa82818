//! Read-only access to the SQLite collection store.
//!
//! # Design
//!
//! - The store location is injected at construction; there is no global path
//! - Every query opens a fresh read-only connection and drops it (with its
//!   prepared statement) before returning, on success and on error alike
//! - Statements arrive pre-rendered from the [`sql`](crate::sql) builder, so
//!   user values are always bound, never spliced into SQL text

pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params_from_iter, Connection, OpenFlags, Row};

use crate::sql::Statement;

/// Handle on the store location. Cheap to clone; holds no open connection.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection scoped to one request.
    fn open(&self) -> rusqlite::Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    /// Execute `statement` and map every result row through `map`.
    pub fn query_rows<T, F>(&self, statement: &Statement, mut map: F) -> rusqlite::Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&statement.sql)?;
        let rows = stmt
            .query_map(params_from_iter(statement.params.iter()), |row| map(row))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

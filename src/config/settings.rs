//! Server settings.
//!
//! The command line supplies only the port; everything else has a fixed
//! default that callers (tests in particular) may override with the
//! builder methods:
//!
//! ```
//! use lux::config::ServerConfig;
//!
//! let config = ServerConfig::new(55555).with_database("/tmp/lux.sqlite");
//! assert_eq!(config.port, 55555);
//! assert_eq!(config.row_limit, 1000);
//! ```

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::query::DEFAULT_ROW_LIMIT;
use crate::store::Store;

/// Store used when none is configured.
pub const DEFAULT_DATABASE: &str = "./lux.sqlite";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("port must be an integer 0-65535")]
    InvalidPort(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port to listen on (0 = let the OS choose).
    pub port: u16,

    /// Path of the SQLite collection store.
    pub database: PathBuf,

    /// Maximum rows per response (agents in a detail response, objects in a
    /// filter response).
    pub row_limit: usize,
}

impl ServerConfig {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            database: PathBuf::from(DEFAULT_DATABASE),
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }

    pub fn with_database(mut self, database: impl Into<PathBuf>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Address to bind: every interface on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Store handle for the configured database.
    pub fn store(&self) -> Store {
        Store::new(&self.database)
    }
}

/// Parse a port argument: an integer in `0..=65535`.
pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(value.to_string()))
}

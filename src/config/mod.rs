//! Configuration module for the lookup server.
//!
//! Holds the typed server configuration that is injected into the store and
//! query engine at construction.

mod settings;

pub use settings::{parse_port, ConfigError, ServerConfig, DEFAULT_DATABASE};

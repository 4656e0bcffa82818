//! # Lux
//!
//! A small lookup server over a museum collection store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          server (TCP, one JSON line per request)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [protocol::Route]
//! ┌─────────────────────────────────────────────────────────┐
//! │     query (DetailQuery by id / FilterQuery by text)      │
//! │          built with the sql token/expr/query builder     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [store, read-only SQLite]
//! ┌─────────────────────────────────────────────────────────┐
//! │     normalize (flattened join rows → nested record)      │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod model;
pub mod normalize;
pub mod query;
pub mod server;
pub mod sql;
pub mod store;

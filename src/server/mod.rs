//! TCP front end of the lookup server.
//!
//! One request per connection, one response per request:
//!
//! ```text
//! client ──"{json}\n"──▶ Listener::accept ──▶ Dispatcher::handle
//!                                               │ decode  (protocol)
//!                                               │ route   Detail(id) | Filter(params)
//!                                               │ search  (spawn_blocking)
//! client ◀──"{json}\n" | "error text\n"─────────┘ write, flush, close
//! ```
//!
//! Connections are served strictly one at a time.

mod dispatch;
mod error;
mod listener;
mod protocol;

pub use dispatch::Dispatcher;
pub use error::{ServerError, ServerResult};
pub use listener::Listener;
pub use protocol::{Reply, Request, Route};

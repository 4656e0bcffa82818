//! Transport and protocol error types.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while listening or serving a connection.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Failed to bind the listening socket. Fatal.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Failed to read a socket's local address.
    #[error("failed to read local address: {0}")]
    LocalAddr(#[source] io::Error),

    /// Failed to accept an incoming connection.
    #[error("failed to accept connection: {0}")]
    AcceptFailed(#[source] io::Error),

    /// Failed to read the request line.
    #[error("failed to read request: {0}")]
    ReadFailed(#[source] io::Error),

    /// Failed to write the response line.
    #[error("failed to write response: {0}")]
    WriteFailed(#[source] io::Error),

    /// The peer closed the connection without sending anything.
    #[error("client closed the connection before sending a request")]
    ClientCrashed,

    /// The request line is not a JSON request object.
    #[error("malformed request: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    /// Failed to serialize a response payload.
    #[error("failed to serialize response: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    /// The blocking query task panicked or was cancelled.
    #[error("query task failed: {0}")]
    TaskFailed(#[source] tokio::task::JoinError),
}

impl ServerError {
    /// Protocol errors abort the connection silently; everything else is a
    /// transport or internal failure.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::ClientCrashed | Self::MalformedRequest(_))
    }
}

//! Per-connection request handling.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use super::error::{ServerError, ServerResult};
use super::protocol::{Reply, Request, Route};
use crate::config::ServerConfig;
use crate::query::{DetailQuery, FilterQuery, QueryResult, Search};

/// Routes decoded requests to the two query modes.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    detail: DetailQuery,
    filter: FilterQuery,
}

impl Dispatcher {
    pub fn new(config: &ServerConfig) -> Self {
        let store = config.store();
        Self {
            detail: DetailQuery::new(store.clone()).with_agent_limit(config.row_limit),
            filter: FilterQuery::new(store).with_row_limit(config.row_limit),
        }
    }

    /// Answer a routed request. Blocks on the store.
    pub fn answer(&self, route: &Route) -> Reply {
        let result = match route {
            Route::Detail(id) => self.detail.search(id).map(Reply::Detail),
            Route::Filter(params) => self.filter.search(params).map(Reply::Filter),
        };
        reply_or_error(result)
    }

    /// Serve one connection: read a request line, answer it, write one
    /// response line, flush, and close the write side.
    ///
    /// Protocol errors ([`ServerError::is_protocol`]) end the connection
    /// without writing anything.
    pub async fn handle<S>(&self, stream: S) -> ServerResult<Reply>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut stream = BufReader::new(stream);
        let mut line = String::new();

        let read = stream
            .read_line(&mut line)
            .await
            .map_err(ServerError::ReadFailed)?;
        if read == 0 {
            return Err(ServerError::ClientCrashed);
        }

        let route = Request::decode(&line)?.route();
        debug!(?route, "request decoded");

        let dispatcher = self.clone();
        let reply = tokio::task::spawn_blocking(move || dispatcher.answer(&route))
            .await
            .map_err(ServerError::TaskFailed)?;

        let out = reply.to_line()?;
        stream
            .write_all(out.as_bytes())
            .await
            .map_err(ServerError::WriteFailed)?;
        stream.flush().await.map_err(ServerError::WriteFailed)?;
        stream.shutdown().await.map_err(ServerError::WriteFailed)?;

        info!(kind = reply.kind(), bytes = out.len(), "response sent");
        Ok(reply)
    }
}

fn reply_or_error(result: QueryResult<Reply>) -> Reply {
    result.unwrap_or_else(|err| Reply::Error(err.client_message()))
}

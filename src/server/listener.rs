//! Sequential accept loop.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket};
use tracing::{error, info, warn};

use super::dispatch::Dispatcher;
use super::error::{ServerError, ServerResult};
use crate::config::ServerConfig;

const BACKLOG: u32 = 1024;

/// A bound listening socket plus the dispatcher that serves it.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    dispatcher: Dispatcher,
}

impl Listener {
    /// Bind `0.0.0.0:<port>`. Must be called inside a tokio runtime.
    pub fn bind(config: &ServerConfig) -> ServerResult<Self> {
        let addr = config.bind_addr();
        let bind_err = |source| ServerError::Bind { addr, source };

        let socket = TcpSocket::new_v4().map_err(bind_err)?;
        #[cfg(unix)]
        socket.set_reuseaddr(true).map_err(bind_err)?;
        socket.bind(addr).map_err(bind_err)?;
        let inner = socket.listen(BACKLOG).map_err(bind_err)?;

        Ok(Self {
            inner,
            dispatcher: Dispatcher::new(config),
        })
    }

    /// The address actually bound (resolves port 0).
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        self.inner.local_addr().map_err(ServerError::LocalAddr)
    }

    /// Accept and fully serve a single connection.
    pub async fn serve_one(&self) -> ServerResult<()> {
        let (stream, peer) = self.inner.accept().await.map_err(ServerError::AcceptFailed)?;
        let server = stream.local_addr().map_err(ServerError::LocalAddr)?;
        info!(%server, client = %peer, "connection accepted");

        match self.dispatcher.handle(stream).await {
            Ok(_) => Ok(()),
            Err(ServerError::ClientCrashed) => {
                warn!(client = %peer, "client crashed before sending a request");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Serve connections forever, one at a time. Per-connection failures are
    /// logged and the loop continues.
    pub async fn run(self) {
        info!(addr = ?self.inner.local_addr().ok(), "listening");
        loop {
            if let Err(err) = self.serve_one().await {
                if err.is_protocol() {
                    warn!(%err, "request dropped");
                } else {
                    error!(%err, "connection failed");
                }
            }
        }
    }
}

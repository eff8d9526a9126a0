//! Accept loop and server handle.
//!
//! # Data Flow
//! ```text
//! Server::serve
//!     → net::Listener::bind
//!     → spawned accept loop
//!         accept ok    → tokio::spawn(serve_connection)
//!         accept error → closed flag set? stop : log and keep going
//! Server::close
//!     → Shutdown::trigger (flag, then wake the loop)
//! ```

pub mod handler;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::lifecycle::Shutdown;
use crate::net::{serve_connection, ConnectionTracker, Listener, ListenerError};

pub use handler::{Handler, HandlerError};

/// A running server. Dropping the handle does not stop it; call `close`.
#[derive(Debug)]
pub struct Server {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    connections: ConnectionTracker,
    accept_task: JoinHandle<()>,
}

impl Server {
    /// Bind the listener and start accepting connections in the background.
    pub async fn serve<F>(config: &ServerConfig, handler: F) -> Result<Self, ListenerError>
    where
        F: Fn(&mut Vec<u8>, &crate::request::Request) -> Result<(), HandlerError>
            + Send
            + Sync
            + 'static,
    {
        Self::serve_with_shutdown(config, Arc::new(handler), Shutdown::new()).await
    }

    /// Like [`serve`](Self::serve), stopping when `shutdown` is triggered.
    pub async fn serve_with_shutdown(
        config: &ServerConfig,
        handler: Arc<Handler>,
        shutdown: Shutdown,
    ) -> Result<Self, ListenerError> {
        let listener = Listener::bind(&config.listener).await?;
        let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;
        let connections = ConnectionTracker::new();

        let accept_task = tokio::spawn(accept_loop(
            listener,
            handler,
            shutdown.clone(),
            connections.clone(),
            config.parser.read_buffer_size,
        ));

        Ok(Self {
            local_addr,
            shutdown,
            connections,
            accept_task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Number of connections currently being served.
    pub fn active_connections(&self) -> u64 {
        self.connections.active_count()
    }

    /// Stop accepting new connections. In-flight workers run to completion.
    pub fn close(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the accept loop to exit.
    pub async fn closed(self) {
        if let Err(e) = self.accept_task.await {
            tracing::error!(error = %e, "Accept loop panicked");
        }
    }
}

async fn accept_loop(
    listener: Listener,
    handler: Arc<Handler>,
    shutdown: Shutdown,
    connections: ConnectionTracker,
    buffer_size: usize,
) {
    let mut shutdown_rx = shutdown.subscribe();

    loop {
        let accepted = if shutdown.is_triggered() {
            Err(ListenerError::Closed)
        } else {
            tokio::select! {
                res = listener.accept() => res,
                _ = shutdown_rx.recv() => Err(ListenerError::Closed),
            }
        };

        let (mut stream, peer_addr, permit) = match accepted {
            Ok(accepted) => accepted,
            Err(e) => {
                if shutdown.is_triggered() {
                    tracing::info!("Listener closed, accept loop stopping");
                    return;
                }
                tracing::warn!(error = %e, "Error accepting connection");
                continue;
            }
        };

        let handler = Arc::clone(&handler);
        let guard = connections.track();
        tokio::spawn(async move {
            let _permit = permit;
            tracing::debug!(connection_id = %guard.id(), peer_addr = %peer_addr, "Connection started");

            if let Err(e) = serve_connection(&mut stream, handler.as_ref(), buffer_size).await {
                tracing::warn!(connection_id = %guard.id(), error = %e, "Connection failed");
            }
        });
    }
}

//! Per-connection worker and lifecycle tracking.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Count live connections
//! - Run one request/response exchange over a stream

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::request::{request_from_reader_with_capacity, RequestError};
use crate::response::{default_headers, ResponseWriter, StatusCode};
use crate::server::{Handler, HandlerError};

/// Relaxed ordering is enough: ids only need to be unique.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Counts live connections.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    active_count: Arc<AtomicU64>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new connection. The guard decrements the count on drop.
    pub fn track(&self) -> ConnectionGuard {
        self.active_count.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            active_count: Arc::clone(&self.active_count),
            id: ConnectionId::new(),
        }
    }

    pub fn active_count(&self) -> u64 {
        self.active_count.load(Ordering::SeqCst)
    }
}

/// Keeps a connection counted for as long as it lives.
#[derive(Debug)]
pub struct ConnectionGuard {
    active_count: Arc<AtomicU64>,
    id: ConnectionId,
}

impl ConnectionGuard {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.active_count.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(connection_id = %self.id, "Connection closed");
    }
}

/// Read one request from `stream`, run `handler`, write the response.
///
/// A malformed request is answered with `400 Bad Request` carrying the
/// parse error text. Transport failures are returned to the caller.
pub async fn serve_connection<S>(
    stream: &mut S,
    handler: &Handler,
    buffer_size: usize,
) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = match request_from_reader_with_capacity(&mut *stream, buffer_size).await {
        Ok(request) => request,
        Err(RequestError::Io(e)) => return Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting malformed request");
            let mut writer = ResponseWriter::new(&mut *stream);
            HandlerError::new(StatusCode::BAD_REQUEST, e.to_string())
                .write(&mut writer)
                .await?;
            return writer.flush().await;
        }
    };

    tracing::debug!(
        method = %request.request_line.method,
        target = %request.request_line.target,
        body_len = request.body.len(),
        "Request parsed"
    );

    let mut body = Vec::new();
    let mut writer = ResponseWriter::new(&mut *stream);
    match handler(&mut body, &request) {
        Ok(()) => {
            writer.write_status_line(StatusCode::OK).await?;
            writer.write_headers(&default_headers(body.len())).await?;
            writer.write_body(&body).await?;
        }
        Err(e) => {
            tracing::info!(status = e.status.as_u16(), message = %e.message, "Handler returned error");
            e.write(&mut writer).await?;
        }
    }

    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn connection_id_unique() {
        let id1 = ConnectionId::new();
        let id2 = ConnectionId::new();
        assert_ne!(id1, id2);
        assert!(id1.to_string().starts_with("conn-"));
    }

    #[test]
    fn connection_tracker_counts() {
        let tracker = ConnectionTracker::new();
        assert_eq!(tracker.active_count(), 0);

        let guard1 = tracker.track();
        let guard2 = tracker.track();
        assert_eq!(tracker.active_count(), 2);
        assert_ne!(guard1.id(), guard2.id());

        drop(guard1);
        assert_eq!(tracker.active_count(), 1);
        drop(guard2);
        assert_eq!(tracker.active_count(), 0);
    }

    async fn exchange(raw: &[u8], handler: &Handler) -> String {
        let (mut client, mut server) = tokio::io::duplex(1024);
        client.write_all(raw).await.unwrap();
        client.shutdown().await.unwrap();

        serve_connection(&mut server, handler, 8).await.unwrap();
        drop(server);

        let mut out = String::new();
        client.read_to_string(&mut out).await.unwrap();
        out
    }

    #[tokio::test]
    async fn successful_handler_gets_ok_response() {
        let handler: Box<Handler> = Box::new(|body: &mut Vec<u8>, req: &Request| -> Result<(), HandlerError> {
            body.extend_from_slice(format!("you asked for {}", req.request_line.target).as_bytes());
            Ok(())
        });
        let out = exchange(b"GET /tea HTTP/1.1\r\nHost: x\r\n\r\n", &handler).await;

        assert!(out.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(out.contains("content-length: 18\r\n"));
        assert!(out.contains("connection: close\r\n"));
        assert!(out.ends_with("\r\n\r\nyou asked for /tea"));
    }

    #[tokio::test]
    async fn handler_error_sets_status() {
        let handler: Box<Handler> = Box::new(|_: &mut Vec<u8>, _: &Request| -> Result<(), HandlerError> {
            Err(HandlerError::new(StatusCode::INTERNAL_SERVER_ERROR, "boom"))
        });
        let out = exchange(b"GET / HTTP/1.1\r\n\r\n", &handler).await;

        assert!(out.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
        assert!(out.contains("content-length: 4\r\n"));
        assert!(out.ends_with("boom"));
    }

    #[tokio::test]
    async fn malformed_request_gets_bad_request() {
        let handler: Box<Handler> = Box::new(|_: &mut Vec<u8>, _: &Request| -> Result<(), HandlerError> {
            panic!("handler must not run for a malformed request")
        });
        let out = exchange(b"get / HTTP/1.1\r\n\r\n", &handler).await;

        assert!(out.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(out.ends_with("invalid method: \"get\""));
    }
}

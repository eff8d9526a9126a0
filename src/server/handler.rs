//! Application handler contract.

use std::io;

use tokio::io::AsyncWrite;

use crate::request::Request;
use crate::response::{default_headers, ResponseWriter, StatusCode};

/// Application logic: write a body into the buffer, or fail with a status.
pub type Handler = dyn Fn(&mut Vec<u8>, &Request) -> Result<(), HandlerError> + Send + Sync;

/// A handler failure, rendered as a plain-text response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    pub status: StatusCode,
    pub message: String,
}

impl HandlerError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Write status line, default headers and the message as body.
    pub async fn write<W>(&self, writer: &mut ResponseWriter<W>) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let body = self.message.as_bytes();
        writer.write_status_line(self.status).await?;
        writer.write_headers(&default_headers(body.len())).await?;
        writer.write_body(body).await?;
        Ok(())
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for HandlerError {}

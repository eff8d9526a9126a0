//! Sequential response emitter bound to one outbound sink.

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::headers::Headers;

use super::StatusCode;

/// Headers every plain-text response starts from.
pub fn default_headers(content_len: usize) -> Headers {
    let mut headers = Headers::new();
    headers.replace("Content-Length", &content_len.to_string());
    headers.replace("Connection", "close");
    headers.replace("Content-Type", "text/plain");
    headers
}

/// Writes the parts of a single HTTP/1.1 response, in call order.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    inner: W,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write `HTTP/1.1 <code> <reason>\r\n`; unknown codes write nothing.
    pub async fn write_status_line(&mut self, status: StatusCode) -> io::Result<()> {
        let Some(reason) = status.reason_phrase() else {
            tracing::debug!(status = status.as_u16(), "No reason phrase, status line skipped");
            return Ok(());
        };
        let line = format!("HTTP/1.1 {} {}\r\n", status.as_u16(), reason);
        self.inner.write_all(line.as_bytes()).await
    }

    /// Write one line per header followed by the blank separator line.
    pub async fn write_headers(&mut self, headers: &Headers) -> io::Result<()> {
        self.inner.write_all(&encode_fields(headers)).await
    }

    /// Write body bytes verbatim.
    pub async fn write_body(&mut self, body: &[u8]) -> io::Result<usize> {
        self.inner.write_all(body).await?;
        Ok(body.len())
    }

    /// Write one chunk: `<hex len>\r\n<data>\r\n`.
    ///
    /// An empty slice writes nothing, since a zero-length chunk would end
    /// the body. Use [`write_chunked_body_done`](Self::write_chunked_body_done)
    /// for that.
    pub async fn write_chunked_body(&mut self, chunk: &[u8]) -> io::Result<usize> {
        if chunk.is_empty() {
            return Ok(0);
        }

        let mut framed = format!("{:x}\r\n", chunk.len()).into_bytes();
        framed.extend_from_slice(chunk);
        framed.extend_from_slice(b"\r\n");
        self.inner.write_all(&framed).await?;
        Ok(chunk.len())
    }

    /// Write the terminal `0\r\n` chunk.
    ///
    /// The chunked body is not closed until trailers (or an empty trailer
    /// set) are written after this.
    pub async fn write_chunked_body_done(&mut self) -> io::Result<()> {
        self.inner.write_all(b"0\r\n").await
    }

    /// Write trailer fields followed by the blank line that ends the message.
    pub async fn write_trailers(&mut self, trailers: &Headers) -> io::Result<()> {
        self.inner.write_all(&encode_fields(trailers)).await
    }

    pub async fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().await
    }
}

fn encode_fields(headers: &Headers) -> Vec<u8> {
    let mut out = Vec::new();
    for (key, value) in headers.iter() {
        out.extend_from_slice(key.as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(value.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(b"\r\n");
    out
}

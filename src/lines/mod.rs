//! Newline-delimited record reader.
//!
//! Pulls fixed 8-byte reads from a stream and hands out one line per
//! `next_line` call. A trailing unterminated line is returned once at
//! end-of-stream; after that every call yields `None`.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

const READ_SIZE: usize = 8;

/// Lazily split a byte stream into `\n`-terminated lines.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    pending: Vec<u8>,
    eof: bool,
}

impl<R> LineReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: Vec::new(),
            eof: false,
        }
    }

    /// Next line without its `\n`, or `None` once the stream is drained.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(idx) = self.pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.pending.drain(..=idx).take(idx).collect();
                return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
            }

            if self.eof {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                let rest = std::mem::take(&mut self.pending);
                return Ok(Some(String::from_utf8_lossy(&rest).into_owned()));
            }

            let mut chunk = [0u8; READ_SIZE];
            let n = self.inner.read(&mut chunk).await?;
            if n == 0 {
                self.eof = true;
            }
            self.pending.extend_from_slice(&chunk[..n]);
        }
    }
}

//! Incremental HTTP/1.1 request parsing.
//!
//! # Data Flow
//! ```text
//! transport bytes
//!     → reader.rs (staging buffer, grows by doubling, compacts after each pass)
//!     → Request::parse (drives the state machine over the buffered bytes)
//!         Initialized     → line.rs (request line)
//!         ParsingHeaders  → headers (one field per step)
//!         ParsingBody     → Content-Length accumulation
//!         Done
//!     → completed Request handed to the connection handler
//! ```
//!
//! # Design Decisions
//! - Every step reports bytes consumed; zero means "feed me more"
//! - Any error is fatal to the message, no resynchronisation
//! - Without `Content-Length` the body is empty and whatever follows the
//!   header section in the buffer is dropped
//! - End-of-stream before `Done` completes the request as-is (see reader.rs)

pub mod line;
pub mod reader;

use thiserror::Error;

use crate::headers::{HeaderError, Headers};

pub use line::RequestLine;
pub use reader::{request_from_reader, request_from_reader_with_capacity};

/// Errors that abort parsing of the current request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("invalid method: {0:?}")]
    InvalidMethod(String),

    #[error("unsupported http version: {0:?}, only HTTP/1.1 is supported")]
    UnsupportedVersion(String),

    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error("malformed Content-Length: {0:?}")]
    MalformedContentLength(String),

    /// More body bytes arrived than `Content-Length` declared.
    #[error("Content-Length too large: declared {declared}, received {received}")]
    ContentLengthTooLarge { declared: usize, received: usize },

    #[error("cannot parse data from a done state")]
    ParseAfterDone,

    /// Transport read failure other than end-of-stream.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parser progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    Initialized,
    ParsingHeaders,
    ParsingBody,
    Done,
}

/// A request under construction, complete once `is_done()` holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub request_line: RequestLine,
    pub headers: Headers,
    pub body: Vec<u8>,
    state: ParseState,
    body_length_read: usize,
}

impl Request {
    /// Create a request waiting for its first line.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    /// Declare the request complete regardless of progress.
    pub(crate) fn finish(&mut self) {
        self.state = ParseState::Done;
    }

    /// Run as many state transitions as `data` allows.
    ///
    /// Returns the number of bytes consumed; the caller keeps the rest
    /// and offers it again together with newly read bytes.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, RequestError> {
        if self.is_done() {
            return Err(RequestError::ParseAfterDone);
        }

        let mut total = 0;
        while !self.is_done() {
            let n = self.parse_single(&data[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }

        Ok(total)
    }

    fn parse_single(&mut self, data: &[u8]) -> Result<usize, RequestError> {
        match self.state {
            ParseState::Done => Err(RequestError::ParseAfterDone),
            ParseState::Initialized => {
                let (n, line) = RequestLine::parse(data)?;
                match line {
                    Some(line) => {
                        self.request_line = line;
                        self.state = ParseState::ParsingHeaders;
                        Ok(n)
                    }
                    None => Ok(0),
                }
            }
            ParseState::ParsingHeaders => {
                let (n, done) = self.headers.parse(data)?;
                if done {
                    self.state = ParseState::ParsingBody;
                }
                Ok(n)
            }
            ParseState::ParsingBody => self.parse_body(data),
        }
    }

    fn parse_body(&mut self, data: &[u8]) -> Result<usize, RequestError> {
        let declared = match self.headers.get("content-length") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| RequestError::MalformedContentLength(raw.to_string()))?,
            None => {
                self.state = ParseState::Done;
                return Ok(data.len());
            }
        };

        self.body.extend_from_slice(data);
        self.body_length_read += data.len();

        if self.body_length_read > declared {
            return Err(RequestError::ContentLengthTooLarge {
                declared,
                received: self.body_length_read,
            });
        }
        if self.body_length_read == declared {
            self.state = ParseState::Done;
        }

        Ok(data.len())
    }
}

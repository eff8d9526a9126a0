//! Request line parsing: `<METHOD> <TARGET> HTTP/1.1\r\n`.

use crate::headers::{find_crlf, CRLF};

use super::RequestError;

/// The only wire version accepted.
const HTTP_1_1: &str = "HTTP/1.1";

/// Method, target and version of a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestLine {
    /// Upper-case method token, e.g. `GET`.
    pub method: String,
    /// Request target, kept opaque.
    pub target: String,
    /// Version without the `HTTP/` prefix; always `1.1`.
    pub version: String,
}

impl RequestLine {
    /// Parse a request line from the front of `data`.
    ///
    /// Returns `Ok((0, None))` while no CRLF is buffered.
    pub fn parse(data: &[u8]) -> Result<(usize, Option<Self>), RequestError> {
        let idx = match find_crlf(data) {
            Some(idx) => idx,
            None => return Ok((0, None)),
        };

        let text = String::from_utf8_lossy(&data[..idx]);
        let line = Self::from_text(&text)?;

        Ok((idx + CRLF.len(), Some(line)))
    }

    fn from_text(text: &str) -> Result<Self, RequestError> {
        let parts: Vec<&str> = text.split(' ').collect();
        let [method, target, version] = parts[..] else {
            return Err(RequestError::MalformedRequestLine(text.to_string()));
        };

        if method.is_empty() || !method.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(RequestError::InvalidMethod(method.to_string()));
        }

        if version != HTTP_1_1 {
            return Err(RequestError::UnsupportedVersion(version.to_string()));
        }

        Ok(Self {
            method: method.to_string(),
            target: target.to_string(),
            version: "1.1".to_string(),
        })
    }
}

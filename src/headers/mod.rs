//! Header field collection.
//!
//! # Data Flow
//! ```text
//! raw bytes "Key: value\r\n" ...
//!     → Headers::parse (one line per call, "need more" on a partial line)
//!     → normalised lower-case key, trimmed value
//!     → merged into the map ("old, new") when the key repeats
//! ```
//!
//! # Design Decisions
//! - Keys are stored lower-cased; every lookup lower-cases its argument
//! - Iteration order is unspecified (plain hash map)
//! - A repeated key never creates a second entry

use std::collections::hash_map;
use std::collections::HashMap;

use thiserror::Error;

pub(crate) const CRLF: &[u8] = b"\r\n";

/// Characters allowed in a header name besides ASCII letters and digits.
const TOKEN_SPECIALS: &[u8] = b"!#$%&'*+-^_`|~";

/// Errors produced while parsing a header line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The line has no `:` separating name and value.
    #[error("malformed header line: {0:?}")]
    Malformed(String),

    /// The name is empty, ends in whitespace, or holds a forbidden character.
    #[error("invalid header key: {0:?}")]
    InvalidKey(String),
}

/// Case-insensitive header map with merge-on-insert semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a header value, ignoring case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// Insert a value, appending to an existing entry as `old, new`.
    pub fn set(&mut self, key: &str, value: &str) {
        let key = key.to_ascii_lowercase();
        match self.inner.entry(key) {
            hash_map::Entry::Occupied(mut entry) => {
                let merged = entry.get_mut();
                merged.push_str(", ");
                merged.push_str(value);
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(value.to_string());
            }
        }
    }

    /// Insert a value, overwriting any existing entry.
    pub fn replace(&mut self, key: &str, value: &str) {
        self.inner.insert(key.to_ascii_lowercase(), value.to_string());
    }

    /// Remove an entry, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.inner.remove(&key.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over `(key, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse at most one header line from the front of `data`.
    ///
    /// Returns `(consumed, done)`:
    /// - `(0, false)` when no complete line is buffered yet,
    /// - `(2, true)` on the blank line closing the header section,
    /// - `(line_len + 2, false)` after storing one field.
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), HeaderError> {
        let idx = match find_crlf(data) {
            Some(idx) => idx,
            None => return Ok((0, false)),
        };

        if idx == 0 {
            return Ok((CRLF.len(), true));
        }

        let line = String::from_utf8_lossy(&data[..idx]);
        let (raw_key, raw_value) = line
            .split_once(':')
            .ok_or_else(|| HeaderError::Malformed(line.to_string()))?;

        // "Host : x" is rejected, "  Host: x" is not.
        if raw_key.is_empty() || raw_key.ends_with(|c: char| c.is_ascii_whitespace()) {
            return Err(HeaderError::InvalidKey(raw_key.to_string()));
        }

        let key = raw_key.trim();
        if key.is_empty() || !key.bytes().all(is_token_byte) {
            return Err(HeaderError::InvalidKey(raw_key.to_string()));
        }

        self.set(key, raw_value.trim());

        Ok((idx + CRLF.len(), false))
    }
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || TOKEN_SPECIALS.contains(&b)
}

/// Position of the first CRLF in `data`.
pub(crate) fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(CRLF.len()).position(|w| w == CRLF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_header() {
        let mut headers = Headers::new();
        let data = b"Host: localhost:42069\r\n\r\n";
        let (n, done) = headers.parse(data).unwrap();
        assert_eq!(n, 23);
        assert!(!done);
        assert_eq!(headers.get("host"), Some("localhost:42069"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let mut headers = Headers::new();
        let (n, done) = headers.parse(b"       Host:   localhost:42069     \r\n").unwrap();
        assert_eq!(n, 37);
        assert!(!done);
        assert_eq!(headers.get("HOST"), Some("localhost:42069"));
    }

    #[test]
    fn lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.parse(b"Content-Type: text/html\r\n").unwrap();
        assert_eq!(headers.get("content-type"), headers.get("Content-Type"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
    }

    #[test]
    fn blank_line_ends_section() {
        let mut headers = Headers::new();
        assert_eq!(headers.parse(b"\r\nleftover").unwrap(), (2, true));
        assert!(headers.is_empty());
    }

    #[test]
    fn partial_line_needs_more() {
        let mut headers = Headers::new();
        assert_eq!(headers.parse(b"Host: loc").unwrap(), (0, false));
        assert!(headers.is_empty());
    }

    #[test]
    fn repeated_key_merges_in_order() {
        let mut headers = Headers::new();
        headers.parse(b"Set-Person: lane-loves-go\r\n").unwrap();
        headers.parse(b"set-person: prime-loves-zig\r\n").unwrap();
        headers.parse(b"Set-Person: tj-loves-ocaml\r\n").unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("set-person"),
            Some("lane-loves-go, prime-loves-zig, tj-loves-ocaml")
        );
    }

    #[test]
    fn rejects_space_before_colon() {
        let mut headers = Headers::new();
        let err = headers.parse(b"       Host : localhost:42069       \r\n\r\n").unwrap_err();
        assert!(matches!(err, HeaderError::InvalidKey(_)));
    }

    #[test]
    fn rejects_line_without_colon() {
        let mut headers = Headers::new();
        let err = headers.parse(b"just some words\r\n").unwrap_err();
        assert!(matches!(err, HeaderError::Malformed(_)));
    }

    #[test]
    fn rejects_forbidden_key_characters() {
        let mut headers = Headers::new();
        assert!(headers.parse("H©st: localhost\r\n".as_bytes()).is_err());
        assert!(headers.parse(b"Ho(st: localhost\r\n").is_err());
        assert!(headers.parse(b": no-name\r\n").is_err());
    }

    #[test]
    fn accepts_token_specials() {
        let mut headers = Headers::new();
        headers.parse(b"X-A!#$%&'*+^_`|~1: ok\r\n").unwrap();
        assert_eq!(headers.get("x-a!#$%&'*+^_`|~1"), Some("ok"));
    }

    #[test]
    fn replace_overwrites_instead_of_merging() {
        let mut headers = Headers::new();
        headers.set("Content-Type", "text/plain");
        headers.replace("content-type", "text/html");
        assert_eq!(headers.get("Content-Type"), Some("text/html"));
        assert_eq!(headers.remove("CONTENT-TYPE").as_deref(), Some("text/html"));
        assert!(headers.is_empty());
    }
}

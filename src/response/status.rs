//! Response status codes.

use std::fmt;

/// Numeric HTTP status code.
///
/// Only the codes with a constant below have a reason phrase; any other
/// value is representable but the writer emits no status line for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Reason phrase for known codes.
    pub fn reason_phrase(&self) -> Option<&'static str> {
        match self.0 {
            200 => Some("OK"),
            400 => Some("Bad Request"),
            500 => Some("Internal Server Error"),
            _ => None,
        }
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason_phrase() {
            Some(reason) => write!(f, "{} {}", self.0, reason),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_reasons() {
        assert_eq!(StatusCode::OK.reason_phrase(), Some("OK"));
        assert_eq!(StatusCode::BAD_REQUEST.reason_phrase(), Some("Bad Request"));
        assert_eq!(
            StatusCode::INTERNAL_SERVER_ERROR.reason_phrase(),
            Some("Internal Server Error")
        );
        assert_eq!(StatusCode(404).reason_phrase(), None);
    }

    #[test]
    fn display_includes_reason_when_known() {
        assert_eq!(StatusCode::BAD_REQUEST.to_string(), "400 Bad Request");
        assert_eq!(StatusCode::from(418).to_string(), "418");
    }
}

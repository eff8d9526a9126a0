//! Response serialisation.
//!
//! # Data Flow
//! ```text
//! handler output
//!     → writer.rs write_status_line   "HTTP/1.1 200 OK\r\n"
//!     → writer.rs write_headers       "key: value\r\n" ... "\r\n"
//!     → writer.rs write_body           raw bytes
//!       or write_chunked_body*         "<hex>\r\n<data>\r\n" ...
//!          write_chunked_body_done     "0\r\n"
//!          write_trailers              "key: value\r\n" ... "\r\n"
//!     → transport
//! ```
//!
//! # Design Decisions
//! - The writer emits exactly what each call asks for; call order is the
//!   caller's responsibility
//! - Unknown status codes produce no status line at all

pub mod status;
pub mod writer;

pub use status::StatusCode;
pub use writer::{default_headers, ResponseWriter};

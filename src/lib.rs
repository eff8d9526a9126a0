//! HTTP/1.1 on top of a raw byte stream.
//!
//! The core turns fragmented transport reads into a [`Request`] and
//! writes a response (plain or chunked, with trailers) back as framed
//! bytes. The rest is plumbing around it: a bounded accept loop, config
//! loading, logging and a line-splitting utility.

// Protocol core
pub mod headers;
pub mod request;
pub mod response;

// Plumbing
pub mod config;
pub mod lifecycle;
pub mod lines;
pub mod net;
pub mod observability;
pub mod server;

pub use config::ServerConfig;
pub use headers::Headers;
pub use request::{request_from_reader, Request, RequestError, RequestLine};
pub use response::{default_headers, ResponseWriter, StatusCode};
pub use server::{Handler, HandlerError, Server};

//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept, connection limits)
//!     → connection.rs (one worker per connection)
//!         read request → run handler → write response → close
//! ```
//!
//! # Design Decisions
//! - One request per connection; the response always carries
//!   `Connection: close`
//! - Workers share nothing but the handler

pub mod connection;
pub mod listener;

pub use connection::{serve_connection, ConnectionId, ConnectionTracker};
pub use listener::{ConnectionPermit, Listener, ListenerError};

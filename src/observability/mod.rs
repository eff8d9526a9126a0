//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (connection id, peer, state)
//!
//! Consumers:
//!     → logging.rs (fmt subscriber on stdout, filtered by EnvFilter)
//! ```

pub mod logging;

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → closed flag set → accept loop stops → in-flight
//!     connections run to completion
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;

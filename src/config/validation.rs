//! Configuration validation.
//!
//! Returns every problem found, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("listener.max_connections must be greater than zero")]
    MaxConnections,

    #[error("parser.read_buffer_size must be greater than zero")]
    ReadBufferSize,
}

/// Check value ranges that serde cannot express.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::MaxConnections);
    }
    if config.parser.read_buffer_size == 0 {
        errors.push(ValidationError::ReadBufferSize);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

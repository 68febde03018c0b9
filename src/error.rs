//! Error types for the Modula bridge
//!
//! Provides a unified error type for all operations.
//!
//! Note that device exchange failures never surface as errors: the
//! [`DeviceClient`](crate::network::DeviceClient) converts them into the
//! wire sentinel at its boundary, so callers always receive a structured
//! result. This type covers everything around that boundary: configuration,
//! server startup, and the internal I/O plumbing of an exchange.

use thiserror::Error;

/// Result type alias using BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Unified error type for bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Wire Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // HTTP Server Errors
    // -------------------------------------------------------------------------
    #[error("Server error: {0}")]
    Server(String),
}

//! Error types for connectivity.

use thiserror::Error;

/// Result type for connectivity operations.
pub type Result<T> = std::result::Result<T, ConnectivityError>;

#[derive(Debug, Error)]
pub enum ConnectivityError {
    /// Retry timers need a Tokio runtime to run on.
    #[error("No Tokio runtime available to drive retry timers")]
    NoRuntime,

    /// Persistence I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted message could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

//! Error types for the Wobble simulator.
//!
//! All crates return `WobbleResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Wobble simulator.
#[derive(Debug, Error)]
pub enum WobbleError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, WobbleError>`.
pub type WobbleResult<T> = Result<T, WobbleError>;

//! Error types for switchyard.
//!
//! Routing itself cannot fail; these cover the configuration and output
//! layers around it.

/// Result type alias for switchyard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for switchyard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

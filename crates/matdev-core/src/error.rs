use thiserror::Error;

/// Top-level error type for MATDEV.
#[derive(Debug, Error)]
pub enum MatdevError {
    /// Error from a messaging channel or reaction transport.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

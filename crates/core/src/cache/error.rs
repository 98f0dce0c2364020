use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Invalid cache type: {0}")]
    InvalidTag(String),
    #[error("Key not found: {0}")]
    NotFound(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

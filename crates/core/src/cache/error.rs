use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// The in-process store never produces these, but the trait keeps the
/// error channel so an external store can slot in behind it. Callers
/// treat a failed read as a miss and a failed write as a logged no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

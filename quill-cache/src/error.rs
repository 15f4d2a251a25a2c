//! Error types for cache operations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The write would take the cache over its configured capacity.
    #[error("Cache capacity exceeded: {requested} bytes requested, capacity is {capacity} bytes")]
    CapacityExceeded { requested: usize, capacity: usize },

    /// The storage behind the cache failed.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Internal error (lock poisoning, etc.).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Specialized `Result` type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

impl<T> From<std::sync::PoisonError<T>> for CacheError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        Self::Internal(format!("Lock poisoned: {e}"))
    }
}

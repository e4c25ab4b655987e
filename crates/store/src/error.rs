//! Storage error types.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An update targeted a record that does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A create collided with an existing record.
    #[error("Record already exists: {0}")]
    Conflict(String),

    /// The storage backend failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Convenience type alias for repository results.
pub type Result<T> = std::result::Result<T, StoreError>;

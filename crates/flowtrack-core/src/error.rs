//! Centralized error types for FlowTrack.

use thiserror::Error;

/// Main error type for FlowTrack operations.
#[derive(Error, Debug)]
pub enum FlowtrackError {
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Index {index} out of range for {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] flowtrack_db::DbError),
}

/// Result type for FlowTrack operations.
pub type FlowResult<T> = Result<T, FlowtrackError>;

impl FlowtrackError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a storage-unavailable error.
    pub fn storage_unavailable(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// True for referential misses (unknown board, list or card).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BoardNotFound(_) | Self::ListNotFound(_) | Self::CardNotFound(_)
        )
    }
}

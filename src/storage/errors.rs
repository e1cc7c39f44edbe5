use thiserror::Error;

use crate::common::CommentId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Comment not found: {id}")]
    CommentNotFound { id: CommentId },

    #[error("Parent comment not found: {id}")]
    ParentNotFound { id: CommentId },

    #[error("Storage error: {0}")]
    Backend(#[from] BackendError),
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Record not found: {id}")]
    Missing { id: CommentId },

    #[error("Parent record not found: {id}")]
    ParentMissing { id: CommentId },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store data: {message}")]
    Corrupt { message: String },
}

// Helper functions for creating common errors
impl StoreError {
    pub fn validation(message: impl AsRef<str>) -> Self {
        StoreError::Validation {
            message: message.as_ref().to_string(),
        }
    }

    pub fn comment_not_found(id: CommentId) -> Self {
        StoreError::CommentNotFound { id }
    }

    pub fn parent_not_found(id: CommentId) -> Self {
        StoreError::ParentNotFound { id }
    }
}

impl BackendError {
    pub fn missing(id: CommentId) -> Self {
        BackendError::Missing { id }
    }

    pub fn parent_missing(id: CommentId) -> Self {
        BackendError::ParentMissing { id }
    }

    pub fn corrupt(message: impl AsRef<str>) -> Self {
        BackendError::Corrupt {
            message: message.as_ref().to_string(),
        }
    }
}

// Result type aliases for convenience
pub type StoreResult<T> = Result<T, StoreError>;
pub type BackendResult<T> = Result<T, BackendError>;

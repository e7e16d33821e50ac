//! Review domain errors

use thiserror::Error;

/// Errors that can occur in the review domain
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Application not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Application was already resolved by a concurrent request")]
    ConcurrentModification,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ReviewError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        ReviewError::NotFound(id.to_string())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ReviewError::Storage(message.into())
    }
}

//! Scoring domain errors

use thiserror::Error;

/// Errors that can occur in the scoring domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ScoringError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ScoringError::InvalidInput(message.into())
    }
}

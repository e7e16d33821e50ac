//! Scoring DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Client scoring request: free-text intent
#[derive(Debug, Deserialize, Validate)]
pub struct ScoreRequest {
    /// What the client wants, e.g. "I would like a loan of 15,000,000"
    #[validate(length(min = 5, message = "query must be at least 5 characters"))]
    pub query: String,
}

/// Client scoring response
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    /// Human-readable answer shown to the client
    pub answer: String,
}

//! Request handlers

pub mod applications;
pub mod health;
pub mod profiles;
pub mod scoring;

use std::str::FromStr;

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Rejects the request unless the claims carry the required role
pub(crate) fn require_role(claims: &Claims, role: &str) -> Result<(), ApiError> {
    if auth::has_role(claims, role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!("{} role required", role)))
    }
}

/// Parses the token subject into a typed identifier
///
/// Identity is always taken from the authenticated token, never from the
/// request body.
pub(crate) fn subject_id<T: FromStr>(claims: &Claims) -> Result<T, ApiError> {
    claims.sub.parse().map_err(|_| ApiError::Unauthorized)
}

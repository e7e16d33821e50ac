//! Client profile handlers

use axum::{extract::State, Extension, Json};

use core_kernel::ApplicantId;
use domain_scoring::FinancialProfile;

use crate::auth::{roles, Claims};
use crate::dto::profiles::FinancialProfileRequest;
use crate::error::ApiError;
use crate::handlers::{require_role, subject_id};
use crate::AppState;

/// Stores or replaces the caller's financial profile
pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<FinancialProfileRequest>,
) -> Result<Json<FinancialProfile>, ApiError> {
    require_role(&claims, roles::CLIENT)?;
    let applicant_id: ApplicantId = subject_id(&claims)?;

    let profile: FinancialProfile = request.into();
    profile.validate()?;

    state.profiles.upsert(applicant_id, profile.clone()).await?;
    Ok(Json(profile))
}

/// Returns the caller's financial profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<FinancialProfile>, ApiError> {
    require_role(&claims, roles::CLIENT)?;
    let applicant_id: ApplicantId = subject_id(&claims)?;

    let profile = state.profiles.get(applicant_id).await?;
    Ok(Json(profile))
}

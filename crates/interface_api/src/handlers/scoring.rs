//! Client scoring handlers

use axum::{extract::State, Extension, Json};
use tracing::{error, warn};
use validator::Validate;

use core_kernel::ApplicantId;
use domain_review::Application;

use crate::auth::{roles, Claims};
use crate::dto::scoring::{ScoreRequest, ScoreResponse};
use crate::error::ApiError;
use crate::handlers::{require_role, subject_id};
use crate::narrative::{generic_answer, AMOUNT_PROMPT};
use crate::AppState;

/// Scores a free-text loan request for the authenticated client
///
/// Flow: load the caller's financial profile, extract the requested amount
/// from the query, run the scoring engine, generate the client narrative, and
/// record the application. When no amount can be extracted the engine is not
/// invoked and the client is asked to restate the request.
pub async fn ask(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, ApiError> {
    require_role(&claims, roles::CLIENT)?;
    request.validate()?;
    let applicant_id: ApplicantId = subject_id(&claims)?;

    let profile = state.profiles.get(applicant_id).await?;

    let requested_amount = match state.narrator.extract_amount(&request.query).await {
        Ok(Some(amount)) if !amount.is_zero() => amount,
        Ok(_) => {
            return Ok(Json(ScoreResponse {
                answer: AMOUNT_PROMPT.to_string(),
            }))
        }
        Err(e) => {
            warn!(error = %e, "amount extraction failed");
            return Ok(Json(ScoreResponse {
                answer: AMOUNT_PROMPT.to_string(),
            }));
        }
    };

    let result = domain_scoring::score(&profile, requested_amount, &state.policy)?;

    // A narrative failure degrades the answer but never blocks the record.
    let narrative = match state.narrator.explain(&result).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "narrative generation failed, recording application without it");
            None
        }
    };

    let application = Application::from_score(applicant_id, &result, narrative.clone());
    if let Err(e) = state.applications.create(&application).await {
        error!(applicant = %applicant_id, error = %e, "failed to persist application");
        return Err(e.into());
    }

    let answer = narrative.unwrap_or_else(|| generic_answer(&result));
    Ok(Json(ScoreResponse { answer }))
}

//! Agent review cabinet handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::{AgentId, ApplicationId};
use domain_review::{ApplicationFilter, Page};

use crate::auth::{roles, Claims};
use crate::dto::applications::{
    ApplicationResponse, PaginatedResponse, PaginationMeta, PaginationQuery, ResolveRequest,
};
use crate::error::ApiError;
use crate::handlers::{require_role, subject_id};
use crate::AppState;

/// Applications awaiting manual resolution, newest first
pub async fn review_queue(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<ApplicationResponse>>, ApiError> {
    require_role(&claims, roles::AGENT)?;
    list(&state, ApplicationFilter::review_queue(), query.into()).await
}

/// All applications, newest first
pub async fn list_all(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<ApplicationResponse>>, ApiError> {
    require_role(&claims, roles::AGENT)?;
    list(&state, ApplicationFilter::default(), query.into()).await
}

async fn list(
    state: &AppState,
    filter: ApplicationFilter,
    page: Page,
) -> Result<Json<PaginatedResponse<ApplicationResponse>>, ApiError> {
    let result = state.applications.list(filter, page).await?;
    let meta = PaginationMeta::new(result.total_items, page);

    Ok(Json(PaginatedResponse {
        data: result
            .applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
        meta,
    }))
}

/// Single application by id
pub async fn get_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    require_role(&claims, roles::AGENT)?;

    let application = state.applications.get(ApplicationId::from(id)).await?;
    Ok(Json(application.into()))
}

/// Applies the agent's resolution to a pending application
///
/// Returns 409 when the application is already terminal or another agent's
/// resolution won the race.
pub async fn resolve_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    require_role(&claims, roles::AGENT)?;
    let agent_id: AgentId = subject_id(&claims)?;

    let application = state
        .applications
        .resolve(
            ApplicationId::from(id),
            request.action,
            agent_id,
            request.notes,
        )
        .await?;

    Ok(Json(application.into()))
}

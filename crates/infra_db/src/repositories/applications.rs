//! Application repository implementation
//!
//! PostgreSQL adapter for the `ApplicationStore` port. Statuses and decisions
//! are stored as text in their stable encodings; reason codes are stored as a
//! JSON array in a text column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{AgentId, ApplicationId, DomainPort};
use domain_review::{
    Application, ApplicationFilter, ApplicationStore, Page, PagedApplications, ReviewAction,
    ReviewError, ReviewStatus,
};
use domain_scoring::Decision;

const APPLICATION_COLUMNS: &str = "application_id, applicant_id, requested_amount, decision, \
     cold_score, dti_ratio, reasons, narrative, review_status, agent_id, agent_notes, \
     resolved_at, created_at, updated_at";

/// PostgreSQL-backed application store
#[derive(Debug, Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    /// Creates a new store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgApplicationStore {}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn create(&self, application: &Application) -> Result<(), ReviewError> {
        let reasons = serde_json::to_string(&application.reasons)
            .map_err(|e| ReviewError::storage(e.to_string()))?;

        sqlx::query(
            "INSERT INTO applications (\
                 application_id, applicant_id, requested_amount, decision, cold_score, \
                 dti_ratio, reasons, narrative, review_status, agent_id, agent_notes, \
                 resolved_at, created_at, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(Uuid::from(application.id))
        .bind(Uuid::from(application.applicant_id))
        .bind(application.requested_amount)
        .bind(application.decision.as_str())
        .bind(application.cold_score)
        .bind(application.dti_ratio)
        .bind(reasons)
        .bind(application.narrative.as_deref())
        .bind(application.review_status.as_str())
        .bind(application.agent_id.map(Uuid::from))
        .bind(application.agent_notes.as_deref())
        .bind(application.resolved_at)
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ReviewError::storage(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: ApplicationId) -> Result<Application, ReviewError> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE application_id = $1"
        );

        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ReviewError::storage(e.to_string()))?
            .ok_or_else(|| ReviewError::not_found(id))?;

        row.into_domain()
    }

    async fn list(
        &self,
        filter: ApplicationFilter,
        page: Page,
    ) -> Result<PagedApplications, ReviewError> {
        let status = filter.review_status.map(|s| s.as_str());
        let decision = filter.decision.map(|d| d.as_str());

        let total_items: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM applications \
             WHERE ($1::text IS NULL OR review_status = $1) \
               AND ($2::text IS NULL OR decision = $2)",
        )
        .bind(status)
        .bind(decision)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ReviewError::storage(e.to_string()))?;

        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE ($1::text IS NULL OR review_status = $1) \
               AND ($2::text IS NULL OR decision = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );

        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(status)
            .bind(decision)
            .bind(i64::from(page.limit))
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ReviewError::storage(e.to_string()))?;

        let applications = rows
            .into_iter()
            .map(ApplicationRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PagedApplications {
            applications,
            total_items: total_items as u64,
        })
    }

    async fn resolve(
        &self,
        id: ApplicationId,
        action: ReviewAction,
        agent_id: AgentId,
        notes: Option<String>,
    ) -> Result<Application, ReviewError> {
        let now = Utc::now();
        let sql = format!(
            "UPDATE applications \
             SET review_status = $2, agent_id = $3, agent_notes = $4, \
                 resolved_at = $5, updated_at = $5 \
             WHERE application_id = $1 AND review_status = 'pending' \
             RETURNING {APPLICATION_COLUMNS}"
        );

        // The conditional update is the atomic check-and-set: of two racing
        // resolutions only one can match the pending row.
        let updated = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(Uuid::from(id))
            .bind(action.resolved_status().as_str())
            .bind(Uuid::from(agent_id))
            .bind(notes.as_deref())
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ReviewError::storage(e.to_string()))?;

        if let Some(row) = updated {
            return row.into_domain();
        }

        // Nothing matched: classify the failure from the current state.
        let current: Option<String> =
            sqlx::query_scalar("SELECT review_status FROM applications WHERE application_id = $1")
                .bind(Uuid::from(id))
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| ReviewError::storage(e.to_string()))?;

        match current.as_deref().map(ReviewStatus::parse) {
            None => Err(ReviewError::not_found(id)),
            Some(Some(ReviewStatus::AgentApproved)) | Some(Some(ReviewStatus::AgentDenied)) => {
                Err(ReviewError::ConcurrentModification)
            }
            Some(Some(status)) => Err(ReviewError::InvalidTransition {
                from: status.as_str().to_string(),
                to: action.resolved_status().as_str().to_string(),
            }),
            Some(None) => Err(ReviewError::storage(format!(
                "unexpected review_status for application {}",
                id
            ))),
        }
    }
}

/// Database row for an application
#[derive(Debug, FromRow)]
struct ApplicationRow {
    application_id: Uuid,
    applicant_id: Uuid,
    requested_amount: Decimal,
    decision: String,
    cold_score: i32,
    dti_ratio: Decimal,
    reasons: String,
    narrative: Option<String>,
    review_status: String,
    agent_id: Option<Uuid>,
    agent_notes: Option<String>,
    resolved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_domain(self) -> Result<Application, ReviewError> {
        let decision = Decision::parse(&self.decision).ok_or_else(|| {
            ReviewError::storage(format!("unexpected decision '{}'", self.decision))
        })?;
        let review_status = ReviewStatus::parse(&self.review_status).ok_or_else(|| {
            ReviewError::storage(format!(
                "unexpected review_status '{}'",
                self.review_status
            ))
        })?;
        let reasons = serde_json::from_str(&self.reasons)
            .map_err(|e| ReviewError::storage(format!("undecodable reasons: {}", e)))?;

        Ok(Application {
            id: ApplicationId::from(self.application_id),
            applicant_id: self.applicant_id.into(),
            requested_amount: self.requested_amount,
            decision,
            cold_score: self.cold_score,
            dti_ratio: self.dti_ratio,
            reasons,
            narrative: self.narrative,
            review_status,
            agent_id: self.agent_id.map(AgentId::from),
            agent_notes: self.agent_notes,
            resolved_at: self.resolved_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

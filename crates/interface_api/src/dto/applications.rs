//! Application review DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_review::{Application, Page, ReviewAction, ReviewStatus};
use domain_scoring::{Decision, ReasonCode};

/// Full application view for the agent cabinet
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub requested_amount: Decimal,
    pub decision: Decision,
    pub cold_score: i32,
    pub narrative: Option<String>,
    pub review_status: ReviewStatus,
    pub agent_notes: Option<String>,
    pub internal_reasons: Vec<ReasonCode>,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id.into(),
            applicant_id: application.applicant_id.into(),
            created_at: application.created_at,
            requested_amount: application.requested_amount,
            decision: application.decision,
            cold_score: application.cold_score,
            narrative: application.narrative,
            review_status: application.review_status,
            agent_notes: application.agent_notes,
            internal_reasons: application.reasons,
        }
    }
}

/// Agent resolution request
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub action: ReviewAction,
    pub notes: Option<String>,
}

/// Pagination query parameters (?page=1&limit=10)
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    Page::DEFAULT_LIMIT
}

impl From<PaginationQuery> for Page {
    fn from(query: PaginationQuery) -> Self {
        Page::new(query.page, query.limit)
    }
}

/// Pagination metadata for the frontend
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub items_per_page: u32,
}

impl PaginationMeta {
    /// Computes the metadata for one page of a result set
    pub fn new(total_items: u64, page: Page) -> Self {
        let total_pages = total_items.div_ceil(u64::from(page.limit));
        Self {
            total_items,
            total_pages,
            current_page: page.page,
            items_per_page: page.limit,
        }
    }
}

/// Generic paginated envelope
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_rounds_up() {
        let meta = PaginationMeta::new(21, Page::new(2, 10));
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.items_per_page, 10);
    }

    #[test]
    fn test_pagination_meta_empty() {
        let meta = PaginationMeta::new(0, Page::default());
        assert_eq!(meta.total_pages, 0);
    }
}

//! Review Domain Ports
//!
//! Defines the storage port for scoring applications. Adapters implement the
//! trait over PostgreSQL (`infra_db`) or in memory (the mock below). The
//! `resolve` operation is the one place the system mutates shared state, so
//! the port contract requires the Pending precondition to be checked
//! atomically with the status write: of two racing resolutions, exactly one
//! may succeed.

use async_trait::async_trait;

use core_kernel::{AgentId, ApplicationId, DomainPort};
use domain_scoring::Decision;

use crate::application::{Application, ReviewAction, ReviewStatus};
use crate::error::ReviewError;

/// Offset pagination with clamped limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a page request, clamping out-of-range values
    pub fn new(page: u32, limit: u32) -> Self {
        let page = page.max(1);
        let limit = if limit == 0 {
            Self::DEFAULT_LIMIT
        } else {
            limit.min(Self::MAX_LIMIT)
        };
        Self { page, limit }
    }

    /// Row offset for this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

/// Filter criteria for application listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    /// Filter by review status
    pub review_status: Option<ReviewStatus>,
    /// Filter by engine decision
    pub decision: Option<Decision>,
}

impl ApplicationFilter {
    /// The agent dashboard query: applications awaiting manual resolution
    pub fn review_queue() -> Self {
        Self {
            review_status: Some(ReviewStatus::Pending),
            decision: Some(Decision::ManualReview),
        }
    }

    /// Whether an application matches this filter
    pub fn matches(&self, application: &Application) -> bool {
        if let Some(status) = self.review_status {
            if application.review_status != status {
                return false;
            }
        }
        if let Some(decision) = self.decision {
            if application.decision != decision {
                return false;
            }
        }
        true
    }
}

/// One page of applications plus the unpaged total
#[derive(Debug, Clone)]
pub struct PagedApplications {
    pub applications: Vec<Application>,
    pub total_items: u64,
}

/// Storage port for scoring applications
///
/// Create/read/update operations are atomic per record. Applications are
/// never deleted.
#[async_trait]
pub trait ApplicationStore: DomainPort {
    /// Persists a newly created application
    async fn create(&self, application: &Application) -> Result<(), ReviewError>;

    /// Retrieves an application by id
    async fn get(&self, id: ApplicationId) -> Result<Application, ReviewError>;

    /// Lists applications matching the filter, newest first
    async fn list(
        &self,
        filter: ApplicationFilter,
        page: Page,
    ) -> Result<PagedApplications, ReviewError>;

    /// Applies an agent resolution to a pending application
    ///
    /// The Pending precondition is checked atomically with the write. Errors:
    /// `NotFound` for an unknown id, `InvalidTransition` when the application
    /// was terminal from creation, `ConcurrentModification` when another
    /// resolution already landed.
    async fn resolve(
        &self,
        id: ApplicationId,
        action: ReviewAction,
        agent_id: AgentId,
        notes: Option<String>,
    ) -> Result<Application, ReviewError>;
}

/// In-memory mock implementation of ApplicationStore for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory application store
    ///
    /// Holds records in insertion order; the write lock around `resolve`
    /// provides the same exactly-once guarantee as the database adapter's
    /// conditional update.
    #[derive(Debug, Default)]
    pub struct MockApplicationStore {
        applications: Arc<RwLock<Vec<Application>>>,
    }

    impl MockApplicationStore {
        /// Creates a new mock store
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockApplicationStore {}

    #[async_trait]
    impl ApplicationStore for MockApplicationStore {
        async fn create(&self, application: &Application) -> Result<(), ReviewError> {
            let mut applications = self.applications.write().await;
            if applications.iter().any(|a| a.id == application.id) {
                return Err(ReviewError::storage(format!(
                    "duplicate application id {}",
                    application.id
                )));
            }
            applications.push(application.clone());
            Ok(())
        }

        async fn get(&self, id: ApplicationId) -> Result<Application, ReviewError> {
            self.applications
                .read()
                .await
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or_else(|| ReviewError::not_found(id))
        }

        async fn list(
            &self,
            filter: ApplicationFilter,
            page: Page,
        ) -> Result<PagedApplications, ReviewError> {
            let applications = self.applications.read().await;
            let matching: Vec<_> = applications
                .iter()
                .rev() // newest first
                .filter(|a| filter.matches(a))
                .cloned()
                .collect();

            let total_items = matching.len() as u64;
            let page_items = matching
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.limit as usize)
                .collect();

            Ok(PagedApplications {
                applications: page_items,
                total_items,
            })
        }

        async fn resolve(
            &self,
            id: ApplicationId,
            action: ReviewAction,
            agent_id: AgentId,
            notes: Option<String>,
        ) -> Result<Application, ReviewError> {
            let mut applications = self.applications.write().await;
            let application = applications
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| ReviewError::not_found(id))?;

            match application.review_status {
                ReviewStatus::Pending => {
                    application.resolve(action, agent_id, notes)?;
                    Ok(application.clone())
                }
                // Terminal since creation: the transition was never legal
                ReviewStatus::Approved | ReviewStatus::Denied => {
                    Err(ReviewError::InvalidTransition {
                        from: application.review_status.as_str().to_string(),
                        to: action.resolved_status().as_str().to_string(),
                    })
                }
                // Another resolution already landed
                ReviewStatus::AgentApproved | ReviewStatus::AgentDenied => {
                    Err(ReviewError::ConcurrentModification)
                }
            }
        }
    }
}

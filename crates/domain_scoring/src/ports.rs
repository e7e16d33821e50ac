//! Scoring Domain Ports
//!
//! Port interfaces for the collaborators the scoring flow depends on:
//! profile storage and narrative generation. Adapters live elsewhere
//! (PostgreSQL in `infra_db`, the template narrator in `interface_api`,
//! in-memory mocks below for tests).

use async_trait::async_trait;
use rust_decimal::Decimal;

use core_kernel::{ApplicantId, DomainPort, PortError};

use crate::engine::ScoreResult;
use crate::profile::FinancialProfile;

/// Storage port for applicant financial profiles
///
/// One profile per applicant; `upsert` replaces any previous snapshot.
#[async_trait]
pub trait ProfileStore: DomainPort {
    /// Stores or replaces the profile for an applicant
    async fn upsert(
        &self,
        applicant_id: ApplicantId,
        profile: FinancialProfile,
    ) -> Result<(), PortError>;

    /// Retrieves the profile for an applicant
    ///
    /// Returns `PortError::NotFound` if the applicant has no profile yet.
    async fn get(&self, applicant_id: ApplicantId) -> Result<FinancialProfile, PortError>;
}

/// Narrative generation port
///
/// Wraps the external text collaborator that turns free-text intent into a
/// numeric amount and a score result into a client-facing explanation. Both
/// calls may fail; an `explain` failure must never prevent the application
/// from being recorded with its computed decision.
#[async_trait]
pub trait NarrativePort: DomainPort {
    /// Extracts a requested loan amount from a free-text query
    ///
    /// Returns `Ok(None)` when no usable amount is present, in which case the
    /// scoring engine is not invoked for the request.
    async fn extract_amount(&self, query: &str) -> Result<Option<Decimal>, PortError>;

    /// Produces a human-readable explanation of a score result
    async fn explain(&self, result: &ScoreResult) -> Result<String, PortError>;
}

/// In-memory mock implementation of ProfileStore for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory profile store
    #[derive(Debug, Default)]
    pub struct MockProfileStore {
        profiles: Arc<RwLock<HashMap<ApplicantId, FinancialProfile>>>,
    }

    impl MockProfileStore {
        /// Creates a new mock store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store with a profile
        pub async fn with_profile(applicant_id: ApplicantId, profile: FinancialProfile) -> Self {
            let store = Self::new();
            store
                .profiles
                .write()
                .await
                .insert(applicant_id, profile);
            store
        }
    }

    impl DomainPort for MockProfileStore {}

    #[async_trait]
    impl ProfileStore for MockProfileStore {
        async fn upsert(
            &self,
            applicant_id: ApplicantId,
            profile: FinancialProfile,
        ) -> Result<(), PortError> {
            self.profiles.write().await.insert(applicant_id, profile);
            Ok(())
        }

        async fn get(&self, applicant_id: ApplicantId) -> Result<FinancialProfile, PortError> {
            self.profiles
                .read()
                .await
                .get(&applicant_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("FinancialProfile", applicant_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockProfileStore;
    use super::*;
    use crate::profile::{CreditHistory, IncomeProof};
    use rust_decimal_macros::dec;

    fn test_profile() -> FinancialProfile {
        FinancialProfile {
            income: dec!(300000),
            monthly_payments: dec!(20000),
            credit_history: CreditHistory::NoIssues,
            job_experience_years: dec!(4),
            age: 40,
            income_proof: IncomeProof::Official,
        }
    }

    #[tokio::test]
    async fn test_mock_store_upsert_and_get() {
        let store = MockProfileStore::new();
        let applicant_id = ApplicantId::new_v7();

        store.upsert(applicant_id, test_profile()).await.unwrap();

        let retrieved = store.get(applicant_id).await.unwrap();
        assert_eq!(retrieved, test_profile());
    }

    #[tokio::test]
    async fn test_mock_store_missing_profile() {
        let store = MockProfileStore::new();
        let result = store.get(ApplicantId::new_v7()).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_store_upsert_replaces() {
        let store = MockProfileStore::new();
        let applicant_id = ApplicantId::new_v7();

        store.upsert(applicant_id, test_profile()).await.unwrap();

        let mut updated = test_profile();
        updated.monthly_payments = dec!(45000);
        store.upsert(applicant_id, updated.clone()).await.unwrap();

        let retrieved = store.get(applicant_id).await.unwrap();
        assert_eq!(retrieved.monthly_payments, dec!(45000));
    }
}

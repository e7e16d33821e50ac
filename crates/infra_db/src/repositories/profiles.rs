//! Financial profile repository implementation
//!
//! PostgreSQL adapter for the `ProfileStore` port. One row per applicant;
//! upserts replace the previous snapshot.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{ApplicantId, DomainPort, PortError};
use domain_scoring::{CreditHistory, FinancialProfile, IncomeProof, ProfileStore};

use crate::error::classify;

/// PostgreSQL-backed profile store
#[derive(Debug, Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    /// Creates a new store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgProfileStore {}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn upsert(
        &self,
        applicant_id: ApplicantId,
        profile: FinancialProfile,
    ) -> Result<(), PortError> {
        sqlx::query(
            "INSERT INTO financial_profiles (\
                 applicant_id, income, monthly_payments, credit_history, \
                 job_experience_years, age, income_proof, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, now()) \
             ON CONFLICT (applicant_id) DO UPDATE SET \
                 income = EXCLUDED.income, \
                 monthly_payments = EXCLUDED.monthly_payments, \
                 credit_history = EXCLUDED.credit_history, \
                 job_experience_years = EXCLUDED.job_experience_years, \
                 age = EXCLUDED.age, \
                 income_proof = EXCLUDED.income_proof, \
                 updated_at = now()",
        )
        .bind(Uuid::from(applicant_id))
        .bind(profile.income)
        .bind(profile.monthly_payments)
        .bind(profile.credit_history.as_str())
        .bind(profile.job_experience_years)
        .bind(profile.age as i32)
        .bind(profile.income_proof.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::internal(classify(e).to_string()))?;

        Ok(())
    }

    async fn get(&self, applicant_id: ApplicantId) -> Result<FinancialProfile, PortError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT income, monthly_payments, credit_history, job_experience_years, \
                    age, income_proof \
             FROM financial_profiles WHERE applicant_id = $1",
        )
        .bind(Uuid::from(applicant_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::internal(classify(e).to_string()))?
        .ok_or_else(|| PortError::not_found("FinancialProfile", applicant_id))?;

        row.into_domain()
    }
}

/// Database row for a financial profile
#[derive(Debug, FromRow)]
struct ProfileRow {
    income: Decimal,
    monthly_payments: Decimal,
    credit_history: String,
    job_experience_years: Decimal,
    age: i32,
    income_proof: String,
}

impl ProfileRow {
    fn into_domain(self) -> Result<FinancialProfile, PortError> {
        let credit_history = CreditHistory::parse(&self.credit_history).ok_or_else(|| {
            PortError::internal(format!(
                "unexpected credit_history '{}'",
                self.credit_history
            ))
        })?;
        let income_proof = IncomeProof::parse(&self.income_proof).ok_or_else(|| {
            PortError::internal(format!("unexpected income_proof '{}'", self.income_proof))
        })?;
        let age = u32::try_from(self.age)
            .map_err(|_| PortError::internal(format!("unexpected age '{}'", self.age)))?;

        Ok(FinancialProfile {
            income: self.income,
            monthly_payments: self.monthly_payments,
            credit_history,
            job_experience_years: self.job_experience_years,
            age,
            income_proof,
        })
    }
}

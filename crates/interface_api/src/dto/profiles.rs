//! Financial profile DTOs

use rust_decimal::Decimal;
use serde::Deserialize;

use domain_scoring::{CreditHistory, FinancialProfile, IncomeProof};

/// Profile upsert request
///
/// Field ranges are enforced by the domain's own validation after
/// deserialization; enum fields reject unknown values at the serde layer.
#[derive(Debug, Deserialize)]
pub struct FinancialProfileRequest {
    pub income: Decimal,
    pub monthly_payments: Decimal,
    pub credit_history: CreditHistory,
    pub job_experience_years: Decimal,
    pub age: u32,
    pub income_proof: IncomeProof,
}

impl From<FinancialProfileRequest> for FinancialProfile {
    fn from(request: FinancialProfileRequest) -> Self {
        FinancialProfile {
            income: request.income,
            monthly_payments: request.monthly_payments,
            credit_history: request.credit_history,
            job_experience_years: request.job_experience_years,
            age: request.age,
            income_proof: request.income_proof,
        }
    }
}

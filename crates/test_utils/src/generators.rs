//! Property-based Test Data Generators
//!
//! Proptest strategies for domain values, shared across crates so property
//! tests agree on what a representative input space looks like.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_scoring::{CreditHistory, FinancialProfile, IncomeProof};

/// Strategy over credit history classes
pub fn arb_credit_history() -> impl Strategy<Value = CreditHistory> {
    prop_oneof![
        Just(CreditHistory::NoIssues),
        Just(CreditHistory::MinorIssues),
        Just(CreditHistory::MajorIssues),
    ]
}

/// Strategy over income proof classes
pub fn arb_income_proof() -> impl Strategy<Value = IncomeProof> {
    prop_oneof![
        Just(IncomeProof::Official),
        Just(IncomeProof::Indirect),
        Just(IncomeProof::Verbal),
    ]
}

prop_compose! {
    /// Strategy over valid financial profiles
    pub fn arb_profile()(
        income in 0i64..=2_000_000,
        monthly_payments in 0i64..=1_000_000,
        credit_history in arb_credit_history(),
        job_experience_years in 0i64..=40,
        age in 18u32..=75,
        income_proof in arb_income_proof(),
    ) -> FinancialProfile {
        FinancialProfile {
            income: Decimal::from(income),
            monthly_payments: Decimal::from(monthly_payments),
            credit_history,
            job_experience_years: Decimal::from(job_experience_years),
            age,
            income_proof,
        }
    }
}

/// Strategy over requested loan amounts, including absurdly large ones
pub fn arb_requested_amount() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000_000).prop_map(Decimal::from)
}

//! Pre-built Test Fixtures
//!
//! Ready-to-use profiles and amounts for common scoring scenarios. The values
//! are chosen so each fixture lands in a known decision band under the
//! default policy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_scoring::{CreditHistory, FinancialProfile, IncomeProof};

/// Fixture profiles for scoring scenarios
pub struct ProfileFixtures;

impl ProfileFixtures {
    /// Clean, well-paid applicant: approved for affordable amounts
    pub fn strong() -> FinancialProfile {
        FinancialProfile {
            income: dec!(500000),
            monthly_payments: dec!(50000),
            credit_history: CreditHistory::NoIssues,
            job_experience_years: dec!(5),
            age: 35,
            income_proof: IncomeProof::Official,
        }
    }

    /// Heavily committed applicant: lands in the manual review band
    pub fn middling() -> FinancialProfile {
        FinancialProfile {
            income: dec!(300000),
            monthly_payments: dec!(100000),
            credit_history: CreditHistory::NoIssues,
            job_experience_years: dec!(4),
            age: 30,
            income_proof: IncomeProof::Indirect,
        }
    }

    /// Applicant with bad history and no tenure: denied
    pub fn weak() -> FinancialProfile {
        FinancialProfile {
            income: dec!(150000),
            monthly_payments: dec!(80000),
            credit_history: CreditHistory::MajorIssues,
            job_experience_years: dec!(0.5),
            age: 22,
            income_proof: IncomeProof::Verbal,
        }
    }

    /// No declared income: worst-case ratio, automatic denial
    pub fn zero_income() -> FinancialProfile {
        FinancialProfile {
            income: dec!(0),
            monthly_payments: dec!(0),
            credit_history: CreditHistory::NoIssues,
            job_experience_years: dec!(5),
            age: 40,
            income_proof: IncomeProof::Verbal,
        }
    }
}

/// Fixture amounts paired with the profiles above
pub struct AmountFixtures;

impl AmountFixtures {
    /// Comfortably inside the strong profile's capacity
    pub fn affordable() -> Decimal {
        dec!(1000000)
    }

    /// Inside the middling profile's review band
    pub fn review_band() -> Decimal {
        dec!(1500000)
    }

    /// Far beyond any fixture profile's capacity
    pub fn oversized() -> Decimal {
        dec!(50000000000)
    }
}

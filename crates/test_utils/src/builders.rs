//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults. Tests
//! specify only the fields they care about.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::ApplicantId;
use domain_review::Application;
use domain_scoring::{
    score, CreditHistory, FinancialProfile, IncomeProof, ScoreResult, ScoringPolicy,
};

use crate::fixtures::ProfileFixtures;

/// Builder for financial profiles
pub struct FinancialProfileBuilder {
    profile: FinancialProfile,
}

impl Default for FinancialProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FinancialProfileBuilder {
    /// Creates a builder seeded with the strong fixture profile
    pub fn new() -> Self {
        Self {
            profile: ProfileFixtures::strong(),
        }
    }

    /// Sets the monthly income
    pub fn with_income(mut self, income: Decimal) -> Self {
        self.profile.income = income;
        self
    }

    /// Sets the existing monthly obligations
    pub fn with_monthly_payments(mut self, monthly_payments: Decimal) -> Self {
        self.profile.monthly_payments = monthly_payments;
        self
    }

    /// Sets the credit history classification
    pub fn with_credit_history(mut self, credit_history: CreditHistory) -> Self {
        self.profile.credit_history = credit_history;
        self
    }

    /// Sets the work tenure in years
    pub fn with_job_experience(mut self, years: Decimal) -> Self {
        self.profile.job_experience_years = years;
        self
    }

    /// Sets the applicant age
    pub fn with_age(mut self, age: u32) -> Self {
        self.profile.age = age;
        self
    }

    /// Sets the income evidence classification
    pub fn with_income_proof(mut self, income_proof: IncomeProof) -> Self {
        self.profile.income_proof = income_proof;
        self
    }

    /// Builds the profile
    pub fn build(self) -> FinancialProfile {
        self.profile
    }
}

/// Builder for scored applications
///
/// Runs the real engine against the configured profile and amount, then seeds
/// an application from the result, so tests always hold records the system
/// could actually produce.
pub struct ApplicationBuilder {
    applicant_id: ApplicantId,
    profile: FinancialProfile,
    requested_amount: Decimal,
    narrative: Option<String>,
    policy: ScoringPolicy,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationBuilder {
    /// Creates a builder with the strong fixture profile and an affordable amount
    pub fn new() -> Self {
        Self {
            applicant_id: ApplicantId::new_v7(),
            profile: ProfileFixtures::strong(),
            requested_amount: dec!(1000000),
            narrative: None,
            policy: ScoringPolicy::default(),
        }
    }

    /// Sets the owning applicant
    pub fn with_applicant(mut self, applicant_id: ApplicantId) -> Self {
        self.applicant_id = applicant_id;
        self
    }

    /// Sets the profile to score
    pub fn with_profile(mut self, profile: FinancialProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the requested amount
    pub fn with_requested_amount(mut self, amount: Decimal) -> Self {
        self.requested_amount = amount;
        self
    }

    /// Sets the narrative text
    pub fn with_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.narrative = Some(narrative.into());
        self
    }

    /// Sets the scoring policy
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs the engine and returns the raw score result
    pub fn score(&self) -> ScoreResult {
        score(&self.profile, self.requested_amount, &self.policy)
            .expect("builder inputs must be scoreable")
    }

    /// Builds the application
    pub fn build(self) -> Application {
        let result = self.score();
        Application::from_score(self.applicant_id, &result, self.narrative)
    }
}

//! Applicant financial profile
//!
//! The profile is a validated snapshot of an applicant's financial situation.
//! It is captured once per scoring request and never mutated by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Classification of an applicant's credit history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditHistory {
    /// Clean record
    NoIssues,
    /// Occasional late payments, all settled
    MinorIssues,
    /// Serious delinquencies or defaults
    MajorIssues,
}

/// How the applicant's income is evidenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeProof {
    /// Employer or tax statements
    Official,
    /// Bank statements or other indirect evidence
    Indirect,
    /// Self-declared only
    Verbal,
}

impl CreditHistory {
    /// Stable storage encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditHistory::NoIssues => "no_issues",
            CreditHistory::MinorIssues => "minor_issues",
            CreditHistory::MajorIssues => "major_issues",
        }
    }

    /// Parses the storage encoding
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "no_issues" => Some(CreditHistory::NoIssues),
            "minor_issues" => Some(CreditHistory::MinorIssues),
            "major_issues" => Some(CreditHistory::MajorIssues),
            _ => None,
        }
    }
}

impl IncomeProof {
    /// Stable storage encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeProof::Official => "official",
            IncomeProof::Indirect => "indirect",
            IncomeProof::Verbal => "verbal",
        }
    }

    /// Parses the storage encoding
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "official" => Some(IncomeProof::Official),
            "indirect" => Some(IncomeProof::Indirect),
            "verbal" => Some(IncomeProof::Verbal),
            _ => None,
        }
    }
}

/// A validated snapshot of an applicant's financial attributes
///
/// Owned by the applicant record; the scoring engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialProfile {
    /// Monthly income
    pub income: Decimal,
    /// Existing monthly debt obligations
    pub monthly_payments: Decimal,
    /// Credit history classification
    pub credit_history: CreditHistory,
    /// Work tenure in years
    pub job_experience_years: Decimal,
    /// Applicant age in years
    pub age: u32,
    /// Income evidence classification
    pub income_proof: IncomeProof,
}

impl FinancialProfile {
    /// Minimum applicant age accepted by the intake service
    pub const MINIMUM_AGE: u32 = 18;

    /// Checks the domain constraints on the profile fields
    ///
    /// Validation normally happens upstream at the DTO boundary; this is the
    /// domain-side restatement of the same constraints.
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.income.is_sign_negative() {
            return Err(ScoringError::invalid_input("income must be non-negative"));
        }
        if self.monthly_payments.is_sign_negative() {
            return Err(ScoringError::invalid_input(
                "monthly payments must be non-negative",
            ));
        }
        if self.job_experience_years.is_sign_negative() {
            return Err(ScoringError::invalid_input(
                "job experience must be non-negative",
            ));
        }
        if self.age < Self::MINIMUM_AGE {
            return Err(ScoringError::invalid_input(format!(
                "applicant must be at least {} years old",
                Self::MINIMUM_AGE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_profile() -> FinancialProfile {
        FinancialProfile {
            income: dec!(500000),
            monthly_payments: dec!(50000),
            credit_history: CreditHistory::NoIssues,
            job_experience_years: dec!(5),
            age: 35,
            income_proof: IncomeProof::Official,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(valid_profile().validate().is_ok());
    }

    #[test]
    fn test_negative_income_rejected() {
        let mut profile = valid_profile();
        profile.income = dec!(-1);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_underage_rejected() {
        let mut profile = valid_profile();
        profile.age = 17;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_credit_history_wire_format() {
        let json = serde_json::to_string(&CreditHistory::MinorIssues).unwrap();
        assert_eq!(json, "\"minor_issues\"");

        let parsed: IncomeProof = serde_json::from_str("\"official\"").unwrap();
        assert_eq!(parsed, IncomeProof::Official);
    }
}

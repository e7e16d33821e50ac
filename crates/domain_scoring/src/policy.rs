//! Scoring policy configuration and decision mapping
//!
//! All thresholds used by the engine live in an explicit, immutable
//! [`ScoringPolicy`] value passed into each scoring call, so policy can be
//! versioned and tested independently of the code.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Preliminary decision produced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Preliminarily approved
    Approved,
    /// Automatically denied
    Denied,
    /// Routed to a human agent for resolution
    ManualReview,
}

impl Decision {
    /// Stable storage encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approved => "approved",
            Decision::Denied => "denied",
            Decision::ManualReview => "manual_review",
        }
    }

    /// Parses the storage encoding
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(Decision::Approved),
            "denied" => Some(Decision::Denied),
            "manual_review" => Some(Decision::ManualReview),
            _ => None,
        }
    }
}

/// Threshold configuration for the scoring engine
///
/// The `Default` value carries the production constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Maximum share of income that may go to debt service
    pub max_safe_dti: Decimal,
    /// Loan term assumed for monthly-payment calculations
    pub loan_term_months: u32,
    /// DTI below this earns the top bucket score
    pub dti_excellent: Decimal,
    /// DTI below this earns the middle bucket score
    pub dti_good: Decimal,
    /// DTI below this earns the low bucket score; at or above it is penalized
    pub dti_acceptable: Decimal,
    /// Requested amounts above `recommended_max * this` are penalized
    pub over_request_multiplier: Decimal,
    /// Scores below this are denied
    pub denial_threshold: i32,
    /// Scores at or above this are approved; between the bands is manual review
    pub approval_threshold: i32,
    /// DTI above this forces an unfavourable base decision to a denial
    pub override_dti: Decimal,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            max_safe_dti: dec!(0.40),
            loan_term_months: 60,
            dti_excellent: dec!(0.2),
            dti_good: dec!(0.4),
            dti_acceptable: dec!(0.6),
            over_request_multiplier: dec!(1.5),
            denial_threshold: 400,
            approval_threshold: 700,
            override_dti: dec!(0.6),
        }
    }
}

impl ScoringPolicy {
    /// Maps a total score and debt-to-income ratio to a decision
    ///
    /// The score bands are applied first; the overleverage override runs after
    /// the base mapping and only ever downgrades. A severely overleveraged
    /// applicant is never routed to manual review.
    pub fn decide(&self, total_score: i32, dti: Decimal) -> Decision {
        let base = if total_score < self.denial_threshold {
            Decision::Denied
        } else if total_score < self.approval_threshold {
            Decision::ManualReview
        } else {
            Decision::Approved
        };

        if matches!(base, Decision::Denied | Decision::ManualReview) && dti > self.override_dti {
            return Decision::Denied;
        }

        base
    }
}

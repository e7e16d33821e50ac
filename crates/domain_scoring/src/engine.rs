//! Scoring engine orchestration
//!
//! Composes the affordability calculator, the rule pipeline, and the decision
//! policy into one pure function.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::affordability;
use crate::error::ScoringError;
use crate::policy::{Decision, ScoringPolicy};
use crate::profile::FinancialProfile;
use crate::rules::{self, ReasonCode, RuleContext};

/// Outcome of one scoring request
///
/// Produced fresh per request and never mutated afterwards. A pure function of
/// its inputs: identical profile, amount, and policy always yield an identical
/// result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Accumulated rule score
    pub total_score: i32,
    /// Preliminary decision
    pub decision: Decision,
    /// Debt-to-income ratio including the requested loan's payment
    pub dti_ratio: Decimal,
    /// Maximum amount the service would recommend for this profile
    pub recommended_max_amount: Decimal,
    /// Amount the applicant asked for
    pub requested_amount: Decimal,
    /// Reason codes in rule evaluation order; empty when nothing was flagged
    pub recommendations: Vec<ReasonCode>,
}

/// Scores a loan request against a financial profile
///
/// The profile is assumed to already satisfy its domain constraints
/// (validated upstream). A negative requested amount is a contract violation
/// and is rejected with [`ScoringError::InvalidInput`] rather than scored.
///
/// # Example
///
/// ```rust,ignore
/// let policy = ScoringPolicy::default();
/// let result = score(&profile, dec!(1000000), &policy)?;
/// match result.decision {
///     Decision::ManualReview => queue_for_agent(result),
///     _ => finalize(result),
/// }
/// ```
pub fn score(
    profile: &FinancialProfile,
    requested_amount: Decimal,
    policy: &ScoringPolicy,
) -> Result<ScoreResult, ScoringError> {
    if requested_amount.is_sign_negative() {
        return Err(ScoringError::invalid_input(
            "requested amount must be non-negative",
        ));
    }

    let recommended_max_amount = affordability::recommended_max_amount(profile, policy);
    let dti = affordability::debt_to_income(profile, requested_amount, policy);

    let ctx = RuleContext {
        profile,
        requested_amount,
        recommended_max_amount,
        dti,
        policy,
    };
    let (total_score, recommendations) = rules::evaluate(&ctx);

    let decision = policy.decide(total_score, dti);

    debug!(
        total_score,
        ?decision,
        %dti,
        %requested_amount,
        "scored loan request"
    );

    Ok(ScoreResult {
        total_score,
        decision,
        dti_ratio: dti,
        recommended_max_amount,
        requested_amount,
        recommendations,
    })
}

//! Risk scoring rules
//!
//! Each rule is an independent pure function from the scoring context to a
//! score delta and an optional reason code. Rules are folded in a fixed order
//! and reason codes preserve that order, so adding a rule never requires
//! touching the existing ones.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::policy::ScoringPolicy;
use crate::profile::{CreditHistory, FinancialProfile};

/// Machine-identifiable reason for a scoring penalty
///
/// Used for audit trails and downstream narrative generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Debt-to-income ratio is too high
    DtiTooHigh,
    /// Credit history shows serious delinquencies
    AdverseCreditHistory,
    /// Work tenure is under one year
    InsufficientTenure,
    /// Requested amount significantly exceeds capacity
    ExceedsCapacity,
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ReasonCode::DtiTooHigh => "Debt-to-income ratio is too high",
            ReasonCode::AdverseCreditHistory => "Adverse credit history is a negative factor",
            ReasonCode::InsufficientTenure => "Work tenure under one year is a risk factor",
            ReasonCode::ExceedsCapacity => {
                "Requested amount significantly exceeds financial capacity"
            }
        };
        write!(f, "{}", message)
    }
}

/// Inputs shared by all scoring rules
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub profile: &'a FinancialProfile,
    pub requested_amount: Decimal,
    pub recommended_max_amount: Decimal,
    pub dti: Decimal,
    pub policy: &'a ScoringPolicy,
}

/// Contribution of a single rule to the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    pub delta: i32,
    pub reason: Option<ReasonCode>,
}

impl RuleOutcome {
    fn score(delta: i32) -> Self {
        Self {
            delta,
            reason: None,
        }
    }

    fn flag(delta: i32, reason: ReasonCode) -> Self {
        Self {
            delta,
            reason: Some(reason),
        }
    }
}

/// A scoring rule: pure function of the context
pub type Rule = fn(&RuleContext<'_>) -> RuleOutcome;

const DTI_EXCELLENT_POINTS: i32 = 300;
const DTI_GOOD_POINTS: i32 = 150;
const DTI_ACCEPTABLE_POINTS: i32 = 50;
const DTI_PENALTY: i32 = -100;

const CREDIT_CLEAN_POINTS: i32 = 300;
const CREDIT_MINOR_POINTS: i32 = 100;
const CREDIT_MAJOR_PENALTY: i32 = -200;

const TENURE_LONG_POINTS: i32 = 200;
const TENURE_SHORT_POINTS: i32 = 100;

const OVER_REQUEST_PENALTY: i32 = -200;

/// Debt-burden rule: bucket the combined debt-to-income ratio
pub fn debt_burden_rule(ctx: &RuleContext<'_>) -> RuleOutcome {
    if ctx.dti < ctx.policy.dti_excellent {
        RuleOutcome::score(DTI_EXCELLENT_POINTS)
    } else if ctx.dti < ctx.policy.dti_good {
        RuleOutcome::score(DTI_GOOD_POINTS)
    } else if ctx.dti < ctx.policy.dti_acceptable {
        RuleOutcome::score(DTI_ACCEPTABLE_POINTS)
    } else {
        RuleOutcome::flag(DTI_PENALTY, ReasonCode::DtiTooHigh)
    }
}

/// Credit-history rule
pub fn credit_history_rule(ctx: &RuleContext<'_>) -> RuleOutcome {
    match ctx.profile.credit_history {
        CreditHistory::NoIssues => RuleOutcome::score(CREDIT_CLEAN_POINTS),
        CreditHistory::MinorIssues => RuleOutcome::score(CREDIT_MINOR_POINTS),
        CreditHistory::MajorIssues => {
            RuleOutcome::flag(CREDIT_MAJOR_PENALTY, ReasonCode::AdverseCreditHistory)
        }
    }
}

/// Tenure rule: reward work experience, flag tenure under a year
pub fn tenure_rule(ctx: &RuleContext<'_>) -> RuleOutcome {
    let years = ctx.profile.job_experience_years;
    if years > Decimal::from(3u32) {
        RuleOutcome::score(TENURE_LONG_POINTS)
    } else if years >= Decimal::ONE {
        RuleOutcome::score(TENURE_SHORT_POINTS)
    } else {
        RuleOutcome::flag(0, ReasonCode::InsufficientTenure)
    }
}

/// Over-request rule: penalize amounts far beyond the recommendable maximum
///
/// Evaluated independently of the debt-burden rule; both penalties can apply
/// to the same request.
pub fn over_request_rule(ctx: &RuleContext<'_>) -> RuleOutcome {
    let ceiling = ctx.recommended_max_amount * ctx.policy.over_request_multiplier;
    if ctx.requested_amount > ceiling {
        RuleOutcome::flag(OVER_REQUEST_PENALTY, ReasonCode::ExceedsCapacity)
    } else {
        RuleOutcome::score(0)
    }
}

/// The rule set in its fixed evaluation order
pub const RULES: &[Rule] = &[
    debt_burden_rule,
    credit_history_rule,
    tenure_rule,
    over_request_rule,
];

/// Folds all rules into a total score delta and an ordered reason list
pub fn evaluate(ctx: &RuleContext<'_>) -> (i32, Vec<ReasonCode>) {
    RULES
        .iter()
        .fold((0, Vec::new()), |(score, mut reasons), rule| {
            let outcome = rule(ctx);
            if let Some(reason) = outcome.reason {
                reasons.push(reason);
            }
            (score + outcome.delta, reasons)
        })
}

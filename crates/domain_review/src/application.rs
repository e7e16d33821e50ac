//! Scoring application aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AgentId, ApplicantId, ApplicationId};
use domain_scoring::{Decision, ReasonCode, ScoreResult};

use crate::error::ReviewError;

/// Review state of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Awaiting a human agent; only reachable when the engine said ManualReview
    Pending,
    /// Auto-approved at creation
    Approved,
    /// Auto-denied at creation
    Denied,
    /// Approved by an agent
    AgentApproved,
    /// Denied by an agent
    AgentDenied,
}

impl ReviewStatus {
    /// Initial status derived from the engine decision
    ///
    /// Non-ambiguous decisions are mirrored into the status immediately, so
    /// the record is only left open when the decision was ManualReview.
    pub fn initial_for(decision: Decision) -> Self {
        match decision {
            Decision::Approved => ReviewStatus::Approved,
            Decision::Denied => ReviewStatus::Denied,
            Decision::ManualReview => ReviewStatus::Pending,
        }
    }

    /// Whether this status admits no further transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReviewStatus::Pending)
    }

    /// Stable storage encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Denied => "denied",
            ReviewStatus::AgentApproved => "agent_approved",
            ReviewStatus::AgentDenied => "agent_denied",
        }
    }

    /// Parses the storage encoding
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReviewStatus::Pending),
            "approved" => Some(ReviewStatus::Approved),
            "denied" => Some(ReviewStatus::Denied),
            "agent_approved" => Some(ReviewStatus::AgentApproved),
            "agent_denied" => Some(ReviewStatus::AgentDenied),
            _ => None,
        }
    }
}

/// Resolution action available to an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Deny,
}

impl ReviewAction {
    /// The terminal status this action transitions a pending application into
    pub fn resolved_status(&self) -> ReviewStatus {
        match self {
            ReviewAction::Approve => ReviewStatus::AgentApproved,
            ReviewAction::Deny => ReviewStatus::AgentDenied,
        }
    }
}

/// A scoring application and its review state
///
/// Created once per scoring request with the engine outcome persisted
/// verbatim; never deleted. The review status is the only mutable part and
/// moves monotonically from Pending to exactly one terminal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Unique identifier
    pub id: ApplicationId,
    /// Owning applicant
    pub applicant_id: ApplicantId,
    /// Amount the applicant asked for
    pub requested_amount: Decimal,
    /// Engine decision, persisted verbatim
    pub decision: Decision,
    /// Engine score, persisted verbatim
    pub cold_score: i32,
    /// Debt-to-income ratio at scoring time
    pub dti_ratio: Decimal,
    /// Reason codes from the engine, in evaluation order
    pub reasons: Vec<ReasonCode>,
    /// Client-facing explanation text, if narrative generation succeeded
    pub narrative: Option<String>,
    /// Review state
    pub review_status: ReviewStatus,
    /// Agent who resolved the application
    pub agent_id: Option<AgentId>,
    /// Free-text agent notes; stored, never interpreted
    pub agent_notes: Option<String>,
    /// When the agent resolution happened
    pub resolved_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Seeds a new application from an engine result
    pub fn from_score(
        applicant_id: ApplicantId,
        result: &ScoreResult,
        narrative: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ApplicationId::new_v7(),
            applicant_id,
            requested_amount: result.requested_amount,
            decision: result.decision,
            cold_score: result.total_score,
            dti_ratio: result.dti_ratio,
            reasons: result.recommendations.clone(),
            narrative,
            review_status: ReviewStatus::initial_for(result.decision),
            agent_id: None,
            agent_notes: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the application still awaits an agent
    pub fn is_open(&self) -> bool {
        self.review_status == ReviewStatus::Pending
    }

    /// Applies an agent resolution
    ///
    /// Only valid from the Pending state; any other starting state is an
    /// error, never a silent no-op. The concurrent-access guarantee (exactly
    /// one of two racing resolutions wins) is enforced by the store, which
    /// must check the Pending precondition atomically with the write.
    pub fn resolve(
        &mut self,
        action: ReviewAction,
        agent_id: AgentId,
        notes: Option<String>,
    ) -> Result<(), ReviewError> {
        let target = action.resolved_status();
        if self.review_status != ReviewStatus::Pending {
            return Err(ReviewError::InvalidTransition {
                from: self.review_status.as_str().to_string(),
                to: target.as_str().to_string(),
            });
        }

        let now = Utc::now();
        self.review_status = target;
        self.agent_id = Some(agent_id);
        self.agent_notes = notes;
        self.resolved_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_scoring::ScoringPolicy;
    use domain_scoring::{CreditHistory, FinancialProfile, IncomeProof};
    use rust_decimal_macros::dec;

    fn score_with_decision(decision: Decision) -> ScoreResult {
        // A real engine result, then decision forced for the scenario
        let profile = FinancialProfile {
            income: dec!(500000),
            monthly_payments: dec!(50000),
            credit_history: CreditHistory::NoIssues,
            job_experience_years: dec!(5),
            age: 35,
            income_proof: IncomeProof::Official,
        };
        let mut result =
            domain_scoring::score(&profile, dec!(1000000), &ScoringPolicy::default()).unwrap();
        result.decision = decision;
        result
    }

    #[test]
    fn test_manual_review_creates_pending_application() {
        let app = Application::from_score(
            ApplicantId::new_v7(),
            &score_with_decision(Decision::ManualReview),
            None,
        );

        assert_eq!(app.review_status, ReviewStatus::Pending);
        assert!(app.is_open());
        assert!(app.agent_id.is_none());
        assert!(app.resolved_at.is_none());
    }

    #[test]
    fn test_auto_decision_is_mirrored_into_status() {
        let approved = Application::from_score(
            ApplicantId::new_v7(),
            &score_with_decision(Decision::Approved),
            None,
        );
        assert_eq!(approved.review_status, ReviewStatus::Approved);
        assert!(!approved.is_open());

        let denied = Application::from_score(
            ApplicantId::new_v7(),
            &score_with_decision(Decision::Denied),
            None,
        );
        assert_eq!(denied.review_status, ReviewStatus::Denied);
    }

    #[test]
    fn test_resolve_pending_application() {
        let mut app = Application::from_score(
            ApplicantId::new_v7(),
            &score_with_decision(Decision::ManualReview),
            None,
        );
        let agent = AgentId::new_v7();

        app.resolve(
            ReviewAction::Approve,
            agent,
            Some("verified income by phone".to_string()),
        )
        .unwrap();

        assert_eq!(app.review_status, ReviewStatus::AgentApproved);
        assert_eq!(app.agent_id, Some(agent));
        assert_eq!(
            app.agent_notes.as_deref(),
            Some("verified income by phone")
        );
        assert!(app.resolved_at.is_some());
    }

    #[test]
    fn test_resolve_terminal_application_fails() {
        let mut app = Application::from_score(
            ApplicantId::new_v7(),
            &score_with_decision(Decision::Approved),
            None,
        );

        let result = app.resolve(ReviewAction::Deny, AgentId::new_v7(), None);
        assert!(matches!(
            result,
            Err(ReviewError::InvalidTransition { .. })
        ));
        // The record is unchanged
        assert_eq!(app.review_status, ReviewStatus::Approved);
        assert!(app.agent_id.is_none());
    }

    #[test]
    fn test_resolution_is_not_reversible() {
        let mut app = Application::from_score(
            ApplicantId::new_v7(),
            &score_with_decision(Decision::ManualReview),
            None,
        );

        app.resolve(ReviewAction::Deny, AgentId::new_v7(), None)
            .unwrap();

        let second = app.resolve(ReviewAction::Approve, AgentId::new_v7(), None);
        assert!(second.is_err());
        assert_eq!(app.review_status, ReviewStatus::AgentDenied);
    }

    #[test]
    fn test_status_storage_encoding_round_trip() {
        let statuses = [
            ReviewStatus::Pending,
            ReviewStatus::Approved,
            ReviewStatus::Denied,
            ReviewStatus::AgentApproved,
            ReviewStatus::AgentDenied,
        ];

        for status in statuses {
            assert_eq!(ReviewStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ReviewStatus::parse("withdrawn"), None);
    }

    #[test]
    fn test_score_fields_persisted_verbatim() {
        let result = score_with_decision(Decision::ManualReview);
        let app = Application::from_score(ApplicantId::new_v7(), &result, Some("hi".into()));

        assert_eq!(app.requested_amount, result.requested_amount);
        assert_eq!(app.cold_score, result.total_score);
        assert_eq!(app.dti_ratio, result.dti_ratio);
        assert_eq!(app.reasons, result.recommendations);
        assert_eq!(app.narrative.as_deref(), Some("hi"));
    }
}

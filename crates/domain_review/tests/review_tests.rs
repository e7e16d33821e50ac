//! End-to-end lifecycle tests: engine output feeding the review state machine

use rust_decimal_macros::dec;

use core_kernel::{AgentId, ApplicantId};
use domain_review::{Application, ReviewAction, ReviewError, ReviewStatus};
use domain_scoring::{
    score, CreditHistory, Decision, FinancialProfile, IncomeProof, ScoringPolicy,
};

fn strong_profile() -> FinancialProfile {
    FinancialProfile {
        income: dec!(500000),
        monthly_payments: dec!(50000),
        credit_history: CreditHistory::NoIssues,
        job_experience_years: dec!(5),
        age: 35,
        income_proof: IncomeProof::Official,
    }
}

fn middling_profile() -> FinancialProfile {
    FinancialProfile {
        income: dec!(300000),
        monthly_payments: dec!(100000),
        credit_history: CreditHistory::NoIssues,
        job_experience_years: dec!(4),
        age: 30,
        income_proof: IncomeProof::Indirect,
    }
}

#[test]
fn test_approved_score_closes_application_at_creation() {
    let policy = ScoringPolicy::default();
    let result = score(&strong_profile(), dec!(1000000), &policy).unwrap();
    assert_eq!(result.decision, Decision::Approved);

    let app = Application::from_score(ApplicantId::new_v7(), &result, None);

    assert_eq!(app.review_status, ReviewStatus::Approved);
    assert!(!app.is_open());

    // No agent action is ever legal on it
    let mut app = app;
    assert!(app
        .resolve(ReviewAction::Approve, AgentId::new_v7(), None)
        .is_err());
}

#[test]
fn test_manual_review_score_stays_open_until_agent_acts() {
    let policy = ScoringPolicy::default();
    let result = score(&middling_profile(), dec!(1500000), &policy).unwrap();
    assert_eq!(result.decision, Decision::ManualReview);

    let mut app = Application::from_score(ApplicantId::new_v7(), &result, None);
    assert!(app.is_open());

    let agent = AgentId::new_v7();
    app.resolve(ReviewAction::Deny, agent, Some("income unverifiable".to_string()))
        .unwrap();

    assert_eq!(app.review_status, ReviewStatus::AgentDenied);
    assert_eq!(app.agent_id, Some(agent));

    // And the terminal state is final
    let again = app.resolve(ReviewAction::Approve, AgentId::new_v7(), None);
    assert!(matches!(again, Err(ReviewError::InvalidTransition { .. })));
}

#[test]
fn test_engine_outcome_is_recorded_verbatim() {
    let policy = ScoringPolicy::default();
    let result = score(&strong_profile(), dec!(50000000000), &policy).unwrap();
    assert_eq!(result.decision, Decision::Denied);

    let app = Application::from_score(ApplicantId::new_v7(), &result, Some("text".into()));

    assert_eq!(app.cold_score, result.total_score);
    assert_eq!(app.dti_ratio, result.dti_ratio);
    assert_eq!(app.reasons, result.recommendations);
    assert_eq!(app.review_status, ReviewStatus::Denied);
}

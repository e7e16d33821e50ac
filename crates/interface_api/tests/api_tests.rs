//! API round-trip tests
//!
//! Drives the full router over the in-memory port adapters: the client
//! scoring flow, the agent review cabinet, and the auth boundaries.

use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use core_kernel::AgentId;
use core_kernel::ApplicantId;
use domain_review::ports::mock::MockApplicationStore;
use domain_scoring::ports::mock::MockProfileStore;
use domain_scoring::ScoringPolicy;
use interface_api::narrative::{TemplateNarrator, AMOUNT_PROMPT};
use interface_api::{auth, config::ApiConfig, create_router, AppState};

fn test_server() -> TestServer {
    let state = AppState {
        config: ApiConfig::default(),
        policy: ScoringPolicy::default(),
        profiles: Arc::new(MockProfileStore::new()),
        applications: Arc::new(MockApplicationStore::new()),
        narrator: Arc::new(TemplateNarrator::new()),
    };
    TestServer::new(create_router(state)).expect("failed to start test server")
}

fn bearer(subject: &str, role: &str) -> HeaderValue {
    let config = ApiConfig::default();
    let token = auth::create_token(
        subject,
        vec![role.to_string()],
        &config.jwt_secret,
        config.jwt_expiration_secs,
    )
    .expect("failed to mint test token");
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("invalid header value")
}

fn strong_profile_body() -> Value {
    json!({
        "income": "500000",
        "monthly_payments": "50000",
        "credit_history": "no_issues",
        "job_experience_years": "5",
        "age": 35,
        "income_proof": "official"
    })
}

fn middling_profile_body() -> Value {
    json!({
        "income": "300000",
        "monthly_payments": "100000",
        "credit_history": "no_issues",
        "job_experience_years": "4",
        "age": 30,
        "income_proof": "indirect"
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let server = test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = test_server();

    let response = server
        .post("/api/v1/scoring/ask")
        .json(&json!({ "query": "I would like a loan of 1000000" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_boundaries() {
    let server = test_server();
    let client = bearer(&ApplicantId::new_v7().to_string(), auth::roles::CLIENT);
    let agent = bearer(&AgentId::new_v7().to_string(), auth::roles::AGENT);

    // Client tokens cannot reach the agent cabinet
    let response = server
        .get("/api/v1/agent/applications")
        .add_header(header::AUTHORIZATION, client.clone())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Agent tokens cannot submit scoring requests
    let response = server
        .post("/api/v1/scoring/ask")
        .add_header(header::AUTHORIZATION, agent)
        .json(&json!({ "query": "I would like a loan of 1000000" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_round_trip() {
    let server = test_server();
    let applicant = ApplicantId::new_v7();
    let token = bearer(&applicant.to_string(), auth::roles::CLIENT);

    // No profile yet
    let response = server
        .get("/api/v1/profiles")
        .add_header(header::AUTHORIZATION, token.clone())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    // Upsert, then read back
    let response = server
        .put("/api/v1/profiles")
        .add_header(header::AUTHORIZATION, token.clone())
        .json(&strong_profile_body())
        .await;
    response.assert_status_ok();

    let response = server
        .get("/api/v1/profiles")
        .add_header(header::AUTHORIZATION, token)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["credit_history"], "no_issues");
    assert_eq!(body["age"], 35);
}

#[tokio::test]
async fn test_invalid_profile_is_rejected() {
    let server = test_server();
    let token = bearer(&ApplicantId::new_v7().to_string(), auth::roles::CLIENT);

    let mut body = strong_profile_body();
    body["age"] = json!(17);

    let response = server
        .put("/api/v1/profiles")
        .add_header(header::AUTHORIZATION, token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_short_query_is_rejected() {
    let server = test_server();
    let applicant = ApplicantId::new_v7();
    let token = bearer(&applicant.to_string(), auth::roles::CLIENT);

    server
        .put("/api/v1/profiles")
        .add_header(header::AUTHORIZATION, token.clone())
        .json(&strong_profile_body())
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/scoring/ask")
        .add_header(header::AUTHORIZATION, token)
        .json(&json!({ "query": "hi" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_query_without_amount_prompts_for_one() {
    let server = test_server();
    let applicant = ApplicantId::new_v7();
    let token = bearer(&applicant.to_string(), auth::roles::CLIENT);

    server
        .put("/api/v1/profiles")
        .add_header(header::AUTHORIZATION, token.clone())
        .json(&strong_profile_body())
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/scoring/ask")
        .add_header(header::AUTHORIZATION, token)
        .json(&json!({ "query": "how do your loans work?" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["answer"], AMOUNT_PROMPT);
}

#[tokio::test]
async fn test_approved_request_is_recorded_as_terminal() {
    let server = test_server();
    let applicant = ApplicantId::new_v7();
    let client = bearer(&applicant.to_string(), auth::roles::CLIENT);
    let agent = bearer(&AgentId::new_v7().to_string(), auth::roles::AGENT);

    server
        .put("/api/v1/profiles")
        .add_header(header::AUTHORIZATION, client.clone())
        .json(&strong_profile_body())
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/scoring/ask")
        .add_header(header::AUTHORIZATION, client)
        .json(&json!({ "query": "I would like a loan of 1 000 000" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let answer = body["answer"].as_str().unwrap();
    assert!(answer.contains("approved"));

    // The application is recorded, already terminal, and not in the queue
    let response = server
        .get("/api/v1/agent/applications")
        .add_header(header::AUTHORIZATION, agent.clone())
        .await;
    response.assert_status_ok();

    let listing: Value = response.json();
    assert_eq!(listing["meta"]["total_items"], 1);
    assert_eq!(listing["data"][0]["review_status"], "approved");
    assert_eq!(listing["data"][0]["cold_score"], 800);

    let response = server
        .get("/api/v1/agent/applications/review")
        .add_header(header::AUTHORIZATION, agent)
        .await;
    let queue: Value = response.json();
    assert_eq!(queue["meta"]["total_items"], 0);
}

#[tokio::test]
async fn test_manual_review_flow_with_agent_resolution() {
    let server = test_server();
    let applicant = ApplicantId::new_v7();
    let client = bearer(&applicant.to_string(), auth::roles::CLIENT);
    let agent = bearer(&AgentId::new_v7().to_string(), auth::roles::AGENT);

    server
        .put("/api/v1/profiles")
        .add_header(header::AUTHORIZATION, client.clone())
        .json(&middling_profile_body())
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/scoring/ask")
        .add_header(header::AUTHORIZATION, client)
        .json(&json!({ "query": "I would like a loan of 1500000" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["answer"].as_str().unwrap().contains("manual review"));

    // It shows up in the review queue
    let response = server
        .get("/api/v1/agent/applications/review")
        .add_header(header::AUTHORIZATION, agent.clone())
        .await;
    response.assert_status_ok();

    let queue: Value = response.json();
    assert_eq!(queue["meta"]["total_items"], 1);
    let id = queue["data"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(queue["data"][0]["review_status"], "pending");

    // The agent approves it
    let response = server
        .post(&format!("/api/v1/agent/applications/{}/resolve", id))
        .add_header(header::AUTHORIZATION, agent.clone())
        .json(&json!({ "action": "approve", "notes": "income confirmed by employer" }))
        .await;
    response.assert_status_ok();

    let resolved: Value = response.json();
    assert_eq!(resolved["review_status"], "agent_approved");
    assert_eq!(resolved["agent_notes"], "income confirmed by employer");

    // A second resolution attempt conflicts
    let response = server
        .post(&format!("/api/v1/agent/applications/{}/resolve", id))
        .add_header(header::AUTHORIZATION, agent.clone())
        .json(&json!({ "action": "deny" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // And the queue is empty again
    let response = server
        .get("/api/v1/agent/applications/review")
        .add_header(header::AUTHORIZATION, agent)
        .await;
    let queue: Value = response.json();
    assert_eq!(queue["meta"]["total_items"], 0);
}

#[tokio::test]
async fn test_resolving_auto_terminal_application_conflicts() {
    let server = test_server();
    let applicant = ApplicantId::new_v7();
    let client = bearer(&applicant.to_string(), auth::roles::CLIENT);
    let agent = bearer(&AgentId::new_v7().to_string(), auth::roles::AGENT);

    server
        .put("/api/v1/profiles")
        .add_header(header::AUTHORIZATION, client.clone())
        .json(&strong_profile_body())
        .await
        .assert_status_ok();

    server
        .post("/api/v1/scoring/ask")
        .add_header(header::AUTHORIZATION, client)
        .json(&json!({ "query": "I would like a loan of 1000000" }))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/v1/agent/applications")
        .add_header(header::AUTHORIZATION, agent.clone())
        .await;
    let listing: Value = response.json();
    let id = listing["data"][0]["id"].as_str().unwrap().to_string();

    let response = server
        .post(&format!("/api/v1/agent/applications/{}/resolve", id))
        .add_header(header::AUTHORIZATION, agent)
        .json(&json!({ "action": "deny" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_denied_oversized_request_mentions_alternative() {
    let server = test_server();
    let applicant = ApplicantId::new_v7();
    let token = bearer(&applicant.to_string(), auth::roles::CLIENT);

    server
        .put("/api/v1/profiles")
        .add_header(header::AUTHORIZATION, token.clone())
        .json(&strong_profile_body())
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/scoring/ask")
        .add_header(header::AUTHORIZATION, token)
        .json(&json!({ "query": "give me 50,000,000,000 right now" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let answer = body["answer"].as_str().unwrap();
    assert!(answer.contains("denied"));
    // The narrator offers the recommended maximum as an alternative
    assert!(answer.contains("9000000"));
}

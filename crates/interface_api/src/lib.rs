//! HTTP API Layer
//!
//! This crate provides the REST API for the lending intake service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: the client scoring flow and the agent review cabinet
//! - **Middleware**: JWT authentication and audit logging
//! - **DTOs**: request/response data transfer objects with validation
//! - **Narrative**: the local adapter for the narrative port
//!
//! Handlers talk to storage exclusively through the domain port traits, so
//! the same router runs against PostgreSQL adapters in production and the
//! in-memory adapters in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod narrative;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_review::ApplicationStore;
use domain_scoring::{NarrativePort, ProfileStore, ScoringPolicy};

use crate::config::ApiConfig;
use crate::handlers::{applications, health, profiles, scoring};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub policy: ScoringPolicy,
    pub profiles: Arc<dyn ProfileStore>,
    pub applications: Arc<dyn ApplicationStore>,
    pub narrator: Arc<dyn NarrativePort>,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state (config, policy, port adapters)
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new().route("/health", get(health::health_check));

    // Client scoring flow
    let scoring_routes = Router::new().route("/ask", post(scoring::ask));

    // Client profile management
    let profile_routes = Router::new().route(
        "/",
        put(profiles::upsert_profile).get(profiles::get_profile),
    );

    // Agent review cabinet
    let agent_routes = Router::new()
        .route("/applications/review", get(applications::review_queue))
        .route("/applications", get(applications::list_all))
        .route("/applications/:id", get(applications::get_application))
        .route(
            "/applications/:id/resolve",
            post(applications::resolve_application),
        );

    // Protected API routes
    let api_routes = Router::new()
        .nest("/scoring", scoring_routes)
        .nest("/profiles", profile_routes)
        .nest("/agent", agent_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

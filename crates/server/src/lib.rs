//! Market Server library.
//!
//! This crate provides the REST gateway as a library, allowing it to be
//! spawned in-process by the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]
// The workspace-level `unsafe_code = "deny"` reaches the test target too,
// where the line above expands to nothing; tests mutate env vars via the
// (unsafe since 2024) std::env setters and need the source-level override.
#![cfg_attr(test, allow(unsafe_code))]

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router for the given state.
#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config().cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

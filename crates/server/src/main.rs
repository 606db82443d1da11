//! Market Server - REST gateway for the product catalog.
//!
//! Serves the catalog CRUD surface under `/api` with cookie-based JWT
//! authentication.
//!
//! # Architecture
//!
//! - Axum web framework, JSON request/response bodies
//! - In-memory entity store injected via application state
//! - HS256 access/refresh tokens set as http-only cookies
//! - CORS with credentials for the browser front end

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market_server::config::ServerConfig;
use market_server::state::AppState;
use market_server::store::UserGroup;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "market_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(config);

    // Seed the configured admin account; there is no registration route.
    if let Some(seed) = state.config().seed_admin.clone() {
        state
            .auth()
            .create_user(
                &seed.username,
                &seed.email,
                seed.password.expose_secret(),
                UserGroup::Admin,
                None,
            )
            .await
            .expect("Failed to seed admin user");
        tracing::info!(username = %seed.username, "Seeded admin user");
    }

    let addr = state.config().socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!("server listening on {addr}");

    axum::serve(listener, market_server::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

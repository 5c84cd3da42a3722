//! VaaS API: the HTTP surface of the idea validation service
//!
//! One POST endpoint does the work; health and metrics round it out.
//! `create_app` builds the router against injected state so tests can
//! swap the stores and the orchestrator client for fixtures.

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use vaas_core::VaasError;

pub mod config;
pub mod handlers;
pub mod identity;
pub mod metrics;
pub mod response;
pub mod state;

pub use config::Config;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/validate", post(handlers::validate))
        .route("/v1/trends", get(handlers::trends))
        .route("/v1/ideas", get(handlers::ideas))
        .route("/v1/health", get(handlers::health))
        .route("/v1/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind, start the window sweeper, and serve until shutdown
pub async fn run(config: Config) -> Result<(), VaasError> {
    let state = AppState::from_config(config)?;
    spawn_sweeper(&state);

    let addr = state.config.addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|err| VaasError::Config(format!("bind {addr}: {err}")))?;
    tracing::info!(%addr, "vaas api listening");

    axum::serve(listener, create_app(state))
        .await
        .map_err(|err| VaasError::Config(err.to_string()))
}

/// Periodic eviction of expired rate and quota windows
fn spawn_sweeper(state: &AppState) {
    let rate = state.rate.clone();
    let quota = state.quota.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(config::SWEEP_INTERVAL_SECS));
        interval.tick().await;
        loop {
            interval.tick().await;
            rate.sweep();
            quota.sweep();
            tracing::debug!(tracked = rate.tracked_keys(), "swept expired windows");
        }
    });
}

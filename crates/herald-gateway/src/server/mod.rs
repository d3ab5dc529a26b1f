//! Health server
//!
//! Optional HTTP listener exposing a liveness endpoint.

mod handler;

pub use handler::health_check;

use std::sync::Arc;

use axum::{routing::get, Router};
use herald_common::{AppError, AppResult};
use herald_service::ServiceContext;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared state of the health router
#[derive(Clone, Debug)]
pub struct HealthState {
    name: Arc<str>,
    ctx: ServiceContext,
}

impl HealthState {
    pub fn new(name: &str, ctx: ServiceContext) -> Self {
        Self {
            name: Arc::from(name),
            ctx,
        }
    }
}

/// Build the health router
pub fn create_app(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the health endpoint until the listener fails
pub async fn run_server(addr: &str, state: HealthState) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Health(format!("failed to bind to {addr}: {e}")))?;

    tracing::info!("Health endpoint listening on http://{}/health", addr);

    axum::serve(listener, create_app(state))
        .await
        .map_err(|e| AppError::Health(format!("server error: {e}")))
}

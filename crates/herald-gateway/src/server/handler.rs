//! Health handler

use axum::{extract::State, Json};
use herald_service::HealthResponse;

use super::HealthState;

/// Liveness check with registry and scheduler counts
///
/// GET /health
pub async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(&state.name, &state.ctx))
}

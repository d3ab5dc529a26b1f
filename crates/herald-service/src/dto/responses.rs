//! Response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::ServiceContext;

/// Liveness response with a summary of in-memory state
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub known_guilds: usize,
    pub bindings: usize,
    pub pending_announcements: usize,
}

impl HealthResponse {
    pub fn healthy(name: &str, ctx: &ServiceContext) -> Self {
        Self {
            status: "healthy".to_string(),
            name: name.to_string(),
            timestamp: Utc::now(),
            known_guilds: ctx.registry().guild_count(),
            bindings: ctx.registry().binding_count(),
            pending_announcements: ctx.scheduler().len(),
        }
    }
}

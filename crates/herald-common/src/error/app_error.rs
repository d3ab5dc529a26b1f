//! Application error types
//!
//! Process-level errors: everything that can stop the bot from starting or
//! keep it from staying connected.

use crate::config::ConfigError;
use crate::telemetry::TracingError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tracing(#[from] TracingError),

    /// The gateway client could not start or gave up reconnecting
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Health server error: {0}")]
    Health(String),

    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Tracing(_) => "TRACING_ERROR",
            Self::Gateway(_) => "GATEWAY_ERROR",
            Self::Health(_) => "HEALTH_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create a gateway error
    #[must_use]
    pub fn gateway(msg: impl std::fmt::Display) -> Self {
        Self::Gateway(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

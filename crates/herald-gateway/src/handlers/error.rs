//! Handler error types

use herald_core::PlatformError;
use herald_service::ServiceError;
use thiserror::Error;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Service error
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Platform call made directly by the handler failed
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl HandlerError {
    /// Whether the failure is expected to clear up on its own
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Service(e) => e.is_transient(),
            Self::Platform(e) => e.is_transient(),
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;

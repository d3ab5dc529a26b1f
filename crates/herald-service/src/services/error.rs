//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use herald_core::{DomainError, PlatformError};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation (bad time, unknown announcement, missing permission, ...)
    Domain(DomainError),

    /// The chat platform rejected or failed a call
    Platform(PlatformError),

    /// Request failed field validation
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Platform(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Platform(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Platform(_) => "PLATFORM_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the requester supplied bad input (never worth retrying)
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_validation(),
            Self::Validation(_) => true,
            _ => false,
        }
    }

    /// Whether the referenced item does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_not_found(),
            Self::Platform(PlatformError::NotFound(_)) => true,
            _ => false,
        }
    }

    /// Whether the failure came from the platform and may clear up on its own
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Platform(e) if e.is_transient())
    }

    /// Reply text shown to the member who issued a command
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(DomainError::InvalidTime(_)) => {
                "Invalid time format. Use 'YYYY-MM-DD HH:MM'.".to_string()
            }
            Self::Domain(DomainError::TimeNotInFuture(_)) => {
                "The scheduled time must be in the future.".to_string()
            }
            Self::Domain(DomainError::AnnouncementNotFound(_)) => {
                "No announcement found for the specified time.".to_string()
            }
            Self::Domain(DomainError::ChannelNotAllowed { allowed }) => {
                format!("Announcements can only be posted in <#{allowed}>.")
            }
            Self::Domain(DomainError::MissingPermission(_)) => {
                "You don't have permission to use this command.".to_string()
            }
            Self::Domain(DomainError::RoleNotFound(_)) => "Role not found.".to_string(),
            Self::Domain(DomainError::Validation(msg)) | Self::Validation(msg) => msg.clone(),
            Self::Platform(PlatformError::NotFound(what)) => format!("Not found: {what}."),
            Self::Platform(_) => {
                "The chat platform did not accept the request. Please try again later.".to_string()
            }
            Self::Internal(_) => "Something went wrong.".to_string(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<PlatformError> for ServiceError {
    fn from(err: PlatformError) -> Self {
        Self::Platform(err)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(crate::dto::first_validation_message(&errors))
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

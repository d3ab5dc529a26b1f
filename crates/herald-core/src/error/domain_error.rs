//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{Permissions, ScheduleTime, ScheduleTimeError, Snowflake};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("No announcement scheduled for {0}")]
    AnnouncementNotFound(ScheduleTime),

    #[error("Role not found: {0}")]
    RoleNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error(transparent)]
    InvalidTime(#[from] ScheduleTimeError),

    #[error("Scheduled time {0} is not in the future")]
    TimeNotInFuture(ScheduleTime),

    #[error("Validation error: {0}")]
    Validation(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(Permissions),

    #[error("Announcements are restricted to channel {allowed}")]
    ChannelNotAllowed { allowed: Snowflake },
}

impl DomainError {
    /// Get a stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::AnnouncementNotFound(_) => "UNKNOWN_ANNOUNCEMENT",
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",
            Self::InvalidTime(_) => "INVALID_TIME",
            Self::TimeNotInFuture(_) => "TIME_NOT_IN_FUTURE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::ChannelNotAllowed { .. } => "CHANNEL_NOT_ALLOWED",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AnnouncementNotFound(_) | Self::RoleNotFound(_))
    }

    /// Check if this is an invalid-input error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidTime(_) | Self::TimeNotInFuture(_) | Self::Validation(_)
        )
    }
}

//! Platform errors - failures reported by the chat-platform collaborator

use thiserror::Error;

/// Errors raised by [`crate::ChatPlatform`] implementations
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Platform returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Unknown platform resource: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode platform response: {0}")]
    Decode(String),
}

impl PlatformError {
    /// Whether retrying the same call later could succeed
    ///
    /// Missing resources and 4xx rejections other than 429 are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::Transport(_) => true,
            Self::NotFound(_) | Self::Decode(_) => false,
        }
    }
}

/// Result type for platform calls
pub type PlatformResult<T> = Result<T, PlatformError>;

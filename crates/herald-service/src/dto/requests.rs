//! Request DTOs for service entry points
//!
//! Command arguments arrive as loose strings; these structs carry them into
//! the services and validate them with the `validator` crate.

use herald_core::{Announcement, Snowflake};
use validator::{Validate, ValidationErrors};

// ============================================================================
// Announcement Requests
// ============================================================================

/// Announcement to send now or schedule for later
#[derive(Debug, Clone, Validate)]
pub struct AnnouncementRequest {
    pub channel_id: Snowflake,

    #[validate(length(min = 1, max = 256, message = "Title must be 1-256 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub body: String,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,

    #[validate(length(min = 1, max = 80, message = "Button label must be 1-80 characters"))]
    pub button_label: String,

    #[validate(url(message = "Button URL must be a valid URL"))]
    pub button_url: String,
}

impl AnnouncementRequest {
    /// Convert into the domain entity (call after validation)
    pub fn into_announcement(self) -> Announcement {
        Announcement {
            channel_id: self.channel_id,
            title: self.title,
            body: self.body,
            image_url: self.image_url,
            button_label: self.button_label,
            button_url: self.button_url,
        }
    }
}

// ============================================================================
// Invite Requests
// ============================================================================

/// Create an invite bound to a role
#[derive(Debug, Clone, Validate)]
pub struct CreateInviteRequest {
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub role_id: Snowflake,

    /// 0 = unlimited
    #[validate(range(max = 100, message = "max_uses must be between 0 and 100"))]
    pub max_uses: u32,

    /// Seconds, 0 = never expires
    #[validate(range(max = 604_800, message = "expire_after must be between 0 and 604800 seconds"))]
    pub max_age: u32,
}

// ============================================================================
// Gateway Input
// ============================================================================

/// Chat message seen by the bot, reduced to what command handling needs
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub author_id: Snowflake,
    pub author_is_bot: bool,
    pub content: String,
}

/// Pick a single human-readable message out of a validation failure
///
/// Fields are visited in name order so the same input always yields the same
/// message.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| errs.iter().map(move |err| (field, err)))
        .map(|(field, err)| match &err.message {
            Some(message) => message.to_string(),
            None => format!("Invalid value for {field}"),
        })
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

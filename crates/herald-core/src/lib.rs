//! # herald-core
//!
//! Domain layer containing entities, value objects, errors, and the traits
//! the bot uses to talk to the chat platform.
//! This crate has no dependency on any transport (HTTP, WebSocket, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    detect_used_invite, Announcement, Embed, EmbedField, Invite, InviteSnapshot, LinkButton,
    MemberAccess, MessagePayload, OverwriteTarget, PermissionOverwrite, Role,
};
pub use error::{DomainError, PlatformError, PlatformResult};
pub use traits::{ChatPlatform, Clock, SystemClock};
pub use value_objects::{
    Permissions, ScheduleTime, ScheduleTimeError, Snowflake, SnowflakeParseError,
};

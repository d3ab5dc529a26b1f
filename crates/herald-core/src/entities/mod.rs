//! Domain entities - core business objects

mod access;
mod announcement;
mod invite;
mod message;
mod role;
mod snapshot;

pub use access::{MemberAccess, OverwriteTarget, PermissionOverwrite};
pub use announcement::Announcement;
pub use invite::Invite;
pub use message::{Embed, EmbedField, LinkButton, MessagePayload};
pub use role::Role;
pub use snapshot::{detect_used_invite, InviteSnapshot};

//! Chat platform port
//!
//! Everything the bot needs from the chat platform. Implementations are
//! expected to be cheap to share behind an `Arc` and safe to call from
//! several tasks at once.

use async_trait::async_trait;

use crate::entities::{Invite, MessagePayload, Role};
use crate::error::PlatformResult;
use crate::value_objects::{Permissions, Snowflake};

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// List every invite currently active in a guild, with use counts
    async fn fetch_invites(&self, guild_id: Snowflake) -> PlatformResult<Vec<Invite>>;

    /// Create a unique invite for a channel
    ///
    /// `max_uses` and `max_age_secs` use 0 for "unlimited".
    async fn create_invite(
        &self,
        channel_id: Snowflake,
        max_uses: u32,
        max_age_secs: u32,
    ) -> PlatformResult<Invite>;

    /// Look up a role by ID, `None` if the guild no longer has it
    async fn fetch_role(&self, guild_id: Snowflake, role_id: Snowflake)
        -> PlatformResult<Option<Role>>;

    /// Add a role to a guild member
    async fn grant_role(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
        role_id: Snowflake,
    ) -> PlatformResult<()>;

    /// Send a message to a channel
    async fn send_message(&self, channel_id: Snowflake, payload: &MessagePayload)
        -> PlatformResult<()>;

    /// Permissions of a member inside a channel, overwrites included
    async fn member_permissions(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        member_id: Snowflake,
    ) -> PlatformResult<Permissions>;
}

//! Platform client
//!
//! [`ChatPlatform`] over serenity's HTTP client. Serenity tracks the
//! platform's per-route rate-limit buckets and waits out 429s itself.

use std::sync::Arc;

use async_trait::async_trait;
use herald_core::{
    ChatPlatform, Invite, MemberAccess, MessagePayload, Permissions, PlatformResult, Role,
    Snowflake,
};
use serenity::all::{ChannelId, CreateInvite, GuildId, RoleId, UserId};
use serenity::http::Http;
use tracing::{debug, instrument};

use super::convert::{self, platform_error, platform_id};

/// Audit log reason attached to role grants
const GRANT_REASON: &str = "Joined through a role-linked invite";

/// Platform client backed by serenity
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Client for a bot token
    pub fn from_token(token: &str) -> Self {
        Self::new(Arc::new(Http::new(token)))
    }
}

impl std::fmt::Debug for DiscordPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordPlatform").finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    #[instrument(skip(self))]
    async fn fetch_invites(&self, guild_id: Snowflake) -> PlatformResult<Vec<Invite>> {
        let invites = self
            .http
            .get_guild_invites(platform_id::<GuildId>(guild_id)?)
            .await
            .map_err(platform_error)?;

        Ok(invites
            .into_iter()
            .map(|invite| convert::invite(invite, guild_id))
            .collect())
    }

    #[instrument(skip(self))]
    async fn create_invite(
        &self,
        channel_id: Snowflake,
        max_uses: u32,
        max_age_secs: u32,
    ) -> PlatformResult<Invite> {
        let builder = CreateInvite::new()
            .max_uses(u8::try_from(max_uses).unwrap_or(u8::MAX))
            .max_age(max_age_secs)
            .unique(true);

        let invite = platform_id::<ChannelId>(channel_id)?
            .create_invite(self.http.as_ref(), builder)
            .await
            .map_err(platform_error)?;

        // Guild is filled in by the caller when the response omits it
        Ok(convert::invite(invite, Snowflake::default()))
    }

    #[instrument(skip(self))]
    async fn fetch_role(
        &self,
        guild_id: Snowflake,
        role_id: Snowflake,
    ) -> PlatformResult<Option<Role>> {
        let roles = self
            .http
            .get_guild_roles(platform_id::<GuildId>(guild_id)?)
            .await
            .map_err(platform_error)?;

        Ok(roles
            .iter()
            .find(|role| convert::snowflake(role.id) == role_id)
            .map(convert::role))
    }

    #[instrument(skip(self))]
    async fn grant_role(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
        role_id: Snowflake,
    ) -> PlatformResult<()> {
        self.http
            .add_member_role(
                platform_id::<GuildId>(guild_id)?,
                platform_id::<UserId>(member_id)?,
                platform_id::<RoleId>(role_id)?,
                Some(GRANT_REASON),
            )
            .await
            .map_err(platform_error)
    }

    #[instrument(skip(self, payload))]
    async fn send_message(
        &self,
        channel_id: Snowflake,
        payload: &MessagePayload,
    ) -> PlatformResult<()> {
        platform_id::<ChannelId>(channel_id)?
            .send_message(self.http.as_ref(), convert::message(payload))
            .await
            .map_err(platform_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_permissions(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        member_id: Snowflake,
    ) -> PlatformResult<Permissions> {
        let guild = self
            .http
            .get_guild(platform_id::<GuildId>(guild_id)?)
            .await
            .map_err(platform_error)?;
        let owner_id = convert::snowflake(guild.owner_id);
        if owner_id == member_id {
            return Ok(Permissions::all());
        }

        let member = self
            .http
            .get_member(guild.id, platform_id::<UserId>(member_id)?)
            .await
            .map_err(platform_error)?;
        let channel = self
            .http
            .get_channel(platform_id::<ChannelId>(channel_id)?)
            .await
            .map_err(platform_error)?;

        let overwrites: Vec<_> = channel
            .guild()
            .map(|channel| {
                channel
                    .permission_overwrites
                    .iter()
                    .filter_map(convert::overwrite)
                    .collect()
            })
            .unwrap_or_default();
        let roles: Vec<Role> = guild.roles.values().map(convert::role).collect();

        let access = MemberAccess {
            guild_id,
            owner_id,
            member_id,
            roles: member.roles.iter().map(|&id| convert::snowflake(id)).collect(),
        };
        let permissions = access.channel_permissions(&roles, &overwrites);
        debug!(permissions = %permissions, "Resolved member permissions");

        Ok(permissions)
    }
}

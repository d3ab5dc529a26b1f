//! Serenity event bridge
//!
//! Converts serenity's gateway events into [`BotEvent`]s. Serenity runs
//! each handler call on its own task, so a slow platform call never stalls
//! the shard.

use async_trait::async_trait;
use herald_service::IncomingMessage;
use serenity::all::{
    Context, Guild, InviteCreateEvent, Member, Message, Ready, ResumedEvent, UnavailableGuild,
};
use tracing::trace;

use crate::events::BotEvent;
use crate::handlers::EventHandler;
use crate::platform::convert::{snowflake, timestamp};

/// Serenity event handler feeding the bot's [`EventHandler`]
pub struct GatewayBridge {
    handler: EventHandler,
}

impl GatewayBridge {
    pub fn new(handler: EventHandler) -> Self {
        Self { handler }
    }

    async fn forward(&self, event: BotEvent) {
        trace!(event = %event, "Dispatch received");
        self.handler.dispatch(event).await;
    }
}

#[async_trait]
impl serenity::all::EventHandler for GatewayBridge {
    async fn ready(&self, _: Context, ready: Ready) {
        self.forward(BotEvent::Ready {
            user_id: snowflake(ready.user.id),
            username: ready.user.name.clone(),
            guilds: ready.guilds.len(),
        })
        .await;
    }

    async fn resume(&self, _: Context, _: ResumedEvent) {
        self.forward(BotEvent::Resumed).await;
    }

    async fn guild_create(&self, _: Context, guild: Guild, _: Option<bool>) {
        self.forward(BotEvent::GuildAvailable {
            guild_id: snowflake(guild.id),
            name: guild.name,
        })
        .await;
    }

    async fn guild_delete(&self, _: Context, incomplete: UnavailableGuild, _: Option<Guild>) {
        self.forward(BotEvent::GuildRemoved {
            guild_id: snowflake(incomplete.id),
            unavailable: incomplete.unavailable,
        })
        .await;
    }

    async fn guild_member_addition(&self, _: Context, member: Member) {
        self.forward(BotEvent::MemberJoined {
            guild_id: snowflake(member.guild_id),
            member_id: snowflake(member.user.id),
        })
        .await;
    }

    async fn invite_create(&self, _: Context, data: InviteCreateEvent) {
        // Invites outside a guild cannot be role-linked
        let Some(guild_id) = data.guild_id else {
            return;
        };

        let mut invite = herald_core::Invite::new(data.code, snowflake(guild_id))
            .with_channel(snowflake(data.channel_id))
            .with_uses(data.uses)
            .with_max_uses(u32::from(data.max_uses))
            .with_max_age(data.max_age);
        invite.temporary = data.temporary;
        invite.created_at = timestamp(data.created_at);

        self.forward(BotEvent::InviteCreated(invite)).await;
    }

    async fn message(&self, _: Context, message: Message) {
        self.forward(BotEvent::MessageCreated(IncomingMessage {
            guild_id: message.guild_id.map(snowflake),
            channel_id: snowflake(message.channel_id),
            author_id: snowflake(message.author.id),
            author_is_bot: message.author.bot,
            content: message.content,
        }))
        .await;
    }
}

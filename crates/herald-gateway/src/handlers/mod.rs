//! Dispatch handlers
//!
//! Routes gateway events into the services.

mod error;

pub use error::{HandlerError, HandlerResult};

use herald_service::{AttributionEngine, CommandService, InviteSyncService, ServiceContext};
use tracing::{debug, info, warn};

use crate::events::BotEvent;

/// Routes gateway events to the services
#[derive(Clone, Debug)]
pub struct EventHandler {
    ctx: ServiceContext,
}

impl EventHandler {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle one event, logging failures instead of returning them
    pub async fn dispatch(&self, event: BotEvent) {
        let name = event.name();
        if let Err(e) = self.handle(event).await {
            if e.is_transient() {
                debug!(event = name, error = %e, "Dispatch handling failed");
            } else {
                warn!(event = name, error = %e, "Dispatch handling failed");
            }
        }
    }

    /// Handle one event
    pub async fn handle(&self, event: BotEvent) -> HandlerResult<()> {
        match event {
            BotEvent::Ready {
                user_id,
                username,
                guilds,
            } => {
                info!(user_id = %user_id, username = %username, guilds, "Logged in");
            }
            BotEvent::Resumed => info!("Session resumed"),
            BotEvent::GuildAvailable { guild_id, name } => {
                if self.ctx.registry().track_guild(guild_id) {
                    info!(guild_id = %guild_id, name = %name, "Guild available");
                }
                InviteSyncService::new(&self.ctx).refresh_guild(guild_id).await?;
            }
            BotEvent::GuildRemoved {
                guild_id,
                unavailable,
            } => {
                if unavailable {
                    debug!(guild_id = %guild_id, "Guild temporarily unavailable");
                } else {
                    self.ctx.registry().forget_guild(guild_id);
                    info!(guild_id = %guild_id, "Removed from guild");
                }
            }
            BotEvent::MemberJoined {
                guild_id,
                member_id,
            } => {
                let outcome = AttributionEngine::new(&self.ctx)
                    .on_member_join(guild_id, member_id)
                    .await?;
                debug!(guild_id = %guild_id, member_id = %member_id, ?outcome, "Member join handled");
            }
            BotEvent::InviteCreated(invite) => {
                let code = invite.code.clone();
                if self.ctx.registry().record_invite(invite) {
                    debug!(code = %code, "Cached new invite");
                }
            }
            BotEvent::MessageCreated(message) => {
                if let Some(reply) = CommandService::new(&self.ctx).handle(&message).await {
                    self.ctx
                        .platform()
                        .send_message(message.channel_id, &reply)
                        .await?;
                }
            }
        }

        Ok(())
    }
}

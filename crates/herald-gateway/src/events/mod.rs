//! Bot events
//!
//! The gateway dispatches the bot reacts to, reduced to the fields it reads.
//! Everything else the platform sends is ignored.

use std::fmt;

use herald_core::{Invite, Snowflake};
use herald_service::IncomingMessage;

/// A gateway dispatch the bot handles
#[derive(Debug, Clone)]
pub enum BotEvent {
    /// Sent after the session is established
    Ready {
        user_id: Snowflake,
        username: String,
        guilds: usize,
    },
    /// Sent after a dropped session was resumed
    Resumed,
    /// Guild joined, or available again after an outage
    GuildAvailable { guild_id: Snowflake, name: String },
    /// Left the guild, or the guild went down
    GuildRemoved {
        guild_id: Snowflake,
        /// Set during outages; the bot is still a member
        unavailable: bool,
    },
    MemberJoined {
        guild_id: Snowflake,
        member_id: Snowflake,
    },
    InviteCreated(Invite),
    MessageCreated(IncomingMessage),
}

impl BotEvent {
    /// Dispatch name, as the platform spells it
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ready { .. } => "READY",
            Self::Resumed => "RESUMED",
            Self::GuildAvailable { .. } => "GUILD_CREATE",
            Self::GuildRemoved { .. } => "GUILD_DELETE",
            Self::MemberJoined { .. } => "GUILD_MEMBER_ADD",
            Self::InviteCreated(_) => "INVITE_CREATE",
            Self::MessageCreated(_) => "MESSAGE_CREATE",
        }
    }
}

impl fmt::Display for BotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

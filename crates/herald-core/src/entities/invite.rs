//! Invite entity - an observed invite link and its usage counter

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Invite entity
///
/// The platform owns invites; the bot only ever holds copies taken from a
/// listing, so `uses` is a point-in-time reading rather than a live counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    pub code: String,
    pub guild_id: Snowflake,
    pub channel_id: Option<Snowflake>,
    pub uses: u64,
    /// 0 = unlimited
    pub max_uses: u32,
    /// Seconds until expiry, 0 = never
    pub max_age: u32,
    pub temporary: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Invite {
    /// Create a new Invite with no uses and no limits
    pub fn new(code: impl Into<String>, guild_id: Snowflake) -> Self {
        Self {
            code: code.into(),
            guild_id,
            channel_id: None,
            uses: 0,
            max_uses: 0,
            max_age: 0,
            temporary: false,
            created_at: None,
        }
    }

    /// Set the channel the invite points at
    pub fn with_channel(mut self, channel_id: Snowflake) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    /// Set the observed use count
    pub fn with_uses(mut self, uses: u64) -> Self {
        self.uses = uses;
        self
    }

    /// Set max uses (0 = unlimited)
    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = max_uses;
        self
    }

    /// Set the expiry window in seconds (0 = never)
    pub fn with_max_age(mut self, max_age: u32) -> Self {
        self.max_age = max_age;
        self
    }

    /// Get the full invite URL
    pub fn url(&self) -> String {
        format!("https://discord.gg/{}", self.code)
    }
}

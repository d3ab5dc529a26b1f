//! Invite snapshots and the usage diff used for join attribution

use chrono::{DateTime, Utc};

use super::Invite;
use crate::value_objects::Snowflake;

/// Point-in-time capture of every invite in a guild
///
/// Invite order is the order the platform listed them in; attribution walks
/// the cached snapshot in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteSnapshot {
    pub guild_id: Snowflake,
    pub invites: Vec<Invite>,
    pub captured_at: DateTime<Utc>,
}

impl InviteSnapshot {
    /// Capture a snapshot taken now
    pub fn new(guild_id: Snowflake, invites: Vec<Invite>) -> Self {
        Self::captured(guild_id, invites, Utc::now())
    }

    /// Capture a snapshot with an explicit capture time
    pub fn captured(guild_id: Snowflake, invites: Vec<Invite>, captured_at: DateTime<Utc>) -> Self {
        Self {
            guild_id,
            invites,
            captured_at,
        }
    }

    /// Find an invite by code
    pub fn find(&self, code: &str) -> Option<&Invite> {
        self.invites.iter().find(|invite| invite.code == code)
    }

    /// Append an invite unless one with the same code is already present
    ///
    /// Returns `true` if the invite was added.
    pub fn insert_if_absent(&mut self, invite: Invite) -> bool {
        if self.find(&invite.code).is_some() {
            return false;
        }
        self.invites.push(invite);
        true
    }

    pub fn len(&self) -> usize {
        self.invites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invites.is_empty()
    }
}

/// Determine which invite a newly joined member consumed
///
/// Walks `before` in order and returns the `after` entry of the first invite
/// whose use count strictly increased. When several invites moved between the
/// two captures, the earliest in `before` wins. Invites missing from `before`
/// can never match.
pub fn detect_used_invite<'a>(before: &[Invite], after: &'a [Invite]) -> Option<&'a Invite> {
    before.iter().find_map(|old| {
        after
            .iter()
            .find(|current| current.code == old.code)
            .filter(|current| current.uses > old.uses)
    })
}

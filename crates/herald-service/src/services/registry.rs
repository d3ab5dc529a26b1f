//! Invite registry
//!
//! Invite code → role bindings plus the most recent invite-usage snapshot of
//! every guild the bot is in. All state is in memory and lost on restart.

use dashmap::{DashMap, DashSet};
use herald_core::{Invite, InviteSnapshot, Snowflake};
use tracing::debug;

/// Shared invite state
///
/// Every method takes `&self`; the maps shard their own locks and no guard
/// outlives a method call.
#[derive(Debug, Default)]
pub struct InviteRegistry {
    bindings: DashMap<String, Snowflake>,
    snapshots: DashMap<Snowflake, InviteSnapshot>,
    guilds: DashSet<Snowflake>,
}

impl InviteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // === Bindings ===

    /// Bind an invite code to a role, replacing any previous binding
    ///
    /// Returns the role the code was bound to before, if any.
    pub fn bind(&self, code: impl Into<String>, role_id: Snowflake) -> Option<Snowflake> {
        let code = code.into();
        debug!(code = %code, role_id = %role_id, "Binding invite to role");
        self.bindings.insert(code, role_id)
    }

    /// Role bound to an invite code
    pub fn role_for(&self, code: &str) -> Option<Snowflake> {
        self.bindings.get(code).map(|entry| *entry.value())
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    // === Guilds ===

    /// Mark a guild as known so the sync loop refreshes it
    ///
    /// Returns `true` if the guild was not known before.
    pub fn track_guild(&self, guild_id: Snowflake) -> bool {
        self.guilds.insert(guild_id)
    }

    /// Forget a guild and drop its snapshot; bindings are kept
    pub fn forget_guild(&self, guild_id: Snowflake) {
        self.guilds.remove(&guild_id);
        self.snapshots.remove(&guild_id);
    }

    /// Known guilds in ascending id order
    pub fn known_guilds(&self) -> Vec<Snowflake> {
        let mut guilds: Vec<Snowflake> = self.guilds.iter().map(|g| *g).collect();
        guilds.sort_unstable();
        guilds
    }

    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }

    pub fn is_known(&self, guild_id: Snowflake) -> bool {
        self.guilds.contains(&guild_id)
    }

    // === Snapshots ===

    /// Copy of the cached snapshot for a guild
    pub fn snapshot(&self, guild_id: Snowflake) -> Option<InviteSnapshot> {
        self.snapshots.get(&guild_id).map(|entry| entry.value().clone())
    }

    /// Store `snapshot` as the guild's current snapshot and hand back the one
    /// it replaced
    ///
    /// Read and write happen under the same shard lock, so two callers can
    /// never both observe the same "before".
    pub fn replace_snapshot(&self, snapshot: InviteSnapshot) -> Option<InviteSnapshot> {
        self.snapshots.insert(snapshot.guild_id, snapshot)
    }

    /// Add a newly created invite to its guild's snapshot
    ///
    /// Does nothing if the code is already cached. Returns `true` if the
    /// invite was added.
    pub fn record_invite(&self, invite: Invite) -> bool {
        let guild_id = invite.guild_id;
        self.snapshots
            .entry(guild_id)
            .or_insert_with(|| InviteSnapshot::new(guild_id, Vec::new()))
            .insert_if_absent(invite)
    }
}

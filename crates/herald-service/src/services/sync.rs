//! Invite sync
//!
//! Periodic refresh of every known guild's invite snapshot, narrowing the
//! window in which a stale snapshot can misattribute a join.

use herald_core::{InviteSnapshot, Snowflake};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Outcome of one refresh pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub refreshed: usize,
    pub failed: usize,
}

/// Invite sync service
pub struct InviteSyncService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteSyncService<'a> {
    /// Create a new InviteSyncService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch a guild's invites and overwrite its snapshot
    ///
    /// On failure the cached snapshot is kept.
    #[instrument(skip(self))]
    pub async fn refresh_guild(&self, guild_id: Snowflake) -> ServiceResult<usize> {
        let invites = self.ctx.platform().fetch_invites(guild_id).await?;
        let count = invites.len();

        self.ctx
            .registry()
            .replace_snapshot(InviteSnapshot::new(guild_id, invites));

        debug!(invites = count, "Invite snapshot refreshed");
        Ok(count)
    }

    /// Refresh every known guild, skipping the ones that fail
    pub async fn refresh_all(&self) -> SyncReport {
        let mut report = SyncReport::default();

        for guild_id in self.ctx.registry().known_guilds() {
            match self.refresh_guild(guild_id).await {
                Ok(_) => report.refreshed += 1,
                Err(e) => {
                    warn!(guild_id = %guild_id, error = %e, "Invite sync failed for guild");
                    report.failed += 1;
                }
            }
        }

        info!(refreshed = report.refreshed, failed = report.failed, "Invite sync complete");
        report
    }
}

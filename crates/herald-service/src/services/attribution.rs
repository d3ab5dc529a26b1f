//! Attribution engine
//!
//! Works out which invite a new member used by diffing invite use counts
//! against the cached snapshot, then grants the role bound to that invite.

use herald_core::{detect_used_invite, InviteSnapshot, Snowflake};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// What a member join resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    /// The bound role was granted
    Granted {
        code: String,
        role_id: Snowflake,
        role_name: String,
    },
    /// An invite was identified but no role is bound to it
    Unbound { code: String },
    /// No invite use count moved since the last snapshot
    NoMatch,
    /// The bound role no longer exists in the guild
    RoleMissing { code: String, role_id: Snowflake },
    /// The platform refused or failed the role grant
    GrantFailed { code: String, role_id: Snowflake },
}

impl Attribution {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    /// Invite code the join was attributed to, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Granted { code, .. }
            | Self::Unbound { code }
            | Self::RoleMissing { code, .. }
            | Self::GrantFailed { code, .. } => Some(code),
            Self::NoMatch => None,
        }
    }
}

/// Attribution engine
pub struct AttributionEngine<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttributionEngine<'a> {
    /// Create a new AttributionEngine
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle a member joining a guild
    ///
    /// Only a failed invite fetch is reported as an error; the cached
    /// snapshot is left untouched in that case. Every other outcome,
    /// including a failed grant, is an `Ok` value.
    #[instrument(skip(self), fields(guild_id = %guild_id, member_id = %member_id))]
    pub async fn on_member_join(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
    ) -> ServiceResult<Attribution> {
        let after = match self.ctx.platform().fetch_invites(guild_id).await {
            Ok(invites) => invites,
            Err(e) => {
                warn!(error = %e, "Failed to fetch invites, keeping cached snapshot");
                return Err(e.into());
            }
        };

        let registry = self.ctx.registry();
        registry.track_guild(guild_id);
        let before = registry
            .replace_snapshot(InviteSnapshot::new(guild_id, after.clone()))
            .map(|snapshot| snapshot.invites)
            .unwrap_or_default();

        let Some(used) = detect_used_invite(&before, &after) else {
            debug!(cached = before.len(), current = after.len(), "No invite usage change detected");
            return Ok(Attribution::NoMatch);
        };
        let code = used.code.clone();
        let url = used.url();

        let Some(role_id) = registry.role_for(&code) else {
            debug!(code = %code, "Invite has no bound role");
            return Ok(Attribution::Unbound { code });
        };

        let role = match self.ctx.platform().fetch_role(guild_id, role_id).await {
            Ok(Some(role)) => role,
            Ok(None) => {
                warn!(code = %code, role_id = %role_id, "Bound role no longer exists");
                return Ok(Attribution::RoleMissing { code, role_id });
            }
            Err(e) => {
                warn!(code = %code, role_id = %role_id, error = %e, "Failed to look up bound role");
                return Ok(Attribution::GrantFailed { code, role_id });
            }
        };

        if let Err(e) = self
            .ctx
            .platform()
            .grant_role(guild_id, member_id, role_id)
            .await
        {
            warn!(code = %code, role_id = %role_id, error = %e, "Failed to grant role");
            return Ok(Attribution::GrantFailed { code, role_id });
        }

        info!(code = %code, role_id = %role_id, "Role granted via invite");
        self.ctx
            .post_log(&format!(
                "Assigned role '{}' to <@{member_id}> via invite {url}",
                role.name
            ))
            .await;

        Ok(Attribution::Granted {
            code,
            role_id,
            role_name: role.name,
        })
    }
}

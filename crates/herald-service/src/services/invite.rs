//! Invite service
//!
//! Creates platform invites and binds them to roles.

use herald_core::{DomainError, Invite, Role};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::CreateInviteRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Invite service
pub struct InviteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteService<'a> {
    /// Create a new InviteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a unique invite for a channel and bind it to a role
    ///
    /// The role must exist in the guild. The new invite is added to the
    /// guild's cached snapshot so its first use can be attributed right away.
    #[instrument(skip(self, request), fields(guild_id = %request.guild_id, role_id = %request.role_id))]
    pub async fn create_binding(&self, request: CreateInviteRequest) -> ServiceResult<(Invite, Role)> {
        request.validate()?;

        let role = self
            .ctx
            .platform()
            .fetch_role(request.guild_id, request.role_id)
            .await?
            .ok_or(DomainError::RoleNotFound(request.role_id))?;

        let mut invite = self
            .ctx
            .platform()
            .create_invite(request.channel_id, request.max_uses, request.max_age)
            .await?;
        // Some platform responses omit the guild on channel invites
        invite.guild_id = request.guild_id;

        self.ctx.registry().bind(invite.code.clone(), role.id);
        self.ctx.registry().record_invite(invite.clone());

        info!(
            code = %invite.code,
            channel_id = %request.channel_id,
            max_uses = request.max_uses,
            max_age = request.max_age,
            "Invite created and bound"
        );

        Ok((invite, role))
    }
}

//! Member access - resolves what a member may do in a channel
//!
//! Resolution order: guild owner, then the @everyone role and the member's
//! roles, then the channel's overwrites (@everyone, roles, member).

use crate::entities::Role;
use crate::value_objects::{Permissions, Snowflake};

/// Whom a channel overwrite applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteTarget {
    Role(Snowflake),
    Member(Snowflake),
}

/// Channel-level permission overwrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionOverwrite {
    pub target: OverwriteTarget,
    pub allow: Permissions,
    pub deny: Permissions,
}

impl PermissionOverwrite {
    pub fn role(role_id: Snowflake, allow: Permissions, deny: Permissions) -> Self {
        Self {
            target: OverwriteTarget::Role(role_id),
            allow,
            deny,
        }
    }

    pub fn member(member_id: Snowflake, allow: Permissions, deny: Permissions) -> Self {
        Self {
            target: OverwriteTarget::Member(member_id),
            allow,
            deny,
        }
    }

    fn apply(&self, base: Permissions) -> Permissions {
        (base & !self.deny) | self.allow
    }
}

/// A guild member as seen by the permission resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAccess {
    pub guild_id: Snowflake,
    pub owner_id: Snowflake,
    pub member_id: Snowflake,
    /// Roles the member carries, @everyone excluded
    pub roles: Vec<Snowflake>,
}

impl MemberAccess {
    fn is_owner(&self) -> bool {
        self.owner_id == self.member_id
    }

    /// Guild-wide permissions, before any channel overwrite
    pub fn guild_permissions(&self, guild_roles: &[Role]) -> Permissions {
        if self.is_owner() {
            return Permissions::all();
        }

        Permissions::combine(
            guild_roles
                .iter()
                .filter(|role| role.is_everyone(self.guild_id) || self.roles.contains(&role.id))
                .map(|role| role.permissions),
        )
    }

    /// Permissions inside one channel
    pub fn channel_permissions(
        &self,
        guild_roles: &[Role],
        overwrites: &[PermissionOverwrite],
    ) -> Permissions {
        if self.is_owner() {
            return Permissions::all();
        }
        self.apply_overwrites(self.guild_permissions(guild_roles), overwrites)
    }

    /// Apply a channel's overwrites on top of guild-wide permissions
    ///
    /// Administrators are not affected by overwrites.
    pub fn apply_overwrites(
        &self,
        base: Permissions,
        overwrites: &[PermissionOverwrite],
    ) -> Permissions {
        if base.contains(Permissions::ADMINISTRATOR) {
            return Permissions::all();
        }

        let mut permissions = overwrites
            .iter()
            .find(|o| o.target == OverwriteTarget::Role(self.guild_id))
            .map_or(base, |everyone| everyone.apply(base));

        // Role overwrites are merged before being applied
        let (allow, deny) = overwrites
            .iter()
            .filter(|o| {
                matches!(o.target, OverwriteTarget::Role(id) if id != self.guild_id && self.roles.contains(&id))
            })
            .fold((Permissions::empty(), Permissions::empty()), |(allow, deny), o| {
                (allow | o.allow, deny | o.deny)
            });
        permissions = (permissions & !deny) | allow;

        overwrites
            .iter()
            .find(|o| o.target == OverwriteTarget::Member(self.member_id))
            .map_or(permissions, |member| member.apply(permissions))
    }
}

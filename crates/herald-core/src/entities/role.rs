//! Role entity - a guild role as reported by the platform

use serde::{Deserialize, Serialize};

use crate::value_objects::{Permissions, Snowflake};

/// Guild role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub permissions: Permissions,
}

impl Role {
    /// Create a role with no permissions
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            permissions: Permissions::empty(),
        }
    }

    /// Set the role's permissions
    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// The @everyone role shares its ID with the guild
    pub fn is_everyone(&self, guild_id: Snowflake) -> bool {
        self.id == guild_id
    }
}

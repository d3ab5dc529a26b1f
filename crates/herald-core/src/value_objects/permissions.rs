//! Permissions bitflags mirroring the platform's guild permission bits
//!
//! Only the bits the bot inspects are named; unknown bits are kept so that
//! a round trip through the REST API does not lose information.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Guild permission flags
    ///
    /// Serialized as a decimal string, the way the platform sends them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Create invites
        const CREATE_INSTANT_INVITE = 1 << 0;
        /// Kick members from guild
        const KICK_MEMBERS          = 1 << 1;
        /// Ban members from guild
        const BAN_MEMBERS           = 1 << 2;
        /// Bypass all permission checks
        const ADMINISTRATOR         = 1 << 3;
        /// Create, edit, delete channels
        const MANAGE_CHANNELS       = 1 << 4;
        /// Edit guild settings (also required to list guild invites)
        const MANAGE_GUILD          = 1 << 5;
        /// View channel and read messages
        const VIEW_CHANNEL          = 1 << 10;
        /// Send messages in text channels
        const SEND_MESSAGES         = 1 << 11;
        /// Delete or pin other users' messages
        const MANAGE_MESSAGES       = 1 << 13;
        /// Embed links in messages
        const EMBED_LINKS           = 1 << 14;
        /// Create, edit, delete, assign roles
        const MANAGE_ROLES          = 1 << 28;

        const _ = !0;
    }
}

impl Permissions {
    /// Check if the permission set contains a required permission
    ///
    /// Administrators bypass all permission checks.
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        if self.contains(Permissions::ADMINISTRATOR) {
            return true;
        }
        self.contains(permission)
    }

    /// Combine permissions from multiple roles
    pub fn combine<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Permissions>,
    {
        roles.into_iter().fold(Permissions::empty(), |acc, p| acc | p)
    }

    /// Parse from string representation (decimal number)
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        s.parse::<u64>().map(Permissions::from_bits_retain)
    }

    /// Names of the named permissions in `self`, in bit order
    pub fn list(&self) -> Vec<&'static str> {
        self.iter_names()
            .filter(|(_, flag)| !flag.is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.list();
        if names.is_empty() {
            write!(f, "{}", self.bits())
        } else {
            write!(f, "{}", names.join(" + "))
        }
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bits().to_string())
    }
}

// Deserialize from string or number
impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PermissionsVisitor;

        impl Visitor<'_> for PermissionsVisitor {
            type Value = Permissions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing permission bits")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_retain(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_retain(value as u64))
            }

            fn visit_str<E>(self, value: &str) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Permissions::parse(value).map_err(|_| de::Error::custom("invalid permissions string"))
            }
        }

        deserializer.deserialize_any(PermissionsVisitor)
    }
}

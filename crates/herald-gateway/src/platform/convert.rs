//! Conversions between serenity models and the domain types

use std::num::NonZeroU64;

use chrono::{DateTime, Utc};
use herald_core::{
    Embed, Invite, MessagePayload, PermissionOverwrite, Permissions, PlatformError,
    PlatformResult, Role, Snowflake,
};
use serenity::all::{
    CreateActionRow, CreateButton, CreateEmbed, CreateMessage, PermissionOverwriteType,
    RichInvite, Timestamp,
};
use serenity::http::HttpError;

/// Link buttons allowed per action row
const BUTTONS_PER_ROW: usize = 5;

/// Domain ID to a serenity ID
///
/// Serenity IDs cannot be zero, so a zero ID names nothing on the platform.
pub fn platform_id<T: From<NonZeroU64>>(id: Snowflake) -> PlatformResult<T> {
    NonZeroU64::new(id.into_inner())
        .map(T::from)
        .ok_or_else(|| PlatformError::NotFound(format!("id {id}")))
}

pub fn snowflake(id: impl Into<u64>) -> Snowflake {
    Snowflake::new(id.into())
}

pub fn timestamp(ts: Timestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.unix_timestamp(), 0)
}

pub fn permissions(permissions: serenity::all::Permissions) -> Permissions {
    Permissions::from_bits_retain(permissions.bits())
}

pub fn role(role: &serenity::all::Role) -> Role {
    Role::new(snowflake(role.id), role.name.clone()).with_permissions(permissions(role.permissions))
}

/// `None` for overwrite kinds the resolver does not know
pub fn overwrite(overwrite: &serenity::all::PermissionOverwrite) -> Option<PermissionOverwrite> {
    let allow = permissions(overwrite.allow);
    let deny = permissions(overwrite.deny);
    match overwrite.kind {
        PermissionOverwriteType::Role(role_id) => {
            Some(PermissionOverwrite::role(snowflake(role_id), allow, deny))
        }
        PermissionOverwriteType::Member(user_id) => {
            Some(PermissionOverwrite::member(snowflake(user_id), allow, deny))
        }
        _ => None,
    }
}

/// `guild_id` is used when the invite does not name its guild
pub fn invite(invite: RichInvite, guild_id: Snowflake) -> Invite {
    let guild_id = invite.guild.as_ref().map_or(guild_id, |guild| snowflake(guild.id));
    let mut converted = Invite::new(invite.code, guild_id)
        .with_channel(snowflake(invite.channel.id))
        .with_uses(invite.uses)
        .with_max_uses(u32::from(invite.max_uses))
        .with_max_age(invite.max_age);
    converted.temporary = invite.temporary;
    converted.created_at = timestamp(invite.created_at);
    converted
}

fn embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    if let Some(color) = embed.color {
        builder = builder.colour(color);
    }
    if let Some(url) = &embed.image_url {
        builder = builder.image(url);
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    builder
}

pub fn message(payload: &MessagePayload) -> CreateMessage {
    let mut builder = CreateMessage::new();
    if let Some(content) = &payload.content {
        builder = builder.content(content);
    }
    if !payload.embeds.is_empty() {
        builder = builder.embeds(payload.embeds.iter().map(embed).collect());
    }
    if !payload.buttons.is_empty() {
        let rows = payload
            .buttons
            .chunks(BUTTONS_PER_ROW)
            .map(|row| {
                CreateActionRow::Buttons(
                    row.iter()
                        .map(|button| CreateButton::new_link(&button.url).label(&button.label))
                        .collect(),
                )
            })
            .collect();
        builder = builder.components(rows);
    }
    builder
}

/// Map a serenity failure onto a [`PlatformError`]
///
/// Rate limits are waited out inside serenity, so a 429 only surfaces here
/// once its retries are spent.
pub fn platform_error(error: serenity::Error) -> PlatformError {
    match error {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => status_error(
            response.status_code.as_u16(),
            response.error.message,
            response.url,
        ),
        serenity::Error::Http(HttpError::Request(e)) => PlatformError::Transport(e.to_string()),
        serenity::Error::Json(e) => PlatformError::Decode(e.to_string()),
        other => PlatformError::Transport(other.to_string()),
    }
}

fn status_error(status: u16, message: String, url: String) -> PlatformError {
    if status == 404 {
        PlatformError::NotFound(url)
    } else {
        PlatformError::Http { status, message }
    }
}

//! Prefix commands
//!
//! Parses chat messages like `!schedule #news "Title" ...` into [`Command`]s,
//! checks the author's permissions in the channel, and runs them against the services.

use herald_core::{DomainError, MessagePayload, Permissions, Snowflake};
use tracing::{debug, instrument, warn};

use crate::dto::{AnnouncementRequest, CreateInviteRequest, IncomingMessage};

use super::announcement::AnnouncementService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::help::help_message;
use super::invite::InviteService;

/// A parsed bot command
#[derive(Debug, Clone)]
pub enum Command {
    Help,
    CreateInvite {
        role_id: Snowflake,
        max_uses: u32,
        max_age: u32,
    },
    Announce(AnnouncementRequest),
    Schedule {
        request: AnnouncementRequest,
        time: String,
    },
    CancelSchedule {
        time: String,
    },
}

impl Command {
    /// Parse a message body
    ///
    /// `Ok(None)` means the message is not addressed to the bot: it lacks the
    /// prefix or names an unknown command. Malformed arguments produce a
    /// validation error carrying the command's usage line.
    pub fn parse(content: &str, prefix: &str) -> ServiceResult<Option<Self>> {
        if prefix.is_empty() {
            return Ok(None);
        }
        let Some(body) = content.trim_start().strip_prefix(prefix) else {
            return Ok(None);
        };

        let mut args = ArgCursor::new(body);
        let Some(name) = args.next_arg() else {
            return Ok(None);
        };

        let usage = |name: &str| ServiceError::validation(format!("Usage: {prefix}{}", usage_for(name)));

        let command = match name.as_str() {
            "bothelp" => Self::Help,
            "create_invite" => {
                let role_id = args
                    .next_arg()
                    .ok_or_else(|| usage("create_invite"))
                    .and_then(|arg| parse_id(&arg, "role"))?;
                let max_uses = parse_count(args.next_arg(), "max_uses")?;
                let max_age = parse_count(args.next_arg(), "expire_after")?;
                Self::CreateInvite {
                    role_id,
                    max_uses,
                    max_age,
                }
            }
            "announce" => {
                let request = parse_announcement(&mut args, None).ok_or_else(|| usage("announce"))??;
                Self::Announce(request)
            }
            "schedule" => {
                let mut time = String::new();
                let request = parse_announcement(&mut args, Some(&mut time))
                    .ok_or_else(|| usage("schedule"))??;
                Self::Schedule { request, time }
            }
            "cancel_schedule" => {
                let time = args.rest().ok_or_else(|| usage("cancel_schedule"))?;
                Self::CancelSchedule {
                    time: unquote(&time).to_string(),
                }
            }
            _ => return Ok(None),
        };

        Ok(Some(command))
    }

    /// Command name as typed after the prefix
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "bothelp",
            Self::CreateInvite { .. } => "create_invite",
            Self::Announce(_) => "announce",
            Self::Schedule { .. } => "schedule",
            Self::CancelSchedule { .. } => "cancel_schedule",
        }
    }

    /// Permissions the author needs in the invoking channel
    pub fn required_permissions(&self) -> Permissions {
        match self {
            Self::Help => Permissions::empty(),
            Self::CreateInvite { .. } => Permissions::MANAGE_ROLES | Permissions::MANAGE_CHANNELS,
            Self::Announce(_) | Self::Schedule { .. } | Self::CancelSchedule { .. } => {
                Permissions::MANAGE_MESSAGES
            }
        }
    }
}

fn usage_for(name: &str) -> &'static str {
    match name {
        "create_invite" => "create_invite <@Role> [max_uses] [expire_after]",
        "announce" => "announce #channel <title> <image_url> <button_label> <button_url> <message>",
        "schedule" => {
            "schedule #channel <title> <image_url> <button_label> <button_url> <time> <message>"
        }
        "cancel_schedule" => "cancel_schedule <time>",
        _ => "bothelp",
    }
}

/// Parse `#channel title image label url [time] message...`
///
/// Returns `None` when an argument is missing. When `time` is given, the
/// argument before the message is stored there.
fn parse_announcement(
    args: &mut ArgCursor<'_>,
    time: Option<&mut String>,
) -> Option<ServiceResult<AnnouncementRequest>> {
    let channel = args.next_arg()?;
    let title = args.next_arg()?;
    let image_url = args.next_arg()?;
    let button_label = args.next_arg()?;
    let button_url = args.next_arg()?;
    if let Some(slot) = time {
        *slot = args.next_arg()?;
    }
    let body = args.rest()?;

    Some(parse_id(&channel, "channel").map(|channel_id| AnnouncementRequest {
        channel_id,
        title,
        body,
        image_url,
        button_label,
        button_url,
    }))
}

fn parse_id(arg: &str, what: &str) -> ServiceResult<Snowflake> {
    Snowflake::parse_mention(arg)
        .map_err(|_| ServiceError::validation(format!("Invalid {what}: {arg}")))
}

fn parse_count(arg: Option<String>, what: &str) -> ServiceResult<u32> {
    match arg {
        None => Ok(0),
        Some(arg) => arg
            .parse()
            .map_err(|_| ServiceError::validation(format!("{what} must be a whole number"))),
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Whitespace-separated arguments with double-quote grouping
struct ArgCursor<'a> {
    remaining: &'a str,
}

impl<'a> ArgCursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { remaining: input }
    }

    fn next_arg(&mut self) -> Option<String> {
        let input = self.remaining.trim_start();
        if input.is_empty() {
            self.remaining = input;
            return None;
        }

        if let Some(quoted) = input.strip_prefix('"') {
            // Unterminated quotes run to the end of the line
            let end = quoted.find('"').unwrap_or(quoted.len());
            self.remaining = quoted.get(end + 1..).unwrap_or("");
            return Some(quoted[..end].to_string());
        }

        let end = input.find(char::is_whitespace).unwrap_or(input.len());
        self.remaining = &input[end..];
        Some(input[..end].to_string())
    }

    /// Everything left on the line, trimmed
    fn rest(&mut self) -> Option<String> {
        let rest = self.remaining.trim();
        self.remaining = "";
        (!rest.is_empty()).then(|| rest.to_string())
    }
}

/// Command front end
pub struct CommandService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommandService<'a> {
    /// Create a new CommandService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle a chat message, returning the reply to send to its channel
    ///
    /// Messages from bots, outside guilds, or not addressed to the bot get no
    /// reply. Failures become a short human-readable reply.
    #[instrument(skip(self, message), fields(channel_id = %message.channel_id, author_id = %message.author_id))]
    pub async fn handle(&self, message: &IncomingMessage) -> Option<MessagePayload> {
        if message.author_is_bot {
            return None;
        }
        let guild_id = message.guild_id?;

        let command = match Command::parse(&message.content, &self.ctx.settings().command_prefix) {
            Ok(Some(command)) => command,
            Ok(None) => return None,
            Err(e) => return Some(MessagePayload::text(e.user_message())),
        };
        debug!(command = command.name(), "Command received");

        let authorized = self
            .authorize(guild_id, message.channel_id, message.author_id, &command)
            .await;
        let result = match authorized {
            Ok(()) => self.execute(guild_id, message.channel_id, command).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(reply) => Some(reply),
            Err(e) => {
                if e.is_invalid_input() || e.is_not_found() {
                    debug!(code = e.error_code(), error = %e, "Command rejected");
                } else {
                    warn!(code = e.error_code(), error = %e, "Command failed");
                }
                Some(MessagePayload::text(e.user_message()))
            }
        }
    }

    /// Check the author's permissions in the channel the command was sent in
    async fn authorize(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        author_id: Snowflake,
        command: &Command,
    ) -> ServiceResult<()> {
        let required = command.required_permissions();
        if required.is_empty() {
            return Ok(());
        }

        let granted = self
            .ctx
            .platform()
            .member_permissions(guild_id, channel_id, author_id)
            .await?;

        if granted.has(required) {
            Ok(())
        } else {
            Err(DomainError::MissingPermission(required.difference(granted)).into())
        }
    }

    async fn execute(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        command: Command,
    ) -> ServiceResult<MessagePayload> {
        let reply = match command {
            Command::Help => return Ok(help_message(&self.ctx.settings().command_prefix)),
            Command::CreateInvite {
                role_id,
                max_uses,
                max_age,
            } => {
                let (invite, role) = InviteService::new(self.ctx)
                    .create_binding(CreateInviteRequest {
                        guild_id,
                        channel_id,
                        role_id,
                        max_uses,
                        max_age,
                    })
                    .await?;
                format!("Invite created: {}\nLinked Role: {}", invite.url(), role.name)
            }
            Command::Announce(request) => {
                let announcement = AnnouncementService::new(self.ctx).announce_now(request).await?;
                format!(
                    "Announcement successfully posted in {}.",
                    announcement.channel_mention()
                )
            }
            Command::Schedule { request, time } => {
                let channel_id = request.channel_id;
                let ack = AnnouncementService::new(self.ctx)
                    .schedule_announcement(request, &time)
                    .await?;
                format!("Announcement scheduled for {} in <#{channel_id}>.", ack.time)
            }
            Command::CancelSchedule { time } => {
                let time = AnnouncementService::new(self.ctx)
                    .cancel_announcement(&time)
                    .await?;
                format!("Scheduled announcement for {time} has been canceled.")
            }
        };

        Ok(MessagePayload::text(reply))
    }
}

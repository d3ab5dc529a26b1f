//! Test fixtures
//!
//! An in-memory [`ChatPlatform`] whose answers each test scripts up front,
//! a clock that only moves when told to, and small data builders.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use herald_core::{
    ChatPlatform, Clock, Invite, MemberAccess, MessagePayload, PermissionOverwrite, Permissions,
    PlatformError, PlatformResult, Role, Snowflake,
};
use herald_service::{AnnouncementRequest, BotSettings, IncomingMessage, ServiceContext, ServiceContextBuilder};
use parking_lot::Mutex;

pub const GUILD: Snowflake = Snowflake::new(100);
pub const OTHER_GUILD: Snowflake = Snowflake::new(101);
pub const CHANNEL: Snowflake = Snowflake::new(300);
pub const LOG_CHANNEL: Snowflake = Snowflake::new(400);
pub const ANNOUNCE_CHANNEL: Snowflake = Snowflake::new(500);
pub const ADMIN: Snowflake = Snowflake::new(10);
pub const MEMBER: Snowflake = Snowflake::new(20);
pub const ROLE: Snowflake = Snowflake::new(700);

// ============================================================================
// Fake platform
// ============================================================================

#[derive(Default)]
struct PlatformState {
    invites: HashMap<Snowflake, Vec<Invite>>,
    failing_guilds: HashSet<Snowflake>,
    failing_channels: HashSet<Snowflake>,
    fail_grants: bool,
    roles: HashMap<Snowflake, Vec<Role>>,
    permissions: HashMap<Snowflake, Permissions>,
    member_roles: HashMap<Snowflake, Vec<Snowflake>>,
    overwrites: HashMap<Snowflake, Vec<PermissionOverwrite>>,
    grants: Vec<(Snowflake, Snowflake, Snowflake)>,
    sent: Vec<(Snowflake, MessagePayload)>,
    created_invites: u32,
    fetches: usize,
}

/// Scriptable in-memory platform
#[derive(Default)]
pub struct FakePlatform {
    state: Mutex<PlatformState>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the invite list a guild reports
    pub fn set_invites(&self, guild_id: Snowflake, invites: Vec<Invite>) {
        self.state.lock().invites.insert(guild_id, invites);
    }

    /// Make invite fetches for a guild fail (or succeed again)
    pub fn fail_fetches(&self, guild_id: Snowflake, failing: bool) {
        let mut state = self.state.lock();
        if failing {
            state.failing_guilds.insert(guild_id);
        } else {
            state.failing_guilds.remove(&guild_id);
        }
    }

    /// Make every send to a channel fail
    pub fn fail_channel(&self, channel_id: Snowflake) {
        self.state.lock().failing_channels.insert(channel_id);
    }

    pub fn fail_grants(&self, failing: bool) {
        self.state.lock().fail_grants = failing;
    }

    pub fn add_role(&self, guild_id: Snowflake, role: Role) {
        self.state.lock().roles.entry(guild_id).or_default().push(role);
    }

    /// Guild-wide permissions of a member
    pub fn set_permissions(&self, member_id: Snowflake, permissions: Permissions) {
        self.state.lock().permissions.insert(member_id, permissions);
    }

    /// Roles a member carries, matched against role overwrites
    pub fn set_member_roles(&self, member_id: Snowflake, roles: Vec<Snowflake>) {
        self.state.lock().member_roles.insert(member_id, roles);
    }

    /// Permission overwrites of a channel
    pub fn set_overwrites(&self, channel_id: Snowflake, overwrites: Vec<PermissionOverwrite>) {
        self.state.lock().overwrites.insert(channel_id, overwrites);
    }

    /// Grants performed so far as `(guild, member, role)`
    pub fn grants(&self) -> Vec<(Snowflake, Snowflake, Snowflake)> {
        self.state.lock().grants.clone()
    }

    /// Messages successfully sent so far
    pub fn sent(&self) -> Vec<(Snowflake, MessagePayload)> {
        self.state.lock().sent.clone()
    }

    /// Messages sent to one channel
    pub fn sent_to(&self, channel_id: Snowflake) -> Vec<MessagePayload> {
        self.state
            .lock()
            .sent
            .iter()
            .filter(|(channel, _)| *channel == channel_id)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    /// Plain-text contents sent to one channel
    pub fn texts_to(&self, channel_id: Snowflake) -> Vec<String> {
        self.sent_to(channel_id)
            .into_iter()
            .filter_map(|payload| payload.content)
            .collect()
    }

    pub fn fetch_count(&self) -> usize {
        self.state.lock().fetches
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn fetch_invites(&self, guild_id: Snowflake) -> PlatformResult<Vec<Invite>> {
        let mut state = self.state.lock();
        state.fetches += 1;
        if state.failing_guilds.contains(&guild_id) {
            return Err(PlatformError::Http {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(state.invites.get(&guild_id).cloned().unwrap_or_default())
    }

    async fn create_invite(
        &self,
        channel_id: Snowflake,
        max_uses: u32,
        max_age_secs: u32,
    ) -> PlatformResult<Invite> {
        let mut state = self.state.lock();
        state.created_invites += 1;
        Ok(Invite::new(format!("gen{}", state.created_invites), Snowflake::default())
            .with_channel(channel_id)
            .with_max_uses(max_uses)
            .with_max_age(max_age_secs))
    }

    async fn fetch_role(
        &self,
        guild_id: Snowflake,
        role_id: Snowflake,
    ) -> PlatformResult<Option<Role>> {
        let state = self.state.lock();
        Ok(state
            .roles
            .get(&guild_id)
            .and_then(|roles| roles.iter().find(|role| role.id == role_id))
            .cloned())
    }

    async fn grant_role(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
        role_id: Snowflake,
    ) -> PlatformResult<()> {
        let mut state = self.state.lock();
        if state.fail_grants {
            return Err(PlatformError::Http {
                status: 403,
                message: "Missing Permissions".to_string(),
            });
        }
        state.grants.push((guild_id, member_id, role_id));
        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: Snowflake,
        payload: &MessagePayload,
    ) -> PlatformResult<()> {
        let mut state = self.state.lock();
        if state.failing_channels.contains(&channel_id) {
            return Err(PlatformError::NotFound(format!("/channels/{channel_id}/messages")));
        }
        state.sent.push((channel_id, payload.clone()));
        Ok(())
    }

    async fn member_permissions(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        member_id: Snowflake,
    ) -> PlatformResult<Permissions> {
        let state = self.state.lock();
        let base = state.permissions.get(&member_id).copied().unwrap_or_default();
        let access = MemberAccess {
            guild_id,
            owner_id: Snowflake::default(),
            member_id,
            roles: state.member_roles.get(&member_id).cloned().unwrap_or_default(),
        };
        let overwrites = state.overwrites.get(&channel_id).map_or(&[][..], Vec::as_slice);

        Ok(access.apply_overwrites(base, overwrites))
    }
}

// ============================================================================
// Manual clock
// ============================================================================

/// Clock that stands still until moved
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

// ============================================================================
// Bot harness
// ============================================================================

/// Service context wired to a fake platform and a manual clock
pub struct TestBot {
    pub ctx: ServiceContext,
    pub platform: Arc<FakePlatform>,
    pub clock: Arc<ManualClock>,
}

impl TestBot {
    /// Bot with a log channel and no announcement channel restriction,
    /// clock set to 2030-01-01 12:00
    pub fn new() -> Self {
        Self::with_settings(BotSettings {
            log_channel_id: Some(LOG_CHANNEL),
            ..BotSettings::default()
        })
    }

    pub fn with_settings(settings: BotSettings) -> Self {
        let platform = Arc::new(FakePlatform::new());
        let clock = Arc::new(ManualClock::new(at(2030, 1, 1, 12, 0)));

        let ctx = ServiceContextBuilder::new()
            .platform(platform.clone())
            .clock(clock.clone())
            .settings(settings)
            .build()
            .expect("context");

        Self {
            ctx,
            platform,
            clock,
        }
    }

    /// Grant `permissions` to [`ADMIN`]
    pub fn with_admin(self, permissions: Permissions) -> Self {
        self.platform.set_permissions(ADMIN, permissions);
        self
    }
}

impl Default for TestBot {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Data builders
// ============================================================================

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid date")
}

pub fn invite(code: &str, uses: u64) -> Invite {
    Invite::new(code, GUILD).with_channel(CHANNEL).with_uses(uses)
}

pub fn announcement_request(channel_id: Snowflake, title: &str) -> AnnouncementRequest {
    AnnouncementRequest {
        channel_id,
        title: title.to_string(),
        body: "Join our big event!".to_string(),
        image_url: "https://example.com/image.jpg".to_string(),
        button_label: "Register".to_string(),
        button_url: "https://example.com/register".to_string(),
    }
}

/// Message posted in [`GUILD`] / [`CHANNEL`]
pub fn message(author_id: Snowflake, content: &str) -> IncomingMessage {
    IncomingMessage {
        guild_id: Some(GUILD),
        channel_id: CHANNEL,
        author_id,
        author_is_bot: false,
        content: content.to_string(),
    }
}

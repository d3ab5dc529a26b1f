//! Service context - dependency container for services
//!
//! Holds the platform client, the clock, and the in-memory state stores
//! shared by the event handlers and the background loops.

use std::sync::Arc;

use herald_common::BotConfig;
use herald_core::{ChatPlatform, Clock, MessagePayload, Snowflake, SystemClock};
use tracing::{info, warn};

use super::error::{ServiceError, ServiceResult};
use super::registry::InviteRegistry;
use super::scheduler::AnnouncementScheduler;

/// Bot behaviour settings the services consult at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    pub command_prefix: String,
    pub log_channel_id: Option<Snowflake>,
    pub announcement_channel_id: Option<Snowflake>,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
            log_channel_id: None,
            announcement_channel_id: None,
        }
    }
}

impl From<&BotConfig> for BotSettings {
    fn from(config: &BotConfig) -> Self {
        Self {
            command_prefix: config.command_prefix.clone(),
            log_channel_id: config.log_channel_id,
            announcement_channel_id: config.announcement_channel_id,
        }
    }
}

/// Service context containing all dependencies
///
/// Cloning is cheap; every field is reference counted so the gateway and the
/// background tasks all see the same registry and schedule.
#[derive(Clone)]
pub struct ServiceContext {
    platform: Arc<dyn ChatPlatform>,
    clock: Arc<dyn Clock>,
    registry: Arc<InviteRegistry>,
    scheduler: Arc<AnnouncementScheduler>,
    settings: Arc<BotSettings>,
}

impl ServiceContext {
    /// Create a context with fresh, empty state stores
    pub fn new(platform: Arc<dyn ChatPlatform>, clock: Arc<dyn Clock>, settings: BotSettings) -> Self {
        Self {
            platform,
            clock,
            registry: Arc::new(InviteRegistry::new()),
            scheduler: Arc::new(AnnouncementScheduler::new()),
            settings: Arc::new(settings),
        }
    }

    // === Collaborators ===

    /// Get the chat platform client
    pub fn platform(&self) -> &dyn ChatPlatform {
        self.platform.as_ref()
    }

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    // === State ===

    /// Get the invite registry
    pub fn registry(&self) -> &InviteRegistry {
        self.registry.as_ref()
    }

    /// Get the announcement scheduler
    pub fn scheduler(&self) -> &AnnouncementScheduler {
        self.scheduler.as_ref()
    }

    /// Get the bot settings
    pub fn settings(&self) -> &BotSettings {
        self.settings.as_ref()
    }

    // === Logging ===

    /// Record an operator-facing log line
    ///
    /// Always traced; also posted to the log channel when one is configured.
    /// A failed post is logged and otherwise ignored.
    pub async fn post_log(&self, text: &str) {
        info!(target: "herald::audit", "{text}");

        let Some(channel_id) = self.settings.log_channel_id else {
            return;
        };

        if let Err(e) = self
            .platform
            .send_message(channel_id, &MessagePayload::text(text))
            .await
        {
            warn!(channel_id = %channel_id, error = %e, "Failed to post to log channel");
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("platform", &"dyn ChatPlatform")
            .field("registry", &self.registry)
            .field("scheduler", &self.scheduler)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    platform: Option<Arc<dyn ChatPlatform>>,
    clock: Option<Arc<dyn Clock>>,
    settings: BotSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            platform: None,
            clock: None,
            settings: BotSettings::default(),
        }
    }

    pub fn platform(mut self, platform: Arc<dyn ChatPlatform>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn settings(mut self, settings: BotSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// The clock defaults to the system's local time.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the platform client is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let platform = self
            .platform
            .ok_or_else(|| ServiceError::validation("platform is required"))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        Ok(ServiceContext::new(platform, clock, self.settings))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

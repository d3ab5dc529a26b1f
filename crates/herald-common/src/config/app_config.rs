//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use herald_core::Snowflake;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub discord: DiscordConfig,
    pub bot: BotConfig,
    pub schedule: ScheduleConfig,
    pub health: HealthConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Platform connection settings
#[derive(Clone, Deserialize)]
pub struct DiscordConfig {
    /// Bot token, without the `Bot ` prefix
    pub token: String,
}

// Keep the token out of logs
impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Command and channel settings
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    /// Where attribution log lines go
    pub log_channel_id: Option<Snowflake>,
    /// Restrict announcements to this channel when set
    pub announcement_channel_id: Option<Snowflake>,
}

/// Background loop periods
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Invite snapshot refresh period; lower = fresher attribution, higher = fewer platform calls
    #[serde(default = "default_invite_sync_interval")]
    pub invite_sync_interval_secs: u64,
    /// Announcement sweep period; bounds how late a scheduled announcement can fire
    #[serde(default = "default_sweep_interval")]
    pub announcement_sweep_interval_secs: u64,
}

impl ScheduleConfig {
    #[must_use]
    pub fn invite_sync_interval(&self) -> Duration {
        Duration::from_secs(self.invite_sync_interval_secs)
    }

    #[must_use]
    pub fn announcement_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.announcement_sweep_interval_secs)
    }
}

/// Health endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Endpoint disabled when unset
    pub port: Option<u16>,
}

impl HealthConfig {
    #[must_use]
    pub fn address(&self) -> Option<String> {
        self.port.map(|port| format!("{}:{}", self.host, port))
    }
}

// Default value functions
fn default_app_name() -> String {
    "herald".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_invite_sync_interval() -> u64 {
    600 // 10 minutes
}

fn default_sweep_interval() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let config = Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: match vars.get("APP_ENV") {
                    Some(value) => Environment::parse(&value)
                        .ok_or(ConfigError::InvalidValue("APP_ENV", value))?,
                    None => default_env(),
                },
            },
            discord: DiscordConfig {
                token: vars
                    .get("DISCORD_TOKEN")
                    .filter(|token| !token.trim().is_empty())
                    .ok_or(ConfigError::MissingVar("DISCORD_TOKEN"))?,
            },
            bot: BotConfig {
                command_prefix: vars
                    .get("COMMAND_PREFIX")
                    .unwrap_or_else(default_command_prefix),
                log_channel_id: vars.parse("LOG_CHANNEL_ID")?,
                announcement_channel_id: vars.parse("ANNOUNCEMENT_CHANNEL_ID")?,
            },
            schedule: ScheduleConfig {
                invite_sync_interval_secs: vars
                    .parse("INVITE_SYNC_INTERVAL_SECS")?
                    .unwrap_or_else(default_invite_sync_interval),
                announcement_sweep_interval_secs: vars
                    .parse("ANNOUNCEMENT_SWEEP_INTERVAL_SECS")?
                    .unwrap_or_else(default_sweep_interval),
            },
            health: HealthConfig {
                host: vars.get("HEALTH_HOST").unwrap_or_else(default_host),
                port: vars.parse("HEALTH_PORT")?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.command_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue("COMMAND_PREFIX", self.bot.command_prefix.clone()));
        }
        if self.schedule.invite_sync_interval_secs == 0 {
            return Err(ConfigError::InvalidValue("INVITE_SYNC_INTERVAL_SECS", "0".to_string()));
        }
        if self.schedule.announcement_sweep_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "ANNOUNCEMENT_SWEEP_INTERVAL_SECS",
                "0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Variable lookup with empty values treated as unset
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    fn parse<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
            None => Ok(None),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

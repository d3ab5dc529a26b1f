//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BotConfig, ConfigError, DiscordConfig, Environment, HealthConfig,
    ScheduleConfig,
};

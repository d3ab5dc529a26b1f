//! # herald-gateway
//!
//! Platform adapters and the bot's runtime: the serenity gateway client and
//! HTTP adapter, dispatch handlers, and the optional health endpoint.

pub mod connection;
pub mod events;
pub mod handlers;
pub mod platform;
pub mod server;

use std::sync::Arc;

use herald_common::{AppConfig, AppError, AppResult};
use herald_core::ChatPlatform;
use herald_service::{BackgroundTasks, BotSettings, ServiceContext, ServiceContextBuilder};
use tracing::{error, info, warn};

use connection::GatewayClient;
use handlers::EventHandler;
use platform::DiscordPlatform;

/// Build the shared service context on top of the platform client
pub fn create_context(config: &AppConfig) -> AppResult<ServiceContext> {
    let platform: Arc<dyn ChatPlatform> =
        Arc::new(DiscordPlatform::from_token(&config.discord.token));

    ServiceContextBuilder::new()
        .platform(platform)
        .settings(BotSettings::from(&config.bot))
        .build()
        .map_err(AppError::internal)
}

/// Run the bot until Ctrl-C or until the gateway client gives up
pub async fn run(config: AppConfig) -> AppResult<()> {
    let ctx = create_context(&config)?;

    let mut client = GatewayClient::new(&config.discord.token, EventHandler::new(ctx.clone())).await?;
    let shards = client.shard_manager();

    let tasks = BackgroundTasks::new(
        ctx.clone(),
        config.schedule.announcement_sweep_interval(),
        config.schedule.invite_sync_interval(),
    );
    tasks.start();

    let health = config.health.address().map(|addr| {
        let state = server::HealthState::new(&config.app.name, ctx.clone());
        tokio::spawn(async move {
            if let Err(e) = server::run_server(&addr, state).await {
                error!(error = %e, "Health endpoint stopped");
            }
        })
    });

    let result = tokio::select! {
        result = client.run() => result,
        () = shutdown_signal() => {
            info!("Shutdown signal received");
            shards.shutdown_all().await;
            Ok(())
        }
    };

    tasks.stop().await;
    if let Some(health) = health {
        health.abort();
    }

    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

//! Gateway client
//!
//! One serenity shard session to the platform gateway. Serenity handles
//! identify, heartbeats, resume and reconnects; this wrapper wires the bot's
//! handler in and decides when the process stops.

use std::sync::Arc;

use herald_common::{AppError, AppResult};
use serenity::all::{Client, GatewayIntents, ShardManager};
use tracing::info;

use super::GatewayBridge;
use crate::handlers::EventHandler;

/// Gateway intents the bot subscribes to
///
/// Member joins and message content are privileged and must also be enabled
/// for the application.
pub fn bot_intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_INVITES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Gateway client
pub struct GatewayClient {
    client: Client,
}

impl GatewayClient {
    /// Build a client that feeds dispatches to `handler`
    pub async fn new(token: &str, handler: EventHandler) -> AppResult<Self> {
        let client = Client::builder(token, bot_intents())
            .event_handler(GatewayBridge::new(handler))
            .await
            .map_err(AppError::gateway)?;

        Ok(Self { client })
    }

    /// Handle for shutting the shards down from another task
    pub fn shard_manager(&self) -> Arc<ShardManager> {
        Arc::clone(&self.client.shard_manager)
    }

    /// Run until the shards are shut down or serenity gives up
    ///
    /// Serenity reconnects on its own; it only returns an error for
    /// failures a reconnect cannot fix, such as a rejected token or
    /// disallowed intents.
    pub async fn run(&mut self) -> AppResult<()> {
        info!("Connecting to gateway");
        self.client.start().await.map_err(AppError::gateway)
    }
}

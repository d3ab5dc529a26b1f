//! Gateway connection
//!
//! The serenity client and the bridge from its events to the bot's handler.

mod bridge;
mod client;

pub use bridge::GatewayBridge;
pub use client::{bot_intents, GatewayClient};

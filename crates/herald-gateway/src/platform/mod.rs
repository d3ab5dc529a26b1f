//! Chat platform adapter
//!
//! Implements the domain's [`herald_core::ChatPlatform`] port with serenity.

pub(crate) mod convert;
mod http;

pub use http::DiscordPlatform;

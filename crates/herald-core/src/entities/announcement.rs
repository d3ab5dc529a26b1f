//! Announcement entity - a formatted message bound for one channel

use super::{Embed, MessagePayload};
use crate::value_objects::Snowflake;

/// Announcement payload, delivered immediately or at a scheduled time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub channel_id: Snowflake,
    pub title: String,
    pub body: String,
    pub image_url: String,
    pub button_label: String,
    pub button_url: String,
}

impl Announcement {
    /// Render into the message the platform will display
    ///
    /// One blue embed with the image attached, plus a single link button.
    pub fn render(&self) -> MessagePayload {
        let embed = Embed::new()
            .title(&self.title)
            .description(&self.body)
            .color(Embed::COLOR_BLUE)
            .image(&self.image_url);

        MessagePayload::embed(embed).with_button(&self.button_label, &self.button_url)
    }

    /// Mention string for the destination channel
    pub fn channel_mention(&self) -> String {
        format!("<#{}>", self.channel_id)
    }
}

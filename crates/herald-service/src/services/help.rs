//! Help message

use herald_core::{Embed, MessagePayload, ScheduleTime};

/// Render the command reference for the given prefix
pub fn help_message(prefix: &str) -> MessagePayload {
    let embed = Embed::new()
        .title("Herald Help")
        .description("Here are the available commands and how to use them:")
        .color(Embed::COLOR_GREEN)
        .field(
            format!("{prefix}create_invite <@Role> [max_uses] [expire_after]"),
            format!("Creates an invite linked to a role. Example: `{prefix}create_invite @Member 10 3600`"),
            false,
        )
        .field(
            format!("{prefix}announce #channel <title> <image_url> <button_label> <button_url> <message>"),
            format!(
                "Sends an announcement to the specified channel with a title, image, and button. \
                 Example: `{prefix}announce #announcements \"Big Event\" https://example.com/image.jpg \
                 \"Learn More\" https://example.com This is an announcement!`"
            ),
            false,
        )
        .field(
            format!("{prefix}schedule #channel <title> <image_url> <button_label> <button_url> <time> <message>"),
            format!(
                "Schedules an announcement. Time format: `{}`. \
                 Example: `{prefix}schedule #announcements \"Big Event\" https://example.com/image.jpg \
                 \"Register\" https://example.com \"2025-01-25 18:00\" Join our big event!`",
                ScheduleTime::FORMAT_HINT
            ),
            false,
        )
        .field(
            format!("{prefix}cancel_schedule <time>"),
            format!("Cancels a scheduled announcement. Example: `{prefix}cancel_schedule 2025-01-25 18:00`"),
            false,
        )
        .field(format!("{prefix}bothelp"), "Displays this help message.", false);

    MessagePayload::embed(embed)
}

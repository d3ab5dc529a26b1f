//! Outgoing message payloads
//!
//! A rendered message the platform client can send as-is: optional plain
//! content, rich embeds and link buttons.

/// Rich embed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    /// RGB color, e.g. `0x3498db`
    pub color: Option<u32>,
    pub image_url: Option<String>,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// Blue used for announcements
    pub const COLOR_BLUE: u32 = 0x0034_98db;
    /// Green used for the help message
    pub const COLOR_GREEN: u32 = 0x002e_cc71;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Append a field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}

/// Named field inside an embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Button that opens a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkButton {
    pub label: String,
    pub url: String,
}

/// Complete outgoing message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessagePayload {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub buttons: Vec<LinkButton>,
}

impl MessagePayload {
    /// Plain text message
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Message carrying a single embed
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }

    /// Attach a link button
    pub fn with_button(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.buttons.push(LinkButton {
            label: label.into(),
            url: url.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(str::is_empty) && self.embeds.is_empty()
    }
}

use serde::{ser::SerializeStruct, Serialize};

use super::{raw_block::RawBlock, slack_view::SlackView};

/// A section component.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SlackSection {
    #[serde(rename = "type")]
    _type: &'static str,
    text: SlackText,
}

impl SlackSection {
    /// A convenience constructor to create a section from markdown.
    pub fn from_markdown(markdown: &str) -> Self {
        Self {
            _type: "section",
            text: SlackText::markdown(markdown),
        }
    }

    /// A convenience constructor to create a section from plain text.
    pub fn from_plaintext(text: &str) -> Self {
        Self {
            _type: "section",
            text: SlackText::plain(text),
        }
    }

    /// Enables slack emojis on this section if `is_enabled` is true.
    ///
    /// This has no effect on markdown text.
    pub fn emoji_enabled(self, is_enabled: bool) -> Self {
        Self {
            text: self.text.emoji_enabled(is_enabled),
            ..self
        }
    }
}

impl SlackView for SlackSection {
    fn slack_body(&self) -> impl SlackView {
        RawBlock::serialized(self)
    }
}

/// Slack text for use in sections and headers.
#[derive(Debug, PartialEq, Eq)]
pub struct SlackText {
    _type: &'static str,
    text: String,
    emoji: bool,
}

impl SlackText {
    pub fn markdown(markdown: &str) -> Self {
        Self {
            _type: "mrkdwn",
            text: markdown.to_string(),
            emoji: true,
        }
    }

    pub fn plain(text: &str) -> Self {
        Self {
            _type: "plain_text",
            text: text.to_string(),
            emoji: true,
        }
    }

    fn emoji_enabled(self, is_enabled: bool) -> Self {
        Self {
            emoji: is_enabled,
            ..self
        }
    }

    fn is_markdown(&self) -> bool {
        self._type == "mrkdwn"
    }
}

impl Serialize for SlackText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let emits_emoji = !self.is_markdown() && !self.emoji;
        let mut state =
            serializer.serialize_struct("SlackText", if emits_emoji { 3 } else { 2 })?;
        if emits_emoji {
            state.serialize_field("emoji", &self.emoji)?
        }
        state.serialize_field("text", &self.text)?;
        state.serialize_field("type", &self._type)?;
        state.end()
    }
}

/// A slack divider component.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SlackDivider;

impl Serialize for SlackDivider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("SlackDivider", 1)?;
        state.serialize_field("type", "divider")?;
        state.end()
    }
}

impl SlackView for SlackDivider {
    fn slack_body(&self) -> impl SlackView {
        RawBlock::serialized(self)
    }
}

/// A Slack Header view.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SlackHeader {
    #[serde(rename = "type")]
    _type: &'static str,
    text: SlackText,
}

impl SlackHeader {
    pub fn new(text: &str) -> Self {
        Self {
            _type: "header",
            text: SlackText::plain(text),
        }
    }
}

impl SlackView for SlackHeader {
    fn slack_body(&self) -> impl SlackView {
        RawBlock::serialized(self)
    }
}

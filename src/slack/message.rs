use std::{
    error::Error,
    fmt::{Display, Formatter},
    future::Future,
};

use anyhow::Result;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::Serialize;

use super::ui_lib::{
    blocks::SlackBlocks,
    slack_view::{render_slack_view, SlackView},
};

/// A message posted to a slash command's `response_url` after the command was acknowledged.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SlackFollowUpMessage {
    response_type: &'static str,
    text: String,
    blocks: SlackBlocks,
    #[serde(skip)]
    response_url: String,
}

impl SlackFollowUpMessage {
    /// Creates a message visible to the whole channel, `text` is the notification fallback.
    pub fn in_channel(text: &str, view: &impl SlackView, response_url: &str) -> Self {
        Self {
            response_type: "in_channel",
            text: text.to_string(),
            blocks: render_slack_view(view),
            response_url: response_url.to_string(),
        }
    }

    pub fn response_url(&self) -> &str {
        &self.response_url
    }
}

/// A trait for sending a slack follow-up message.
pub trait SlackSendMessage {
    fn send(&self, message: &SlackFollowUpMessage) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug)]
struct SlackMessageSendingError {
    status: StatusCode,
    message: String,
}

impl Display for SlackMessageSendingError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Slack Message Sending Error ({}): {}",
            self.status, self.message
        )
    }
}

impl Error for SlackMessageSendingError {}

impl SlackSendMessage for Client {
    async fn send(&self, message: &SlackFollowUpMessage) -> Result<()> {
        let resp = self
            .post(message.response_url())
            .header(CONTENT_TYPE, "application/json")
            .json(message)
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = resp.text().await.unwrap_or_default();
            log::error!("A Slack API error occured {}.", message);
            Err(anyhow::Error::new(SlackMessageSendingError { status, message }))
        }
    }
}

use std::{future::Future, sync::Arc};

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::spawn;

use crate::github::dispatch::{E2EDispatchPayload, GithubRepositoryDispatch, RepositoryDispatchEvent};

use super::{
    command::E2ECommand,
    dispatch_failed_view::DispatchFailedView,
    message::{SlackFollowUpMessage, SlackSendMessage},
    run_started_view::RunStartedView,
    ui_lib::{blocks::SlackBlocks, slack_view::render_slack_view},
};

/// A `/run-e2e` slash command request from slack.
///
/// Slack sends many more fields, only the ones the relay uses are decoded. Missing fields are
/// treated as empty.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize, Clone, Default)]
pub struct SlackRunE2ERequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    channel_name: String,
    #[serde(default)]
    response_url: Option<String>,
}

impl SlackRunE2ERequest {
    fn dispatch_payload(&self, command: &E2ECommand) -> E2EDispatchPayload {
        E2EDispatchPayload {
            browser: command.browser().to_string(),
            test_file: command.test_file().to_string(),
            user: self.user_name.clone(),
            slack_user_id: self.user_id.clone(),
            slack_channel: self.channel_name.clone(),
        }
    }
}

/// The synchronous reply to a slash command.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct SlackCommandResponse {
    response_type: &'static str,
    text: &'static str,
    blocks: SlackBlocks,
}

impl SlackCommandResponse {
    fn run_started(user_name: &str, command: &E2ECommand) -> Self {
        Self {
            response_type: "in_channel",
            text: "🚀 Starting E2E tests...",
            blocks: render_slack_view(&RunStartedView::new(user_name, command)),
        }
    }
}

/// Handles an already verified `SlackRunE2ERequest` and returns the acknowledgment for slack.
///
/// Slack requires a response within 3 seconds, so the repository dispatch is handed to an
/// unstructured background task that is never awaited. That task only starts dispatching once
/// `acknowledged` resolves, which the caller must complete after the returned acknowledgment has
/// been written. If `acknowledged` resolves to false the acknowledgment never went out and
/// nothing is dispatched. The outcome of the dispatch is only logged, and when it fails a
/// follow-up message is posted to the request's `response_url` through `messenger`.
pub fn handle_run_e2e_request(
    request: SlackRunE2ERequest,
    dispatcher: Arc<impl GithubRepositoryDispatch + Send + Sync + 'static>,
    messenger: Arc<impl SlackSendMessage + Send + Sync + 'static>,
    acknowledged: impl Future<Output = bool> + Send + 'static,
) -> SlackCommandResponse {
    let command = E2ECommand::parse(request.text.as_deref());
    info!(
        "Slack command received from {}: browser={}, test={}",
        request.user_name,
        command.browser(),
        command.test_file()
    );
    let response = SlackCommandResponse::run_started(&request.user_name, &command);
    let event = RepositoryDispatchEvent::run_e2e_tests(request.dispatch_payload(&command));
    let response_url = request.response_url.filter(|url| !url.is_empty());
    spawn(async move {
        if !acknowledged.await {
            warn!("The acknowledgment was never sent, skipping the dispatch.");
            return;
        }
        dispatch_run(event, command, response_url, dispatcher.as_ref(), messenger.as_ref()).await
    });
    response
}

async fn dispatch_run(
    event: RepositoryDispatchEvent,
    command: E2ECommand,
    response_url: Option<String>,
    dispatcher: &impl GithubRepositoryDispatch,
    messenger: &impl SlackSendMessage,
) {
    let error = match dispatcher.dispatch(&event).await {
        Ok(()) => {
            info!(
                "Triggered E2E tests for {} ({}).",
                event.payload().user,
                command.test_description()
            );
            return;
        }
        Err(error) => error,
    };
    error!("Failed to trigger GitHub Action: {:#}", error);
    let Some(response_url) = response_url else {
        return;
    };
    let message = SlackFollowUpMessage::in_channel(
        "❌ Failed to start E2E tests.",
        &DispatchFailedView::new(&command, &error),
        &response_url,
    );
    if let Err(error) = messenger.send(&message).await {
        error!("Failed to send dispatch failure follow-up: {:#}", error);
    }
}

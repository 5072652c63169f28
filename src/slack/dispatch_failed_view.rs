use anyhow::Error;

use super::{
    command::E2ECommand,
    ui_lib::{
        block_kit_views::{SlackDivider, SlackHeader, SlackSection},
        slack_view::SlackView,
    },
};

/// Follow-up shown when the test workflow could not be triggered.
pub struct DispatchFailedView<'v> {
    command: &'v E2ECommand,
    error: &'v Error,
}

impl<'v> DispatchFailedView<'v> {
    pub fn new(command: &'v E2ECommand, error: &'v Error) -> Self {
        Self { command, error }
    }
}

impl<'v> SlackView for DispatchFailedView<'v> {
    fn slack_body(&self) -> impl SlackView {
        SlackHeader::new("Failed to Start E2E Tests")
            .flat_chain_block(SlackSection::from_markdown(&format!(
                "🔴 The workflow for *{}* on *{}* could not be triggered.",
                self.command.test_description(),
                self.command.browser()
            )))
            .flat_chain_block(SlackDivider)
            .flat_chain_block(
                SlackSection::from_plaintext(&self.error.to_string()).emoji_enabled(false),
            )
    }
}

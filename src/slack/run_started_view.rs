use super::{
    command::E2ECommand,
    ui_lib::{block_kit_views::SlackSection, slack_view::SlackView},
};

/// The acknowledgment shown in the channel as soon as a run is requested.
pub struct RunStartedView<'c> {
    user_name: &'c str,
    command: &'c E2ECommand,
}

impl<'c> RunStartedView<'c> {
    pub fn new(user_name: &'c str, command: &'c E2ECommand) -> Self {
        Self { user_name, command }
    }
}

impl<'c> SlackView for RunStartedView<'c> {
    fn slack_body(&self) -> impl SlackView {
        SlackSection::from_markdown(&format!(
            "*🚀 Starting E2E Tests*\n*Triggered by:* {}\n*Browser:* {}\n*Test:* {}",
            self.user_name,
            self.command.browser(),
            self.command.test_description()
        ))
    }
}

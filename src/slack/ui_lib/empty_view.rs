use super::{blocks::_SlackBlocks, slack_view::SlackView};

/// A view that renders no blocks.
pub struct EmptySlackView;

impl SlackView for EmptySlackView {
    #[allow(refining_impl_trait)]
    fn slack_body(&self) -> EmptySlackView {
        EmptySlackView
    }

    fn _push_blocks_into(&self, _: &mut _SlackBlocks) {}
}

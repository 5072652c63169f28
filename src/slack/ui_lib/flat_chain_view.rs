use super::{blocks::_SlackBlocks, empty_view::EmptySlackView, slack_view::SlackView};

#[derive(Debug, PartialEq, Eq)]
pub struct _FlatChainSlackView<Base: SlackView, Other: SlackView> {
    base: Base,
    other: Other,
}

impl<Base: SlackView, Other: SlackView> _FlatChainSlackView<Base, Other> {
    pub(super) fn new(base: Base, other: Other) -> Self {
        Self { base, other }
    }
}

impl<Base: SlackView, Other: SlackView> SlackView for _FlatChainSlackView<Base, Other> {
    fn slack_body(&self) -> impl SlackView {
        EmptySlackView
    }

    fn _push_blocks_into(&self, slack_blocks: &mut _SlackBlocks) {
        self.base._push_blocks_into(slack_blocks);
        self.other._push_blocks_into(slack_blocks)
    }
}

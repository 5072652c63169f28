use log::error;
use serde::Serialize;
use serde_json::Value;

use super::{blocks::_SlackBlocks, slack_view::SlackView};

/// A single serialized block kit block.
///
/// Block kit components render through this view, everything else is composed out of them.
#[derive(Debug, Clone)]
pub(super) struct RawBlock(Option<Value>);

impl RawBlock {
    pub(super) fn serialized(block: &impl Serialize) -> Self {
        match serde_json::to_value(block) {
            Ok(json) => Self(Some(json)),
            Err(err) => {
                error!("Dropping a slack block that failed to serialize: {}", err);
                Self(None)
            }
        }
    }

    pub(super) fn json(&self) -> Option<&Value> {
        self.0.as_ref()
    }
}

impl SlackView for RawBlock {
    #[allow(refining_impl_trait)]
    fn slack_body(&self) -> RawBlock {
        self.clone()
    }

    fn _push_blocks_into(&self, slack_blocks: &mut _SlackBlocks) {
        slack_blocks.push_raw_block(self)
    }
}

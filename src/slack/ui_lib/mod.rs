pub mod block_kit_views;
pub mod blocks;
pub mod empty_view;
pub mod flat_chain_view;
mod raw_block;
pub mod slack_view;
#[cfg(test)]
pub mod test_support;

use super::{slack_view::render_slack_view, slack_view::SlackView};

/// Asserts the json rendered by a slack view.
pub fn assert_blocks_json(view: &impl SlackView, json: &str) {
    let rendered = serde_json::to_string(&render_slack_view(view)).unwrap();
    assert_eq!(rendered, json)
}

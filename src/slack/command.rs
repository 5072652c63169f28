const BROWSER_FLAG: &str = "--browser=";
const TEST_FLAG: &str = "--test=";

/// The arguments of a `/run-e2e` slash command.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct E2ECommand {
    browser: String,
    test_file: String,
}

impl Default for E2ECommand {
    fn default() -> Self {
        Self {
            browser: "chromium".to_string(),
            test_file: String::new(),
        }
    }
}

impl E2ECommand {
    /// Parses the text of a slash command.
    ///
    /// Recognizes `--browser=<name>` and `--test=<file>` tokens, and silently ignores any other
    /// token. If a flag appears more than once, the last occurrence wins. The values are not
    /// validated in any way.
    pub fn parse(text: Option<&str>) -> Self {
        let mut command = Self::default();
        for token in text.unwrap_or_default().split_whitespace() {
            if token.starts_with(BROWSER_FLAG) {
                command.browser = value_of(token);
            } else if token.starts_with(TEST_FLAG) {
                command.test_file = value_of(token);
            }
        }
        command
    }
}

impl E2ECommand {
    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// The test file to run, an empty string means all tests.
    pub fn test_file(&self) -> &str {
        &self.test_file
    }

    /// A human readable description of the tests that will run.
    pub fn test_description(&self) -> &str {
        if self.test_file.is_empty() {
            "All tests"
        } else {
            &self.test_file
        }
    }
}

fn value_of(token: &str) -> String {
    token
        .split_once('=')
        .map(|(_, value)| value.to_string())
        .unwrap_or_default()
}

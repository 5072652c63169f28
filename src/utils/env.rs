use std::env;

/// Reads the environment variable `name`.
///
/// Unset, blank, and non unicode values are all treated as missing.
pub fn optional_env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

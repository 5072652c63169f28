use env_logger::Env;

/// Installs the global logger.
///
/// The level is read from `RUST_LOG`, and defaults to `info`.
pub fn bootstrap_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

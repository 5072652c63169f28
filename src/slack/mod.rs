pub mod ui_lib;
pub mod command;
pub mod signature;
pub mod handler;
pub mod message;
pub mod run_started_view;
pub mod dispatch_failed_view;
#[cfg(test)]
pub mod test_support;

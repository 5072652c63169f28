mod github;
mod http;
mod slack;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;
use http::{server::run_http_server, server_environment::ServerEnvironment};
use utils::log::bootstrap_logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    bootstrap_logging();
    run_http_server(Arc::new(ServerEnvironment::current()?)).await
}

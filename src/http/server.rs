use std::sync::Arc;

use axum::{
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, post},
    serve, Form, Json, Router,
};
use chrono::{SecondsFormat, Utc};
use log::info;
use serde::Serialize;
use tokio::net::TcpListener;

use crate::{
    github::dispatch::GithubRepositoryDispatch,
    slack::{
        handler::{handle_run_e2e_request, SlackRunE2ERequest},
        message::SlackSendMessage,
        signature::SlackSignatureVerifier,
    },
};

use super::{
    acknowledgment::{acknowledgment, AcknowledgedJson},
    server_environment::ServerEnvironment,
    signature::check_slack_signature_middleware,
};

/// Runs the relay as an http server using the specified `ServerEnvironment`.
pub async fn run_http_server(environment: Arc<ServerEnvironment>) -> anyhow::Result<()> {
    let server = relay_server(
        environment.signature_verifier(),
        environment.github_dispatcher(),
        environment.slack_messenger(),
    );
    let listener = TcpListener::bind(environment.address()).await?;
    info!("🚀 Slack webhook relay running on {}", environment.address());
    Ok(serve(listener, server).await?)
}

fn relay_server(
    verifier: SlackSignatureVerifier,
    dispatcher: Arc<impl GithubRepositoryDispatch + Send + Sync + 'static>,
    messenger: Arc<impl SlackSendMessage + Send + Sync + 'static>,
) -> Router<()> {
    let signature_protection = from_fn(move |req, next| {
        check_slack_signature_middleware(req, next, verifier.clone())
    });
    Router::new()
        .route(
            "/slack/run-e2e",
            post(move |form| post_run_e2e(form, dispatcher, messenger)),
        )
        .route_layer(signature_protection)
        .route("/health", get(get_health))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

async fn get_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn post_run_e2e(
    Form(request): Form<SlackRunE2ERequest>,
    dispatcher: Arc<impl GithubRepositoryDispatch + Send + Sync + 'static>,
    messenger: Arc<impl SlackSendMessage + Send + Sync + 'static>,
) -> impl IntoResponse {
    let (sent, receiver) = acknowledgment();
    let response = handle_run_e2e_request(request, dispatcher, messenger, receiver.sent());
    AcknowledgedJson::new(response, sent)
}

use std::{
    error::Error,
    fmt::{Debug, Display, Formatter},
    future::Future,
};

use anyhow::Result;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
    Client, StatusCode,
};
use serde::Serialize;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const RUN_E2E_TESTS_EVENT_TYPE: &str = "run-e2e-tests";

/// The data attached to a `run-e2e-tests` dispatch, describing what to run and who asked for it.
#[derive(Debug, PartialEq, Eq, Serialize, Clone)]
pub struct E2EDispatchPayload {
    pub browser: String,
    pub test_file: String,
    pub user: String,
    pub slack_user_id: String,
    pub slack_channel: String,
}

/// The body of a repository dispatch request.
#[derive(Debug, PartialEq, Eq, Serialize, Clone)]
pub struct RepositoryDispatchEvent {
    event_type: &'static str,
    client_payload: E2EDispatchPayload,
}

impl RepositoryDispatchEvent {
    pub fn run_e2e_tests(payload: E2EDispatchPayload) -> Self {
        Self {
            event_type: RUN_E2E_TESTS_EVENT_TYPE,
            client_payload: payload,
        }
    }

    pub fn payload(&self) -> &E2EDispatchPayload {
        &self.client_payload
    }
}

/// A trait for triggering workflows through github's repository dispatch API.
pub trait GithubRepositoryDispatch {
    /// Sends `event` once. Failures are never retried.
    fn dispatch(&self, event: &RepositoryDispatchEvent) -> impl Future<Output = Result<()>> + Send;
}

/// A github API token.
#[derive(Clone, PartialEq, Eq)]
pub struct GithubToken(String);

impl GithubToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl Debug for GithubToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("GithubToken([redacted])")
    }
}

/// The repository whose workflows are triggered, along with the credentials to do so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepository {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub token: Option<GithubToken>,
    pub api_url: String,
}

impl GithubRepository {
    fn dispatches_url(&self) -> Result<String, MissingGithubConfigurationError> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Ok(format!(
                "{}/repos/{}/{}/dispatches",
                self.api_url.trim_end_matches('/'),
                owner,
                repo
            )),
            (None, _) => Err(MissingGithubConfigurationError { name: "GITHUB_OWNER" }),
            (_, None) => Err(MissingGithubConfigurationError { name: "GITHUB_REPO" }),
        }
    }
}

#[derive(Debug)]
pub struct MissingGithubConfigurationError {
    name: &'static str,
}

impl Display for MissingGithubConfigurationError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} is not configured, cannot trigger the workflow", self.name)
    }
}

impl Error for MissingGithubConfigurationError {}

#[derive(Debug)]
pub struct RepositoryDispatchError {
    status: StatusCode,
    body: String,
}

impl Display for RepositoryDispatchError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "GitHub responded with {}: {}", self.status, self.body)
    }
}

impl Error for RepositoryDispatchError {}

/// Sends repository dispatches over HTTP.
#[derive(Debug, Clone)]
pub struct GithubDispatchClient {
    http_client: Client,
    repository: GithubRepository,
}

impl GithubDispatchClient {
    pub fn new(http_client: Client, repository: GithubRepository) -> Self {
        Self {
            http_client,
            repository,
        }
    }
}

impl GithubRepositoryDispatch for GithubDispatchClient {
    async fn dispatch(&self, event: &RepositoryDispatchEvent) -> Result<()> {
        let url = self.repository.dispatches_url()?;
        let Some(GithubToken(token)) = &self.repository.token else {
            return Err(MissingGithubConfigurationError { name: "GITHUB_TOKEN" }.into());
        };
        let response = self
            .http_client
            .post(url)
            .bearer_auth(token)
            .header(ACCEPT, "application/vnd.github.v3+json")
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, concat!("e2e-relay/", env!("CARGO_PKG_VERSION")))
            .json(event)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(RepositoryDispatchError { status, body }.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::utils::test_support::CapturingServer;

    use super::*;

    fn payload() -> E2EDispatchPayload {
        E2EDispatchPayload {
            browser: "firefox".to_string(),
            test_file: "login.spec.js".to_string(),
            user: "alice".to_string(),
            slack_user_id: "U2CERLKJA".to_string(),
            slack_channel: "qa".to_string(),
        }
    }

    fn repository() -> GithubRepository {
        GithubRepository {
            owner: Some("acme".to_string()),
            repo: Some("e2e-tests".to_string()),
            token: Some(GithubToken::new("ghp_secret")),
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
        }
    }

    #[test]
    fn serializes_event_with_client_payload() {
        let event = RepositoryDispatchEvent::run_e2e_tests(payload());
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event_type": "run-e2e-tests",
                "client_payload": {
                    "browser": "firefox",
                    "test_file": "login.spec.js",
                    "user": "alice",
                    "slack_user_id": "U2CERLKJA",
                    "slack_channel": "qa"
                }
            })
        )
    }

    #[test]
    fn dispatches_url_uses_owner_and_repo() {
        let mut repository = repository();
        repository.api_url = "https://github.example.com/api/v3/".to_string();
        assert_eq!(
            repository.dispatches_url().unwrap(),
            "https://github.example.com/api/v3/repos/acme/e2e-tests/dispatches"
        )
    }

    #[test]
    fn dispatches_url_requires_owner_and_repo() {
        let mut repository = repository();
        repository.repo = None;
        let error = repository.dispatches_url().unwrap_err();
        assert!(error.to_string().contains("GITHUB_REPO"));
        repository.owner = None;
        let error = repository.dispatches_url().unwrap_err();
        assert!(error.to_string().contains("GITHUB_OWNER"))
    }

    #[tokio::test]
    async fn dispatch_without_token_fails_before_sending() {
        let mut repository = repository();
        repository.token = None;
        repository.api_url = "http://127.0.0.1:9".to_string();
        let client = GithubDispatchClient::new(Client::new(), repository);
        let error = client
            .dispatch(&RepositoryDispatchEvent::run_e2e_tests(payload()))
            .await
            .unwrap_err();
        assert!(error.to_string().contains("GITHUB_TOKEN"))
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        assert!(!format!("{:?}", repository()).contains("ghp_secret"))
    }

    async fn dispatch_to(server: &CapturingServer) -> Result<()> {
        let mut repository = repository();
        repository.api_url = server.url().to_string();
        GithubDispatchClient::new(Client::new(), repository)
            .dispatch(&RepositoryDispatchEvent::run_e2e_tests(payload()))
            .await
    }

    #[tokio::test]
    async fn dispatch_posts_event_to_repository_dispatches() {
        let server = CapturingServer::start(StatusCode::NO_CONTENT, "").await;
        dispatch_to(&server).await.unwrap();
        let requests = server.requests().await;
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.path, "/repos/acme/e2e-tests/dispatches");
        assert_eq!(request.header("authorization"), Some("Bearer ghp_secret"));
        assert_eq!(request.header("accept"), Some("application/vnd.github.v3+json"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert!(request.header("user-agent").unwrap().starts_with("e2e-relay/"));
        assert_eq!(
            serde_json::from_slice::<Value>(&request.body).unwrap(),
            serde_json::to_value(RepositoryDispatchEvent::run_e2e_tests(payload())).unwrap()
        )
    }

    #[tokio::test]
    async fn dispatch_reports_client_error_responses() {
        let server = CapturingServer::start(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"Invalid request."}"#,
        )
        .await;
        let error = dispatch_to(&server).await.unwrap_err();
        let error = error.downcast_ref::<RepositoryDispatchError>().unwrap();
        assert_eq!(error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error.body, r#"{"message":"Invalid request."}"#);
        assert_eq!(server.requests().await.len(), 1)
    }

    #[tokio::test]
    async fn dispatch_reports_server_error_responses_without_retrying() {
        let server = CapturingServer::start(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
        let error = dispatch_to(&server).await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "GitHub responded with 500 Internal Server Error: boom"
        );
        assert_eq!(server.requests().await.len(), 1)
    }
}

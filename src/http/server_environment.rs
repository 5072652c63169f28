use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use reqwest::Client;

use crate::{
    github::dispatch::{GithubDispatchClient, GithubRepository, GithubToken, DEFAULT_GITHUB_API_URL},
    slack::signature::{SlackSignatureVerifier, SlackSigningSecret},
    utils::env::optional_env_var,
};

pub const DEFAULT_PORT: u16 = 3000;

/// The relay's configuration, read once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    github: GithubRepository,
    signing_secret: Option<SlackSigningSecret>,
    port: u16,
}

impl RelayConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(optional_env_var)
    }

    /// Reads the configuration using `lookup` to resolve variable names.
    ///
    /// Missing credentials do not fail, the relay starts in a degraded mode where every signed
    /// request is rejected and every dispatch fails. Only a malformed `PORT` is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}.", port))?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            github: GithubRepository {
                owner: lookup("GITHUB_OWNER"),
                repo: lookup("GITHUB_REPO"),
                token: lookup("GITHUB_TOKEN").map(GithubToken::new),
                api_url: lookup("GITHUB_API_URL")
                    .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            },
            signing_secret: lookup("SLACK_SIGNING_SECRET").map(SlackSigningSecret::new),
            port,
        })
    }

    /// The names of required variables that are not set.
    pub fn missing_variables(&self) -> Vec<&'static str> {
        let checks = [
            ("GITHUB_TOKEN", self.github.token.is_some()),
            ("GITHUB_OWNER", self.github.owner.is_some()),
            ("GITHUB_REPO", self.github.repo.is_some()),
            ("SLACK_SIGNING_SECRET", self.signing_secret.is_some()),
        ];
        checks
            .into_iter()
            .filter(|(_, is_set)| !is_set)
            .map(|(name, _)| name)
            .collect()
    }

    fn log_environment_check(&self) {
        info!("📝 Environment check:");
        info!("   - GITHUB_TOKEN: {}", set_or_missing(self.github.token.is_some()));
        info!(
            "   - GITHUB_OWNER: {}",
            self.github.owner.as_deref().unwrap_or("✗ Missing")
        );
        info!(
            "   - GITHUB_REPO: {}",
            self.github.repo.as_deref().unwrap_or("✗ Missing")
        );
        info!(
            "   - SLACK_SIGNING_SECRET: {}",
            set_or_missing(self.signing_secret.is_some())
        );
        for name in self.missing_variables() {
            warn!("{} is not set, the relay is running in a degraded mode.", name);
        }
    }
}

fn set_or_missing(is_set: bool) -> &'static str {
    if is_set {
        "✓ Set"
    } else {
        "✗ Missing"
    }
}

/// A data type containing necessary structs for server operations.
pub struct ServerEnvironment {
    config: RelayConfig,
    http_client: Client,
    address: String,
}

impl ServerEnvironment {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            address: format!("0.0.0.0:{}", config.port),
            http_client: Client::new(),
            config,
        }
    }

    /// Returns the environment configured by the current process environment.
    pub fn current() -> Result<Self> {
        let config = RelayConfig::from_env()?;
        config.log_environment_check();
        Ok(Self::new(config))
    }
}

impl ServerEnvironment {
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn signature_verifier(&self) -> SlackSignatureVerifier {
        SlackSignatureVerifier::new(self.config.signing_secret.clone())
    }

    pub fn github_dispatcher(&self) -> Arc<GithubDispatchClient> {
        Arc::new(GithubDispatchClient::new(
            self.http_client.clone(),
            self.config.github.clone(),
        ))
    }

    pub fn slack_messenger(&self) -> Arc<Client> {
        Arc::new(self.http_client.clone())
    }
}

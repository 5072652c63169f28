use std::fmt::{Debug, Formatter};

use anyhow::{anyhow, Result};
use chrono::Utc;
use hmac::{Hmac, Mac};
use log::warn;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// The maximum age (in either direction) of a request timestamp in seconds.
pub const REPLAY_WINDOW_SECONDS: u64 = 300;

const SIGNATURE_VERSION: &str = "v0";

/// The signing secret shared between slack and this relay.
#[derive(Clone, PartialEq, Eq)]
pub struct SlackSigningSecret(String);

impl SlackSigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl Debug for SlackSigningSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SlackSigningSecret([redacted])")
    }
}

/// Computes the `v0=<hex>` signature slack would send for `body` at `timestamp`.
pub fn compute_signature(
    secret: &SlackSigningSecret,
    timestamp: &str,
    body: &[u8],
) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.0.as_bytes())
        .map_err(|_| anyhow!("The slack signing secret is not a valid HMAC key."))?;
    mac.update(SIGNATURE_VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    Ok(format!(
        "{}={}",
        SIGNATURE_VERSION,
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Checks that requests were sent by slack.
///
/// Verification never fails loudly, any malformed or missing input simply results in the request
/// being treated as unverified. A verifier without a signing secret rejects everything.
#[derive(Debug, Clone)]
pub struct SlackSignatureVerifier {
    secret: Option<SlackSigningSecret>,
}

impl SlackSignatureVerifier {
    pub fn new(secret: Option<SlackSigningSecret>) -> Self {
        Self { secret }
    }
}

impl SlackSignatureVerifier {
    /// Returns true if `signature` is slack's signature of `body` at `timestamp`, and the
    /// timestamp is within the replay window of the current time.
    pub fn verify(&self, signature: Option<&str>, timestamp: Option<&str>, body: &[u8]) -> bool {
        self.verify_at(signature, timestamp, body, Utc::now().timestamp())
    }

    /// Same as `verify`, but uses `now` as the current unix time in seconds.
    pub fn verify_at(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
        now: i64,
    ) -> bool {
        let Some(secret) = &self.secret else {
            warn!("No slack signing secret is configured, rejecting request.");
            return false;
        };
        let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
            warn!("Slack request is missing its signature or timestamp.");
            return false;
        };
        let Ok(seconds) = timestamp.parse::<i64>() else {
            warn!("Slack request timestamp {:?} is not a unix time.", timestamp);
            return false;
        };
        if now.abs_diff(seconds) > REPLAY_WINDOW_SECONDS {
            warn!("Slack request timestamp is outside of the replay window.");
            return false;
        }
        match compute_signature(secret, timestamp, body) {
            Ok(expected) => expected.as_bytes().ct_eq(signature.as_bytes()).into(),
            Err(error) => {
                warn!("Failed to compute slack signature: {}", error);
                false
            }
        }
    }
}

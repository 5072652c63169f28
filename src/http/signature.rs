use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use log::warn;
use serde::Serialize;

use crate::slack::signature::SlackSignatureVerifier;

pub const SIGNATURE_HEADER: &str = "x-slack-signature";
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// The response for requests that could not be verified as coming from slack.
#[derive(Debug)]
pub struct InvalidSignature;

impl IntoResponse for InvalidSignature {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: "Invalid signature",
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Middleware to check that a request was signed by slack.
///
/// The body is buffered so that the signature is checked against the exact bytes that were
/// received, and the request is rebuilt from those same bytes before it reaches the handler.
pub async fn check_slack_signature_middleware(
    req: Request,
    next: Next,
    verifier: SlackSignatureVerifier,
) -> Result<Response, InvalidSignature> {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|error| {
        warn!("Failed to read slack request body: {}", error);
        InvalidSignature
    })?;
    let signature = header_str(&parts.headers, SIGNATURE_HEADER);
    let timestamp = header_str(&parts.headers, TIMESTAMP_HEADER);
    if !verifier.verify(signature, timestamp, &bytes) {
        warn!("Invalid Slack signature on {}.", parts.uri.path());
        return Err(InvalidSignature);
    }
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

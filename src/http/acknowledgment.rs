use std::{
    convert::Infallible,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    body::{Body, Bytes},
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use futures::Stream;
use log::error;
use serde::Serialize;
use tokio::sync::oneshot;

/// Creates the pair used to hold background work until a response has been written.
///
/// The `AcknowledgmentSent` fires once the body of the response it is attached to has been
/// fully handed to the connection, or when that body is dropped. The `AcknowledgmentReceiver`
/// resolves to false if the response was never produced.
pub fn acknowledgment() -> (AcknowledgmentSent, AcknowledgmentReceiver) {
    let (sender, receiver) = oneshot::channel();
    (AcknowledgmentSent(sender), AcknowledgmentReceiver(receiver))
}

#[derive(Debug)]
pub struct AcknowledgmentSent(oneshot::Sender<()>);

#[derive(Debug)]
pub struct AcknowledgmentReceiver(oneshot::Receiver<()>);

impl AcknowledgmentReceiver {
    /// Waits for the acknowledgment, returns true if it was written.
    pub async fn sent(self) -> bool {
        self.0.await.is_ok()
    }
}

/// A JSON response that fires an `AcknowledgmentSent` after its body has been streamed.
pub struct AcknowledgedJson<T: Serialize> {
    value: T,
    sent: AcknowledgmentSent,
}

impl<T: Serialize> AcknowledgedJson<T> {
    pub fn new(value: T, sent: AcknowledgmentSent) -> Self {
        Self { value, sent }
    }
}

impl<T: Serialize> IntoResponse for AcknowledgedJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.value) {
            Ok(json) => {
                let headers = [
                    (CONTENT_TYPE, HeaderValue::from_static("application/json")),
                    (CONTENT_LENGTH, HeaderValue::from(json.len())),
                ];
                let body = SignalOnCompletion {
                    json: Some(Bytes::from(json)),
                    sent: Some(self.sent.0),
                };
                (headers, Body::from_stream(body)).into_response()
            }
            Err(error) => {
                error!("Failed to serialize acknowledgment: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

struct SignalOnCompletion {
    json: Option<Bytes>,
    sent: Option<oneshot::Sender<()>>,
}

impl SignalOnCompletion {
    fn signal(&mut self) {
        if let Some(sent) = self.sent.take() {
            _ = sent.send(());
        }
    }
}

impl Stream for SignalOnCompletion {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.json.take() {
            Some(json) => Poll::Ready(Some(Ok(json))),
            None => {
                self.signal();
                Poll::Ready(None)
            }
        }
    }
}

impl Drop for SignalOnCompletion {
    fn drop(&mut self) {
        self.signal()
    }
}

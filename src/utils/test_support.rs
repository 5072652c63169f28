use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{HeaderMap, Method, StatusCode, Uri},
    serve, Router,
};
use tokio::{net::TcpListener, spawn, sync::Mutex};

/// A request received by a `CapturingServer`.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// A local http server that records every request and answers all of them with the same reply.
pub struct CapturingServer {
    url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl CapturingServer {
    pub async fn start(status: StatusCode, reply: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(vec![]));
        let recorded = requests.clone();
        let router = Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| async move {
                recorded.lock().await.push(CapturedRequest {
                    method,
                    path: uri.path().to_string(),
                    headers,
                    body,
                });
                (status, reply)
            },
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        spawn(async move { serve(listener, router).await.unwrap() });
        Self { url, requests }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().await.clone()
    }
}

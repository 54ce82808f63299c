//! Test utilities for CLI testing
//!
//! Provides a recording mock of the reporting API for client tests.

use aa_core::edgerc::Credentials;
use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Json},
    Router,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// One request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// `Host` header as received
    pub host: Option<String>,
    /// Percent-decoded path
    pub path: String,
    /// Path exactly as sent on the wire
    pub raw_path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    /// JSON body, or `Null` when empty
    pub body: serde_json::Value,
    pub raw_body: Vec<u8>,
}

/// Mock server state
#[derive(Debug, Clone)]
struct MockServerState {
    status: StatusCode,
    response: serde_json::Value,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Mock reporting API that answers every request with one canned response
#[derive(Debug)]
pub struct MockServer {
    state: MockServerState,
    port: u16,
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockServer {
    /// Create a mock server that answers `200 {}`
    pub fn new() -> Self {
        Self {
            state: MockServerState {
                status: StatusCode::OK,
                response: serde_json::json!({}),
                requests: Arc::new(Mutex::new(Vec::new())),
            },
            port: 0, // Assigned when the server starts
        }
    }

    /// Set the canned status and JSON body
    pub fn respond(mut self, status: u16, body: serde_json::Value) -> Self {
        self.state.status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
        self.state.response = body;
        self
    }

    /// Start the mock server and return it with its base URL
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = Router::new()
            .fallback(record_handler)
            .with_state(self.state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        self.port = listener.local_addr()?.port();
        let server_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        // Wait until the listener accepts connections
        for _ in 0..20 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Ok((self, server_url))
    }

    /// Get the server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

/// Credentials pointing at `host`, which may be a full mock server URL
pub fn test_credentials(host: &str) -> Credentials {
    Credentials {
        host: host.to_string(),
        client_token: "akab-test-client-token".to_string(),
        client_secret: "dGVzdC1zZWNyZXQ=".to_string(),
        access_token: "akab-test-access-token".to_string(),
        max_body: aa_core::edgerc::DEFAULT_MAX_BODY,
    }
}

async fn record_handler(
    State(state): State<MockServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let raw_path = uri.path().to_string();
    let path = urlencoding::decode(&raw_path)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| raw_path.clone());

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        host: header_str(header::HOST),
        path,
        raw_path,
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
        raw_body: body.to_vec(),
    });

    (state.status, Json(state.response.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_startup() {
        let server = MockServer::new();
        let (server, url) = server.start().await.unwrap();

        assert!(server.port() > 0);
        assert!(url.contains(&server.port().to_string()));

        let response = reqwest::Client::new()
            .get(format!("{}/anything", url))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(server.requests().len(), 1);
        assert_eq!(server.requests()[0].path, "/anything");
    }

    #[tokio::test]
    async fn test_canned_response() {
        let server = MockServer::new().respond(403, serde_json::json!({ "title": "Forbidden" }));
        let (_, url) = server.start().await.unwrap();

        let response = reqwest::Client::new()
            .post(format!("{}/billing/v1/measures", url))
            .json(&serde_json::json!({ "month": 1 }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::FORBIDDEN);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["title"], "Forbidden");
    }
}

//! HTTP transport abstraction
//!
//! The dispatcher never talks to the network directly. It hands a fully-formed
//! POST to an [`HttpTransport`] and gets back status, headers and raw body.
//! [`ReqwestTransport`] is the production implementation; [`MockTransport`]
//! records requests and replays canned responses for tests.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, DNS or TLS failure
    #[error("connection failed: {0}")]
    Connection(String),

    /// Request did not complete in time
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Request could not be built (bad URL or header)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// A POST ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL
    pub url: String,
    /// Headers in the order they were added
    pub headers: Vec<(String, String)>,
    /// URL-encoded body
    pub body: String,
}

impl HttpRequest {
    /// Look up a header (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Raw response as returned by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Vec<(String, String)>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create an empty response with the given status
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// A 200 response with `Content-Type: application/json`
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200)
            .with_header("Content-Type", "application/json; charset=utf-8")
            .with_body(body)
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Look up a header (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Trait for HTTP transport abstraction
///
/// Implementations must be safe to share between concurrent calls; the client
/// holds one behind an `Arc` for its whole lifetime.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one POST and return whatever the server answered
    ///
    /// Non-2xx statuses are not errors at this layer.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Real transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Wrap an existing reqwest client
    ///
    /// `timeout` is only used to report [`TransportError::Timeout`].
    pub fn from_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if error.is_builder() {
            TransportError::InvalidRequest(error.to_string())
        } else {
            TransportError::Connection(error.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest { url, headers, body } = request;

        let mut builder = self.client.post(url).body(body);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?
            .to_vec();

        debug!(status, len = body.len(), "HTTP response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Mock transport for testing
///
/// Replays queued responses in order and records every request it receives.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: parking_lot::Mutex<std::collections::VecDeque<Result<HttpResponse, TransportError>>>,
    requests: parking_lot::Mutex<Vec<HttpRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a new mock transport with no queued responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn push_response(&self, response: HttpResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queue a 200 JSON response with the given body
    pub fn push_json(&self, body: impl Into<Vec<u8>>) {
        self.push_response(HttpResponse::json(body));
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("no mock response queued".into())))
    }
}

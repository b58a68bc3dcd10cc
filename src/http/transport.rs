//! Transport abstraction and its reqwest implementation
//!
//! A transport sends one fully built request and hands back status, headers
//! and the decoded body. Non-2xx answers are reported as [`TransportError`]
//! so that callers only ever branch on one typed failure shape.

use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// A single physical HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    /// Absolute URL
    pub url: String,
    /// HTTP method
    pub method: Method,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<JsonValue>,
}

impl RawRequest {
    /// Create a request without headers or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add a bearer authorization header
    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a header value (case-insensitive)
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// A successful transport response
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Decoded body (null when empty, a JSON string when not JSON)
    pub body: JsonValue,
}

/// Canonical failure shape produced at the transport boundary
#[derive(Debug, Clone, PartialEq)]
pub struct TransportError {
    /// HTTP status, `None` when no response was received
    pub status: Option<u16>,
    /// Legacy `Status` response header, e.g. `401 Unauthorized`
    pub status_line: Option<String>,
    /// Canonical API error message, see [`canonical_message`]
    pub message: Option<String>,
    /// Decoded error body
    pub body: JsonValue,
}

impl TransportError {
    /// Error for a server that answered with a failure status
    pub fn http(status: u16, body: JsonValue) -> Self {
        Self {
            status: Some(status),
            status_line: None,
            message: canonical_message(&body),
            body,
        }
    }

    /// Error for a request that never got a response
    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            status: None,
            status_line: None,
            message: Some(message.into()),
            body: JsonValue::Null,
        }
    }

    /// Attach the legacy status line header
    #[must_use]
    pub fn with_status_line(mut self, status_line: impl Into<String>) -> Self {
        self.status_line = Some(status_line.into());
        self
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.message) {
            (Some(status), _) => write!(f, "HTTP {status}: {}", self.body),
            (None, Some(message)) => write!(f, "{message}"),
            (None, None) => write!(f, "request failed"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Extract the API error message from the shapes the upstream has used
///
/// Checked in order: `errors[0].message`, `response.body.errors[0].message`,
/// top-level `message`.
pub fn canonical_message(body: &JsonValue) -> Option<String> {
    [
        "/errors/0/message",
        "/response/body/errors/0/message",
        "/message",
    ]
    .iter()
    .find_map(|pointer| body.pointer(pointer).and_then(JsonValue::as_str))
    .map(str::to_string)
}

/// Sends physical requests
///
/// Implementations must report any non-2xx answer as a [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request
    async fn send(&self, request: RawRequest) -> Result<RawResponse, TransportError>;
}

// ============================================================================
// reqwest transport
// ============================================================================

/// Configuration for [`ReqwestTransport`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Request timeout
    #[serde(
        rename = "timeout_secs",
        default = "default_timeout",
        with = "duration_secs"
    )]
    pub timeout: Duration,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Default headers for all requests
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("lms-client/{}", env!("CARGO_PKG_VERSION"))
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            default_headers: HashMap::new(),
        }
    }
}

impl TransportConfig {
    /// Create a new config builder
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Builder for transport config
#[derive(Default)]
pub struct TransportConfigBuilder {
    config: TransportConfig,
}

impl TransportConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> TransportConfig {
        self.config
    }
}

/// [`Transport`] backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> crate::Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: TransportConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| crate::Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Get the transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        let mut req = self
            .client
            .request(request.method.into(), &request.url)
            .header(CONTENT_TYPE, "application/json");

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| TransportError::connection(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::connection(e.to_string()))?;
        let body = decode_body(&text);

        debug!("{} {} -> {}", request.method, request.url, status.as_u16());

        if status.is_success() {
            return Ok(RawResponse {
                status: status.as_u16(),
                headers,
                body,
            });
        }

        let mut err = TransportError::http(status.as_u16(), body);
        if let Some(line) = headers.get("status").and_then(|v| v.to_str().ok()) {
            err = err.with_status_line(line);
        }
        Err(err)
    }
}

/// Decode a response body: empty -> null, invalid JSON -> string
fn decode_body(text: &str) -> JsonValue {
    if text.trim().is_empty() {
        return JsonValue::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string()))
}

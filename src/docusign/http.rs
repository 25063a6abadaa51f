//! HTTP transport for DocuSign REST API calls

use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;
use std::future::Future;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Message prefix of errors for non-2xx responses, followed by the status
const REQUEST_FAILED_PREFIX: &str = "API request failed: ";

/// User agent sent with every request
const USER_AGENT: &str = concat!("docusign-connect/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// One call to the REST API: verb, url, headers, query parameters and optional JSON body
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            url: url.into(),
            headers,
            query: Vec::new(),
            body: None,
        }
    }

    /// Attach a JSON body
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Sends a request and returns the decoded JSON response.
///
/// Implementations own TLS, connection reuse, timeouts and cancellation. The
/// resource clients built on top never retry and never interpret status codes.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Value>> + Send;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client (custom timeouts, proxies)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Only the sanitized, truncated body is logged
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("{}{}", REQUEST_FAILED_PREFIX, status));
        }

        // Handle empty response
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

/// Format a DocuSign API error for display
/// Maps status codes to generic messages instead of echoing API details
pub fn format_api_error(error: &anyhow::Error) -> String {
    let error_str = error.to_string();

    if let Some(status) = failed_status(&error_str) {
        return match status {
            401 => "Authentication failed. Check your access token or integrator key.",
            403 => "Permission denied. Connect administration requires account admin rights.",
            404 => "Connect configuration or account not found.",
            429 => "Rate limit exceeded. Please try again later.",
            400 => "Invalid request. Check your parameters.",
            500..=599 => "DocuSign service temporarily unavailable. Please try again.",
            _ => "Request failed. Check your network connection and try again.",
        }
        .to_string();
    }

    // Truncate long error messages and drop non-printable characters
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

/// Status code of an error raised by [`HttpTransport`] for a non-2xx response
fn failed_status(error_str: &str) -> Option<u16> {
    error_str
        .strip_prefix(REQUEST_FAILED_PREFIX)?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

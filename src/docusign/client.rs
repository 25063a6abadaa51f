//! DocuSign Client
//!
//! Holds the API configuration (environment, version, credentials) and the
//! transport, and hands out resource clients that borrow both.

use super::auth::Credentials;
use super::error::{ConnectError, Result};
use super::http::{HttpTransport, Transport};
use crate::connect::ConnectResource;
use reqwest::header::HeaderMap;

/// Default DocuSign environment (sandbox)
pub const DEFAULT_ENVIRONMENT: &str = "demo";

/// Default REST API version
pub const DEFAULT_VERSION: &str = "v2";

/// Environment, version and credentials shared by every call
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub environment: String,
    pub version: String,
    pub credentials: Credentials,
    base_url: Option<String>,
}

impl ApiConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            credentials,
            base_url: None,
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Send requests to `base_url` instead of the environment's
    /// `https://{environment}.docusign.net/restapi/{version}`
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| ConnectError::Config(format!("invalid base url '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConnectError::Config(format!(
                "unsupported base url scheme '{}'",
                parsed.scheme()
            )));
        }
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        Ok(self)
    }

    /// Root of the REST API for this environment and version
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!(
                "https://{}.docusign.net/restapi/{}",
                self.environment, self.version
            ),
        }
    }

    /// Build a full API URL from a path starting with `/`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Authorization headers for one request
    pub fn headers(&self) -> Result<HeaderMap> {
        self.credentials.headers()
    }
}

/// Main DocuSign client
#[derive(Clone)]
pub struct DocuSignClient<T: Transport = HttpTransport> {
    pub config: ApiConfig,
    pub transport: T,
}

impl DocuSignClient<HttpTransport> {
    /// Create a client backed by the reqwest transport
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = HttpTransport::new()?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> DocuSignClient<T> {
    /// Create a client with a custom transport
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Connect (webhook configuration) operations
    pub fn connect(&self) -> ConnectResource<'_, T> {
        ConnectResource::new(&self.config, &self.transport)
    }
}

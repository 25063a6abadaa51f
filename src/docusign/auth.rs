//! DocuSign Authentication
//!
//! Builds the authorization headers for REST API calls, either from an OAuth
//! access token or from the legacy username/password/integrator-key triple.

use super::error::{ConnectError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::json;

/// Header carrying the legacy credential triple as JSON
pub const LEGACY_AUTH_HEADER: &str = "X-DocuSign-Authentication";

/// Credentials used to authorize API calls
#[derive(Clone)]
pub enum Credentials {
    /// OAuth access token, sent as `Authorization: Bearer <token>`
    Bearer { access_token: String },
    /// Legacy header authentication
    Legacy {
        username: String,
        password: String,
        integrator_key: String,
    },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print secrets
        match self {
            Self::Bearer { .. } => f.write_str("Credentials::Bearer(***)"),
            Self::Legacy { username, .. } => {
                write!(f, "Credentials::Legacy({}, ***)", username)
            }
        }
    }
}

impl Credentials {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::Bearer {
            access_token: access_token.into(),
        }
    }

    pub fn legacy(
        username: impl Into<String>,
        password: impl Into<String>,
        integrator_key: impl Into<String>,
    ) -> Self {
        Self::Legacy {
            username: username.into(),
            password: password.into(),
            integrator_key: integrator_key.into(),
        }
    }

    /// Read credentials from the environment
    ///
    /// `DOCUSIGN_ACCESS_TOKEN` wins; otherwise all of `DOCUSIGN_USERNAME`,
    /// `DOCUSIGN_PASSWORD` and `DOCUSIGN_INTEGRATOR_KEY` must be set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty("DOCUSIGN_ACCESS_TOKEN") {
            tracing::debug!("Using bearer token credentials");
            return Ok(Self::bearer(token));
        }

        match (
            non_empty("DOCUSIGN_USERNAME"),
            non_empty("DOCUSIGN_PASSWORD"),
            non_empty("DOCUSIGN_INTEGRATOR_KEY"),
        ) {
            (Some(username), Some(password), Some(integrator_key)) => {
                tracing::debug!("Using legacy header credentials");
                Ok(Self::legacy(username, password, integrator_key))
            }
            _ => Err(ConnectError::Config(
                "no credentials found. Set DOCUSIGN_ACCESS_TOKEN, or DOCUSIGN_USERNAME, \
                 DOCUSIGN_PASSWORD and DOCUSIGN_INTEGRATOR_KEY"
                    .to_string(),
            )),
        }
    }

    /// Authorization headers for one request
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        match self {
            Self::Bearer { access_token } => {
                let mut value = header_value(&format!("Bearer {}", access_token))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Self::Legacy {
                username,
                password,
                integrator_key,
            } => {
                let payload = json!({
                    "Username": username,
                    "Password": password,
                    "IntegratorKey": integrator_key,
                });
                let mut value = header_value(&payload.to_string())?;
                value.set_sensitive(true);
                headers.insert(HeaderName::from_static("x-docusign-authentication"), value);
            }
        }

        Ok(headers)
    }
}

fn header_value(raw: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(raw).map_err(|_| {
        ConnectError::Config("credentials contain invalid header characters".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_bearer_headers() {
        let headers = Credentials::bearer("abc123").headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc123");
        assert_eq!(headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_legacy_headers_are_json() {
        let headers = Credentials::legacy("me@example.com", "secret", "KEY-1")
            .headers()
            .unwrap();
        let raw = headers[LEGACY_AUTH_HEADER].to_str().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed["Username"], "me@example.com");
        assert_eq!(parsed["Password"], "secret");
        assert_eq!(parsed["IntegratorKey"], "KEY-1");
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_invalid_header_characters_rejected() {
        let err = Credentials::bearer("bad\ntoken").headers().unwrap_err();
        assert!(matches!(err, ConnectError::Config(_)));
    }

    #[test]
    fn test_token_takes_precedence() {
        let creds = Credentials::from_lookup(lookup(&[
            ("DOCUSIGN_ACCESS_TOKEN", "tok"),
            ("DOCUSIGN_USERNAME", "u"),
            ("DOCUSIGN_PASSWORD", "p"),
            ("DOCUSIGN_INTEGRATOR_KEY", "k"),
        ]))
        .unwrap();
        assert!(matches!(creds, Credentials::Bearer { .. }));
    }

    #[test]
    fn test_partial_legacy_triple_is_an_error() {
        let result = Credentials::from_lookup(lookup(&[
            ("DOCUSIGN_USERNAME", "u"),
            ("DOCUSIGN_PASSWORD", "p"),
        ]));
        assert!(matches!(result, Err(ConnectError::Config(_))));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", Credentials::legacy("me", "hunter2", "KEY"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("KEY"));
    }
}

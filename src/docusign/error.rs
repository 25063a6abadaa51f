//! Error types for the DocuSign client

use thiserror::Error;

/// Errors raised by the Connect client
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Network, HTTP status or body decoding failure reported by the transport.
    /// Passed through untouched.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),

    /// A parameter had the wrong shape for its enumerated field
    #[error("field `{field}` expects {expected}, got {found}")]
    Marshal {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The server response lacks a mandatory field or has an unexpected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid credentials, header values or settings
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConnectError>;

/// Short JSON type name used in error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

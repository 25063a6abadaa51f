//! Connect configuration records

use super::fields::BOOLEAN_FIELDS;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One webhook subscription, with CSV fields already expanded to lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConnectConfiguration {
    /// Server-assigned identifier, a number or a string depending on the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_to_publish_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub envelope_events: Vec<String>,
    #[serde(default)]
    pub recipient_events: Vec<String>,
    #[serde(default)]
    pub user_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soap_namespace: Option<String>,
    /// Boolean flags and every other field, exactly as returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConnectConfiguration {
    /// Identifier rendered as a path segment
    pub fn id_string(&self) -> Option<String> {
        match self.connect_id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Read a flag the server may return as `true` or `"true"`
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.extra.get(name)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    /// All known boolean flags present on this record
    pub fn flags(&self) -> Vec<(&'static str, bool)> {
        BOOLEAN_FIELDS
            .iter()
            .filter_map(|name| self.flag(name).map(|value| (*name, value)))
            .collect()
    }
}

/// Response of the list and get-by-id calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationList {
    pub configurations: Vec<ConnectConfiguration>,
    pub total_records: u64,
}

impl ConfigurationList {
    /// Whether `totalRecords` matches the number of configurations returned
    pub fn is_consistent(&self) -> bool {
        self.total_records == self.configurations.len() as u64
    }
}

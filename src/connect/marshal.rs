//! Field marshaling between the wire and application representations
//!
//! Every function takes the map by reference and returns a new one; the
//! caller's map is never modified.

use super::fields::{BOOLEAN_FIELDS, CSV_FIELDS};
use crate::docusign::error::{json_type_name, ConnectError, Result};
use serde_json::{Map, Value};

/// A parameter or response object keyed by wire field name
pub type Params = Map<String, Value>;

/// Truthiness of a JSON value: `null`, `false`, `0`, `""`, `"0"` and `[]` are false.
/// Objects have no truthiness and yield `None`.
fn truthiness(value: &Value) -> Option<bool> {
    match value {
        Value::Null => Some(false),
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => Some(!(s.is_empty() || s == "0")),
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(_) => None,
    }
}

/// Replace each listed field present in `data` with its boolean coercion
pub fn to_booleans(data: &Params, fields: &[&str]) -> Result<Params> {
    let mut out = data.clone();
    for (key, value) in out.iter_mut() {
        if !fields.contains(&key.as_str()) {
            continue;
        }
        let coerced = truthiness(value).ok_or_else(|| ConnectError::Marshal {
            field: key.clone(),
            expected: "a value coercible to boolean",
            found: json_type_name(&*value),
        })?;
        *value = Value::Bool(coerced);
    }
    Ok(out)
}

/// Replace each listed field present in `data` with its elements joined by `,`
///
/// The value must be an array of strings or numbers. An already joined string
/// is rejected rather than passed through.
pub fn to_csv(data: &Params, fields: &[&str]) -> Result<Params> {
    let mut out = data.clone();
    for (key, value) in out.iter_mut() {
        if !fields.contains(&key.as_str()) {
            continue;
        }
        let Value::Array(items) = &*value else {
            return Err(ConnectError::Marshal {
                field: key.clone(),
                expected: "an array",
                found: json_type_name(&*value),
            });
        };
        let parts = items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(ConnectError::Marshal {
                    field: key.clone(),
                    expected: "an array of strings or numbers",
                    found: json_type_name(other),
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        *value = Value::String(parts.join(","));
    }
    Ok(out)
}

/// Replace each listed field present in `data` with its string value split on `,`
///
/// An empty string or `null` becomes an empty list; a value that is already a
/// list is kept.
pub fn to_arrays(data: &Params, fields: &[&str]) -> Result<Params> {
    let mut out = data.clone();
    for (key, value) in out.iter_mut() {
        if !fields.contains(&key.as_str()) {
            continue;
        }
        let expanded = match &*value {
            Value::String(s) if s.is_empty() => Vec::new(),
            Value::String(s) => s
                .split(',')
                .map(|part| Value::String(part.to_string()))
                .collect(),
            Value::Null => Vec::new(),
            Value::Array(_) => continue,
            other => {
                return Err(ConnectError::MalformedResponse(format!(
                    "field `{}` should be a comma separated string, got {}",
                    key,
                    json_type_name(other)
                )))
            }
        };
        *value = Value::Array(expanded);
    }
    Ok(out)
}

/// Remove keys whose value is `null` or an empty list
pub fn drop_empty(data: &Params) -> Params {
    data.iter()
        .filter(|(_, value)| match value {
            Value::Null => false,
            Value::Array(items) => !items.is_empty(),
            _ => true,
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Wire form of caller parameters: boolean coercion, then CSV joining
pub fn prepare_request(params: &Params) -> Result<Params> {
    let data = to_booleans(params, BOOLEAN_FIELDS)?;
    to_csv(&data, CSV_FIELDS)
}

/// Application form of one configuration object returned by the server
pub fn expand_response(value: &Value) -> Result<Params> {
    let Value::Object(object) = value else {
        return Err(ConnectError::MalformedResponse(format!(
            "expected a configuration object, got {}",
            json_type_name(value)
        )));
    };
    to_arrays(object, CSV_FIELDS)
}

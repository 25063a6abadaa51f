//! Connect resource client
//!
//! One method per REST action on `/accounts/{accountId}/connect`. Each call
//! marshals its parameters, issues exactly one request through the transport and
//! expands CSV fields in the response.

use super::fields::CONNECT_ID;
use super::marshal::{expand_response, prepare_request, Params};
use super::model::{ConfigurationList, ConnectConfiguration};
use crate::docusign::client::ApiConfig;
use crate::docusign::error::{json_type_name, ConnectError, Result};
use crate::docusign::http::{ApiRequest, Transport};
use reqwest::Method;
use serde_json::Value;

/// Connect operations bound to a configuration and a transport
pub struct ConnectResource<'a, T: Transport> {
    config: &'a ApiConfig,
    transport: &'a T,
}

impl<'a, T: Transport> ConnectResource<'a, T> {
    pub fn new(config: &'a ApiConfig, transport: &'a T) -> Self {
        Self { config, transport }
    }

    /// URL of the account's configuration collection
    pub fn collection_url(&self, account_id: &str) -> String {
        self.config.api_url(&format!(
            "/accounts/{}/connect",
            urlencoding::encode(account_id)
        ))
    }

    /// URL of a single configuration
    pub fn item_url(&self, account_id: &str, connect_id: &str) -> String {
        format!(
            "{}/{}",
            self.collection_url(account_id),
            urlencoding::encode(connect_id)
        )
    }

    async fn send(&self, method: Method, url: String, body: Option<Params>) -> Result<Value> {
        let mut request = ApiRequest::new(method, url, self.config.headers()?);
        if let Some(body) = body {
            request = request.with_body(Value::Object(body));
        }
        Ok(self.transport.send(request).await?)
    }

    /// List all Connect configurations of an account
    pub async fn list(&self, account_id: &str) -> Result<ConfigurationList> {
        tracing::debug!(account_id, "Listing connect configurations");
        let response = self
            .send(Method::GET, self.collection_url(account_id), None)
            .await?;
        let list = parse_configuration_list(&response)?;
        tracing::debug!(
            account_id,
            total_records = list.total_records,
            "Loaded {} connect configurations",
            list.configurations.len()
        );
        Ok(list)
    }

    /// Fetch one configuration. The API wraps it in a one-element list.
    pub async fn get(&self, account_id: &str, connect_id: &str) -> Result<ConfigurationList> {
        tracing::debug!(account_id, connect_id, "Fetching connect configuration");
        let response = self
            .send(Method::GET, self.item_url(account_id, connect_id), None)
            .await?;
        parse_configuration_list(&response)
    }

    /// Create a configuration. `urlToPublishTo` is required by the server.
    pub async fn create(&self, account_id: &str, params: &Params) -> Result<ConnectConfiguration> {
        let body = prepare_request(params)?;
        tracing::debug!(account_id, "Creating connect configuration");
        let response = self
            .send(Method::POST, self.collection_url(account_id), Some(body))
            .await?;
        let created = to_configuration(&response)?;
        tracing::info!(
            account_id,
            connect_id = ?created.connect_id,
            "Created connect configuration"
        );
        Ok(created)
    }

    /// Update a configuration in place
    ///
    /// The identifier travels in the body; the request goes to the collection URL.
    /// An object response is expanded like any other, anything else is returned as is.
    pub async fn update(
        &self,
        account_id: &str,
        connect_id: &str,
        params: &Params,
    ) -> Result<Value> {
        let mut params = params.clone();
        params.insert(CONNECT_ID.to_string(), id_value(connect_id));
        let body = prepare_request(&params)?;
        tracing::debug!(account_id, connect_id, "Updating connect configuration");
        let response = self
            .send(Method::PUT, self.collection_url(account_id), Some(body))
            .await?;
        match response {
            Value::Object(_) => Ok(Value::Object(expand_response(&response)?)),
            other => Ok(other),
        }
    }

    /// Delete a configuration, returning the transport's result unmodified
    pub async fn delete(&self, account_id: &str, connect_id: &str) -> Result<Value> {
        tracing::debug!(account_id, connect_id, "Deleting connect configuration");
        self.send(Method::DELETE, self.item_url(account_id, connect_id), None)
            .await
    }
}

/// Canonical numeric ids go out as JSON numbers, anything else as the given string.
/// `"007"` or `"+5"` would not print back to the same text, so they stay strings.
fn id_value(connect_id: &str) -> Value {
    connect_id
        .parse::<u64>()
        .ok()
        .filter(|n| n.to_string() == connect_id)
        .map(Value::from)
        .unwrap_or_else(|| Value::String(connect_id.to_string()))
}

fn to_configuration(value: &Value) -> Result<ConnectConfiguration> {
    let expanded = expand_response(value)?;
    serde_json::from_value(Value::Object(expanded))
        .map_err(|e| ConnectError::MalformedResponse(format!("invalid configuration: {}", e)))
}

fn parse_configuration_list(response: &Value) -> Result<ConfigurationList> {
    let configurations = response
        .get("configurations")
        .ok_or_else(|| ConnectError::MalformedResponse("missing `configurations`".to_string()))?
        .as_array()
        .ok_or_else(|| {
            ConnectError::MalformedResponse("`configurations` is not an array".to_string())
        })?
        .iter()
        .map(to_configuration)
        .collect::<Result<Vec<_>>>()?;

    // totalRecords comes back as a string on some API versions
    let total = response
        .get("totalRecords")
        .ok_or_else(|| ConnectError::MalformedResponse("missing `totalRecords`".to_string()))?;
    let total_records = match total {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        ConnectError::MalformedResponse(format!(
            "`totalRecords` is not a count: {}",
            json_type_name(total)
        ))
    })?;

    Ok(ConfigurationList {
        configurations,
        total_records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docusign::auth::Credentials;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every request and answers with a canned response
    struct RecordingTransport {
        response: Value,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl RecordingTransport {
        fn new(response: Value) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn only_request(&self) -> ApiRequest {
            let requests = self.requests.lock().unwrap();
            assert_eq!(requests.len(), 1, "expected exactly one request");
            requests[0].clone()
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> anyhow::Result<Value> {
            self.requests.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        async fn send(&self, _request: ApiRequest) -> anyhow::Result<Value> {
            Err(anyhow::anyhow!("API request failed: 503 Service Unavailable"))
        }
    }

    fn config() -> ApiConfig {
        ApiConfig::new(Credentials::bearer("token"))
    }

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("test params must be an object"),
        }
    }

    #[tokio::test]
    async fn test_create_sends_plain_fields_and_expands_response() {
        let transport = RecordingTransport::new(json!({
            "connectId": 26858,
            "urlToPublishTo": "http://foo.com",
            "name": "Test Connect",
            "envelopeEvents": ""
        }));
        let config = config();
        let connect = ConnectResource::new(&config, &transport);

        let created = connect
            .create(
                "123",
                &params(json!({"urlToPublishTo": "http://foo.com", "name": "Test Connect"})),
            )
            .await
            .unwrap();

        let request = transport.only_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.url,
            "https://demo.docusign.net/restapi/v2/accounts/123/connect"
        );
        assert_eq!(
            request.body,
            Some(json!({"urlToPublishTo": "http://foo.com", "name": "Test Connect"}))
        );
        assert_eq!(request.headers["authorization"], "Bearer token");

        assert_eq!(created.connect_id, Some(json!(26858)));
        assert!(created.envelope_events.is_empty());
        assert_eq!(created.name.as_deref(), Some("Test Connect"));
    }

    #[tokio::test]
    async fn test_update_injects_id_and_joins_events() {
        let transport = RecordingTransport::new(Value::Null);
        let config = config();
        let connect = ConnectResource::new(&config, &transport);

        let result = connect
            .update(
                "123",
                "26858",
                &params(json!({"envelopeEvents": ["Sent", "Completed"], "enableLog": 1})),
            )
            .await
            .unwrap();

        assert_eq!(result, Value::Null);
        let request = transport.only_request();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(
            request.url,
            "https://demo.docusign.net/restapi/v2/accounts/123/connect"
        );
        assert_eq!(
            request.body,
            Some(json!({
                "connectId": 26858,
                "envelopeEvents": "Sent,Completed",
                "enableLog": true
            }))
        );
    }

    #[tokio::test]
    async fn test_update_expands_object_response() {
        let transport = RecordingTransport::new(json!({"connectId": "7", "userIds": "a,b"}));
        let config = config();
        let connect = ConnectResource::new(&config, &transport);

        let result = connect.update("1", "7", &Params::new()).await.unwrap();
        assert_eq!(result, json!({"connectId": "7", "userIds": ["a", "b"]}));
    }

    #[tokio::test]
    async fn test_get_by_id_expands_single_item() {
        let transport = RecordingTransport::new(json!({
            "configurations": [{
                "connectId": "26858",
                "envelopeEvents": "Sent,Delivered",
                "recipientEvents": "",
                "userIds": "",
                "allUsers": "false"
            }],
            "totalRecords": "1"
        }));
        let config = config();
        let connect = ConnectResource::new(&config, &transport);

        let list = connect.get("123", "26858").await.unwrap();

        let request = transport.only_request();
        assert_eq!(request.method, Method::GET);
        assert!(request.url.ends_with("/accounts/123/connect/26858"));
        assert!(request.body.is_none());

        assert_eq!(list.total_records, 1);
        assert!(list.is_consistent());
        let item = &list.configurations[0];
        assert_eq!(item.envelope_events, vec!["Sent", "Delivered"]);
        assert!(item.recipient_events.is_empty());
        assert_eq!(item.flag("allUsers"), Some(false));
    }

    #[tokio::test]
    async fn test_list_expands_every_item() {
        let transport = RecordingTransport::new(json!({
            "configurations": [
                {"connectId": 1, "userIds": "u1,u2"},
                {"connectId": 2, "envelopeEvents": "Voided"}
            ],
            "totalRecords": 2
        }));
        let config = config();
        let connect = ConnectResource::new(&config, &transport);

        let list = connect.list("123").await.unwrap();
        assert_eq!(list.configurations.len(), 2);
        assert_eq!(list.configurations[0].user_ids, vec!["u1", "u2"]);
        assert_eq!(list.configurations[1].envelope_events, vec!["Voided"]);
        assert!(transport.only_request().url.ends_with("/accounts/123/connect"));
    }

    #[tokio::test]
    async fn test_list_requires_mandatory_fields() {
        let config = config();

        let transport = RecordingTransport::new(json!({"totalRecords": 0}));
        let err = ConnectResource::new(&config, &transport)
            .list("123")
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectError::MalformedResponse(_)));

        let transport = RecordingTransport::new(json!({"configurations": []}));
        let err = ConnectResource::new(&config, &transport)
            .list("123")
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_raw_result() {
        let raw = json!({"status": "deleted", "envelopeEvents": "Sent,Voided"});
        let transport = RecordingTransport::new(raw.clone());
        let config = config();
        let connect = ConnectResource::new(&config, &transport);

        let result = connect.delete("123", "26858").await.unwrap();
        assert_eq!(result, raw);
        let request = transport.only_request();
        assert_eq!(request.method, Method::DELETE);
        assert!(request.url.ends_with("/accounts/123/connect/26858"));
    }

    #[tokio::test]
    async fn test_marshal_error_sends_nothing() {
        let transport = RecordingTransport::new(Value::Null);
        let config = config();
        let connect = ConnectResource::new(&config, &transport);

        let err = connect
            .create("123", &params(json!({"userIds": "a,b"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectError::Marshal { .. }));
        assert_eq!(transport.request_count(), 0);

        let err = connect
            .update("123", "26858", &params(json!({"enableLog": {}})))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectError::Marshal { ref field, .. } if field == "enableLog"));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_surfaces_verbatim() {
        let config = config();
        let connect = ConnectResource::new(&config, &FailingTransport);

        let err = connect.delete("123", "1").await.unwrap_err();
        assert!(matches!(err, ConnectError::Transport(_)));
        assert_eq!(err.to_string(), "API request failed: 503 Service Unavailable");
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let config = config();
        let transport = RecordingTransport::new(Value::Null);
        let connect = ConnectResource::new(&config, &transport);
        assert_eq!(
            connect.item_url("acc/1", "a b"),
            "https://demo.docusign.net/restapi/v2/accounts/acc%2F1/connect/a%20b"
        );
    }

    #[test]
    fn test_id_value() {
        assert_eq!(id_value("26858"), json!(26858));
        assert_eq!(id_value("abc-1"), json!("abc-1"));
        assert_eq!(id_value("007"), json!("007"));
        assert_eq!(id_value("+5"), json!("+5"));
        assert_eq!(id_value("0"), json!(0));
    }

    #[tokio::test]
    async fn test_update_keeps_non_canonical_id_verbatim() {
        let transport = RecordingTransport::new(Value::Null);
        let config = config();
        let connect = ConnectResource::new(&config, &transport);

        connect.update("123", "007", &Params::new()).await.unwrap();

        assert_eq!(transport.only_request().body, Some(json!({"connectId": "007"})));
    }
}

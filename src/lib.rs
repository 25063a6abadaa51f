//! Client binding for the DocuSign Connect REST API
//!
//! Connect configurations are webhook subscriptions: which envelope and
//! recipient events get published to which URL. This crate lists, fetches,
//! creates, updates and deletes them, converting list-valued fields to and from
//! the comma separated strings the API uses and coercing feature flags to strict
//! booleans.
//!
//! ```ignore
//! use docusign_connect::{ApiConfig, Credentials, DocuSignClient, Params};
//! use serde_json::json;
//!
//! async fn example() -> docusign_connect::Result<()> {
//!     let client = DocuSignClient::new(ApiConfig::new(Credentials::from_env()?))?;
//!
//!     let mut params = Params::new();
//!     params.insert("urlToPublishTo".into(), json!("https://example.com/hook"));
//!     params.insert("envelopeEvents".into(), json!(["Sent", "Completed"]));
//!     let created = client.connect().create("12345", &params).await?;
//!     println!("{:?}", created.connect_id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connect;
pub mod docusign;

pub use connect::marshal::Params;
pub use connect::{ConfigurationList, ConnectConfiguration, ConnectResource};
pub use docusign::auth::Credentials;
pub use docusign::client::{ApiConfig, DocuSignClient};
pub use docusign::error::{ConnectError, Result};
pub use docusign::http::{ApiRequest, HttpTransport, Transport};

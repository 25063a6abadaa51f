//! DocuSign API interaction module
//!
//! This module provides the pieces shared by every DocuSign resource group:
//! credentials, API configuration, the HTTP transport and the error type.
//!
//! # Module Structure
//!
//! - [`auth`] - Credentials and authorization headers
//! - [`client`] - API configuration, URL building and the enclosing client
//! - [`error`] - Error taxonomy
//! - [`http`] - Transport trait and the reqwest implementation
//!
//! # Example
//!
//! ```ignore
//! use docusign_connect::{ApiConfig, Credentials, DocuSignClient};
//!
//! async fn example() -> docusign_connect::Result<()> {
//!     let config = ApiConfig::new(Credentials::from_env()?);
//!     let client = DocuSignClient::new(config)?;
//!     let list = client.connect().list("12345").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod http;

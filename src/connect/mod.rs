//! DocuSign Connect (webhook configuration) resource group
//!
//! - [`fields`] - Field names with a special wire encoding
//! - [`marshal`] - Conversions between wire and application representations
//! - [`model`] - Typed configuration records
//! - [`resource`] - The REST operations

pub mod fields;
pub mod marshal;
pub mod model;
pub mod resource;

pub use model::{ConfigurationList, ConnectConfiguration};
pub use resource::ConnectResource;

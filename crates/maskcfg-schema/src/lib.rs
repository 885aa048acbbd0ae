//! Property catalog validation for override documents.
//!
//! The overlay itself never re-checks types: a document is validated here,
//! ahead of time, against a catalog that declares each recognised key's type
//! and constraints. Hosts (and `maskcfg check`) run this step before handing
//! the document to consumers.

mod catalog;
mod error;
mod types;
mod validate;

pub use catalog::{PropertySchema, PropertySpec};
pub use error::SchemaError;
pub use types::PropertyType;
pub use validate::{SchemaReport, Violation};

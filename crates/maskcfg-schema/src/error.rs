//! Error types for catalog loading and validation.

use crate::Violation;
use thiserror::Error;

/// Errors returned while loading a catalog or validating a document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Reading a catalog file failed.
    #[error("failed to read catalog: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing catalog JSON5 failed.
    #[error("failed to parse catalog: {0}")]
    ParseFailed(#[from] json5::Error),
    /// The catalog parsed but does not have the expected shape.
    #[error("failed to decode catalog: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// A property declares a type the grammar does not know.
    #[error("invalid type for {property}: {message}")]
    InvalidType { property: String, message: String },
    /// A property declares a pattern that is not a valid regex.
    #[error("invalid pattern for {property}: {source}")]
    InvalidPattern {
        property: String,
        #[source]
        source: regex::Error,
    },
    /// A passthrough glob failed to compile.
    #[error("invalid passthrough pattern: {0}")]
    InvalidGlob(#[from] globset::Error),
    /// The same property is declared twice.
    #[error("duplicate property in catalog: {0}")]
    DuplicateProperty(String),
    /// The document does not conform to the catalog.
    #[error("{} schema violation(s): {}", .0.len(), summarize(.0))]
    Violations(Vec<Violation>),
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

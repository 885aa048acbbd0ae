//! Error types for override document loading.

use thiserror::Error;

/// Errors returned while loading an override document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a document from disk failed.
    #[error("failed to read document: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing JSON5 contents failed.
    #[error("failed to parse document: {0}")]
    ParseFailed(#[from] json5::Error),
    /// The document parsed but is not a key/value mapping.
    #[error("invalid document {label}: {message}")]
    InvalidDocument { label: String, message: String },
}

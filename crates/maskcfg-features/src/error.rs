//! Error types for feature values supplied by the host at runtime.

use thiserror::Error;

/// Errors returned when a runtime feature update carries an invalid value.
#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    /// A value is outside the range the feature accepts.
    #[error("invalid {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

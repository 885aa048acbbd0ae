//! Document validation against a property catalog.

use crate::{PropertySchema, PropertySpec, SchemaError};
use log::{debug, info};
use maskcfg_config::{Document, value_kind};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A single non-conforming key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted key, with `[idx]` suffixes for array elements.
    pub key: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaReport {
    /// Number of declared properties found in the document.
    pub checked: usize,
    pub violations: Vec<Violation>,
}

impl SchemaReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Convert into a `Result`, failing when any violation was recorded.
    pub fn into_result(self) -> Result<(), SchemaError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Violations(self.violations))
        }
    }

    fn push(&mut self, key: &str, message: impl Into<String>) {
        self.violations.push(Violation {
            key: key.to_string(),
            message: message.into(),
        });
    }
}

impl PropertySchema {
    /// Check every entry of a document and collect all violations.
    ///
    /// Undeclared objects are walked, so `{"navigator": {"userAgent": ..}}`
    /// is checked as `navigator.userAgent`.
    pub fn validate(&self, document: &Document) -> SchemaReport {
        let mut report = SchemaReport::default();
        for (key, value) in document.iter() {
            self.validate_entry(key, value, &mut report);
        }
        info!(
            "document validated (checked={}, violations={})",
            report.checked,
            report.violations.len()
        );
        report
    }

    fn validate_entry(&self, key: &str, value: &Value, report: &mut SchemaReport) {
        if let Some(spec) = self.get(key) {
            report.checked += 1;
            check_value(spec, key, value, report);
            return;
        }
        if self.is_passthrough(key) {
            debug!("accepting undeclared passthrough key: {key}");
            return;
        }
        match value {
            Value::Object(map) if !map.is_empty() => {
                for (sub_key, sub_value) in map {
                    self.validate_entry(&join_path(key, sub_key), sub_value, report);
                }
            }
            _ => report.push(key, "unknown key"),
        }
    }
}

fn check_value(spec: &PropertySpec, key: &str, value: &Value, report: &mut SchemaReport) {
    if !spec.kind.matches(value) {
        report.push(
            key,
            format!("expected {}, found {}", spec.kind, value_kind(value)),
        );
        return;
    }
    match value {
        Value::Array(items) if spec.kind.element().is_some() => {
            for (idx, item) in items.iter().enumerate() {
                check_constraints(spec, &format!("{key}[{idx}]"), item, report);
            }
        }
        _ => check_constraints(spec, key, value, report),
    }
}

fn check_constraints(spec: &PropertySpec, path: &str, value: &Value, report: &mut SchemaReport) {
    if let Some(number) = value.as_f64() {
        if let Some(min) = spec.min.filter(|min| number < *min) {
            report.push(path, format!("{number} is below minimum {min}"));
        }
        if let Some(max) = spec.max.filter(|max| number > *max) {
            report.push(path, format!("{number} is above maximum {max}"));
        }
    }
    if let Some(text) = value.as_str() {
        if let Some(pattern) = spec.pattern.as_ref().filter(|re| !re.is_match(text)) {
            report.push(path, format!("does not match pattern `{}`", pattern.as_str()));
        }
        if !spec.values.is_empty() && !spec.values.iter().any(|allowed| allowed == text) {
            report.push(
                path,
                format!("expected one of [{}]", spec.values.join(", ")),
            );
        }
    }
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

//! Override document model and dotted-key resolution.

use crate::{ConfigError, json5_value};
use serde_json::{Map, Value};

/// A parsed override document: a mapping from keys to typed JSON leaves.
///
/// Keys are resolved verbatim against the top-level entries first, so flat
/// documents such as `{"navigator.userAgent": "..."}` work as written. When
/// no top-level entry matches, a dotted key is walked through nested
/// mappings instead (`{"navigator": {"userAgent": "..."}}`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Map<String, Value>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON object.
    pub fn from_map(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Convert a parsed JSON value into a document, rejecting non-object roots.
    pub fn from_value(value: Value, label: &str) -> Result<Self, ConfigError> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(ConfigError::InvalidDocument {
                label: label.to_string(),
                message: format!("expected object at root, found {}", value_kind(&other)),
            }),
        }
    }

    /// Parse JSON5 (or plain JSON) contents into a document.
    ///
    /// Non-finite numbers are kept as the strings `"Infinity"`,
    /// `"-Infinity"` and `"NaN"`.
    pub fn parse(contents: &str, label: &str) -> Result<Self, ConfigError> {
        let value = json5_value::parse(contents)?;
        Self::from_value(value, label)
    }

    /// Resolve a key to its raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.entries.get(key) {
            return Some(value);
        }
        if !key.contains('.') {
            return None;
        }
        let mut segments = key.split('.');
        let mut current = self.entries.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Whether the key resolves to any value, including `null`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Top-level entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Consume the document, returning it as a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}

/// Short type name for a JSON value, used in diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "double",
        Value::Number(number) if number.is_u64() => "uint",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Property catalog: the declared type and constraints of every known key.

use crate::{PropertyType, SchemaError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, info};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One catalog entry as written on disk.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyEntry {
    property: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    values: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WrappedCatalog {
    properties: Vec<PropertyEntry>,
    #[serde(default)]
    passthrough: Vec<String>,
}

/// Catalogs are either a bare list of entries or an object with extras.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Listed(Vec<PropertyEntry>),
    Wrapped(WrappedCatalog),
}

/// Declared type and constraints for a single key.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    pub property: String,
    pub kind: PropertyType,
    /// Inclusive lower bound for numbers (or numeric array elements).
    pub min: Option<f64>,
    /// Inclusive upper bound for numbers (or numeric array elements).
    pub max: Option<f64>,
    /// Pattern string values must match.
    pub pattern: Option<Regex>,
    /// Allowed string values; empty means unrestricted.
    pub values: Vec<String>,
}

impl PropertySpec {
    pub fn new(property: impl Into<String>, kind: PropertyType) -> Self {
        Self {
            property: property.into(),
            kind,
            min: None,
            max: None,
            pattern: None,
            values: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, SchemaError> {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            property: self.property.clone(),
            source,
        })?;
        self.pattern = Some(regex);
        Ok(self)
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    fn from_entry(entry: PropertyEntry) -> Result<Self, SchemaError> {
        let kind = entry
            .type_name
            .parse()
            .map_err(|message| SchemaError::InvalidType {
                property: entry.property.clone(),
                message,
            })?;
        let spec = Self::new(entry.property, kind)
            .with_bounds(entry.min, entry.max)
            .with_values(entry.values);
        match entry.pattern {
            Some(pattern) => spec.with_pattern(&pattern),
            None => Ok(spec),
        }
    }
}

/// The full set of recognised keys.
#[derive(Debug, Clone)]
pub struct PropertySchema {
    properties: Vec<PropertySpec>,
    index: HashMap<String, usize>,
    passthrough_patterns: Vec<String>,
    passthrough: GlobSet,
}

impl Default for PropertySchema {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertySchema {
    /// An empty catalog; every key is unknown.
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            index: HashMap::new(),
            passthrough_patterns: Vec::new(),
            passthrough: GlobSet::empty(),
        }
    }

    /// Parse a JSON5 catalog.
    pub fn load_from_str(contents: &str) -> Result<Self, SchemaError> {
        let value: Value = json5::from_str(contents)?;
        let file: CatalogFile = serde_json::from_value(value)?;
        let (entries, passthrough) = match file {
            CatalogFile::Listed(entries) => (entries, Vec::new()),
            CatalogFile::Wrapped(catalog) => (catalog.properties, catalog.passthrough),
        };

        let mut schema = Self::new();
        for entry in entries {
            schema = schema.with_property(PropertySpec::from_entry(entry)?)?;
        }
        let schema = schema.with_passthrough(passthrough)?;
        debug!(
            "catalog parsed (properties={}, passthrough={})",
            schema.len(),
            schema.passthrough_patterns.len()
        );
        Ok(schema)
    }

    /// Read and parse a catalog from disk.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        info!("loading catalog from path: {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Add a property, rejecting duplicates.
    pub fn with_property(mut self, spec: PropertySpec) -> Result<Self, SchemaError> {
        if self.index.contains_key(&spec.property) {
            return Err(SchemaError::DuplicateProperty(spec.property));
        }
        self.index.insert(spec.property.clone(), self.properties.len());
        self.properties.push(spec);
        Ok(self)
    }

    /// Add glob patterns for keys that are accepted without a declaration.
    pub fn with_passthrough<I, S>(mut self, patterns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.passthrough_patterns
            .extend(patterns.into_iter().map(Into::into));
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.passthrough_patterns {
            builder.add(Glob::new(pattern)?);
        }
        self.passthrough = builder.build()?;
        Ok(self)
    }

    pub fn get(&self, property: &str) -> Option<&PropertySpec> {
        self.index.get(property).map(|idx| &self.properties[*idx])
    }

    /// Declared properties in catalog order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertySpec> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub(crate) fn is_passthrough(&self, key: &str) -> bool {
        self.passthrough.is_match(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_list_catalog_parses() {
        let schema = PropertySchema::load_from_str(
            r#"[
                { "property": "navigator.userAgent", "type": "str" },
                { "property": "navigator.hardwareConcurrency", "type": "uint" }
            ]"#,
        )
        .expect("schema");
        assert_eq!(schema.len(), 2);
        assert_eq!(
            schema.get("navigator.hardwareConcurrency").map(|s| &s.kind),
            Some(&PropertyType::Uint)
        );
    }

    #[test]
    fn wrapped_catalog_parses_constraints() {
        let schema = PropertySchema::load_from_str(
            r#"{
                properties: [
                    { property: "battery:level", type: "double", min: 0, max: 1 },
                    { property: "locale:language", type: "str", pattern: "^[a-z]{2,3}$" },
                ],
                passthrough: ["debug:*"],
            }"#,
        )
        .expect("schema");
        let level = schema.get("battery:level").expect("level");
        assert_eq!((level.min, level.max), (Some(0.0), Some(1.0)));
        assert!(schema.get("locale:language").expect("lang").pattern.is_some());
        assert!(schema.is_passthrough("debug:trace"));
        assert!(!schema.is_passthrough("navigator.userAgent"));
    }

    #[test]
    fn rejects_unknown_type_names() {
        let err = PropertySchema::load_from_str(r#"[{ property: "a", type: "string" }]"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidType { .. }));
    }

    #[test]
    fn rejects_bad_patterns_and_duplicates() {
        let err = PropertySchema::load_from_str(
            r#"[{ property: "a", type: "str", pattern: "(unclosed" }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));

        let err = PropertySchema::load_from_str(
            r#"[{ property: "a", type: "str" }, { property: "a", type: "int" }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateProperty(name) if name == "a"));
    }

    #[test]
    fn rejects_bad_passthrough_globs() {
        let err = PropertySchema::load_from_str(
            r#"{ properties: [{ property: "a", type: "str" }], passthrough: ["a["] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidGlob(_)));
        assert!(format!("{err}").contains("invalid passthrough pattern"));
    }
}

//! Typed accessors over a loaded override document.
//!
//! Every accessor answers "no override" with `None` (or an empty list) when
//! the key is absent, when the stored value has a different type, or when the
//! document failed to load. Call sites are expected to fall back to their
//! built-in defaults in that case, so no accessor ever returns an error.


use crate::loader::{DEFAULT_ENV_VAR, env};
use crate::{ConfigError, Document};
use log::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// How the overlay's document was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// A document was loaded and is being served.
    Loaded,
    /// No source was configured; there are no overrides.
    Unconfigured,
    /// The source could not be loaded; there are no overrides.
    Failed(String),
}

/// Read-only store of typed override values.
///
/// Built once before any reader exists and never mutated afterwards, so it can
/// be shared across threads by reference or `Arc` without locking.
#[derive(Debug, Clone)]
pub struct MaskConfig {
    document: Document,
    status: LoadStatus,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self::empty()
    }
}

impl MaskConfig {
    /// An overlay with no overrides.
    pub fn empty() -> Self {
        Self {
            document: Document::new(),
            status: LoadStatus::Unconfigured,
        }
    }

    /// Serve an already parsed document.
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            status: LoadStatus::Loaded,
        }
    }

    pub(crate) fn with_status(document: Document, status: LoadStatus) -> Self {
        Self { document, status }
    }

    /// Parse JSON5 contents, failing on malformed input.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading overrides from raw contents (len={})", contents.len());
        let document = Document::parse(contents, "inline")?;
        Ok(Self::from_document(document))
    }

    /// Read and parse a document from disk, failing on I/O or parse errors.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading overrides from path: {}", path.display());
        let contents = fs::read_to_string(path)?;
        let document = Document::parse(&contents, &path.display().to_string())?;
        Ok(Self::from_document(document))
    }

    /// Parse JSON5 contents; on failure, log once and serve no overrides.
    pub fn from_str_lenient(contents: &str) -> Self {
        Self::load_from_str(contents).unwrap_or_else(Self::failed)
    }

    /// Read a document from disk; on failure, log once and serve no overrides.
    pub fn from_path_lenient(path: impl AsRef<Path>) -> Self {
        Self::load_from_path(path).unwrap_or_else(Self::failed)
    }

    /// Load from the default `MASK_CONFIG` environment variable (or its
    /// `MASK_CONFIG_1`, `MASK_CONFIG_2`, ... chunks).
    pub fn from_env() -> Self {
        Self::from_env_with(DEFAULT_ENV_VAR, |name| std::env::var(name).ok())
    }

    /// Load from an environment variable using a custom lookup function.
    pub fn from_env_with<F>(var: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(contents) = env::read_env_document(var, &lookup) else {
            debug!("no override document in environment (var={var})");
            return Self::empty();
        };
        match Document::parse(&contents, var) {
            Ok(document) => {
                info!(
                    "loaded overrides from environment (var={var}, keys={})",
                    document.len()
                );
                Self::from_document(document)
            }
            Err(err) => Self::failed(err),
        }
    }

    fn failed(err: ConfigError) -> Self {
        warn!("override document failed to load; continuing without overrides: {err}");
        Self::with_status(Document::new(), LoadStatus::Failed(err.to_string()))
    }

    /// How this overlay was constructed.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Read-only handle to the underlying document, for structured parsers.
    pub fn raw(&self) -> &Document {
        &self.document
    }

    /// Whether any value (of any type) is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.document.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Borrow a string override.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.document.get(key)?.as_str()
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_str(key).map(str::to_string)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.document.get(key)?.as_bool()
    }

    /// Integer override that fits in `i32`. Floating-point leaves never match.
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        let value = self.document.get(key)?.as_i64()?;
        i32::try_from(value).ok()
    }

    /// Non-negative integer override that fits in `u32`.
    pub fn get_u32(&self, key: &str) -> Option<u32> {
        let value = self.document.get(key)?.as_u64()?;
        u32::try_from(value).ok()
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.document.get(key)?.as_u64()
    }

    /// Numeric override as `f64`; integer leaves are widened.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.document.get(key)?.as_f64()
    }

    /// Ordered list of strings, or an empty list when the key is absent or
    /// is not an array made only of strings.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.document.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Four `u32` overrides that are only meaningful together. A partially
    /// configured rectangle is treated as not configured.
    pub fn get_rect(
        &self,
        left: &str,
        top: &str,
        width: &str,
        height: &str,
    ) -> Option<(u32, u32, u32, u32)> {
        Some((
            self.get_u32(left)?,
            self.get_u32(top)?,
            self.get_u32(width)?,
            self.get_u32(height)?,
        ))
    }

    /// Signed variant of [`MaskConfig::get_rect`].
    pub fn get_i32_rect(
        &self,
        left: &str,
        top: &str,
        width: &str,
        height: &str,
    ) -> Option<(i32, i32, i32, i32)> {
        Some((
            self.get_i32(left)?,
            self.get_i32(top)?,
            self.get_i32(width)?,
            self.get_i32(height)?,
        ))
    }
}

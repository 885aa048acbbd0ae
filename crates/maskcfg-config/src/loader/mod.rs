//! Layered override loading with pinned keys.
//!
//! Collects override documents from files, inline text and environment
//! variables, merges them in precedence order and produces a single
//! `MaskConfig`. Values in the pinned layer cannot be overridden by any
//! later layer.

pub(crate) mod env;
mod layer_io;
mod merge;

#[cfg(test)]
mod tests;

use crate::{ConfigError, Document, LoadStatus, MaskConfig};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

pub use env::split_env_document;

/// Environment variable holding an override document.
pub const DEFAULT_ENV_VAR: &str = "MASK_CONFIG";
/// Default document filename in the user layer.
const DEFAULT_CONFIG_FILE: &str = "mask.json5";
/// Default directory under the user's home for the user layer.
const DEFAULT_CONFIG_DIR: &str = ".maskcfg";

/// Effective overlay plus metadata about which layers were considered.
#[derive(Debug, Clone)]
pub struct LayeredMaskConfig {
    /// The merged overlay.
    pub config: MaskConfig,
    /// Metadata for each layer considered during load, in merge order.
    pub layers: Vec<ConfigLayer>,
}

/// Origin class of a layer. Declaration order is precedence order (low to high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigLayerSource {
    /// Values that no later layer may override.
    Pinned,
    /// Generated or shipped defaults.
    Base,
    /// User-specific overrides.
    User,
    /// Overrides passed through the process environment.
    Environment,
    /// Explicit runtime overrides (highest precedence).
    Runtime,
}

impl ConfigLayerSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pinned => "pinned",
            Self::Base => "base",
            Self::User => "user",
            Self::Environment => "environment",
            Self::Runtime => "runtime",
        }
    }
}

impl fmt::Display for ConfigLayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Where a layer's document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerInput {
    /// A file on disk. Missing files are skipped except for runtime layers.
    Path(PathBuf),
    /// A file on disk that must exist regardless of the layer source.
    RequiredPath(PathBuf),
    /// Document text supplied by the host.
    Inline { label: String, contents: String },
    /// An environment variable, optionally split into numbered chunks.
    Env(String),
}

impl LayerInput {
    /// Human-readable origin used in logs and layer metadata.
    pub fn origin(&self) -> String {
        match self {
            Self::Path(path) | Self::RequiredPath(path) => path.display().to_string(),
            Self::Inline { label, .. } => label.clone(),
            Self::Env(var) => format!("${var}"),
        }
    }
}

/// Metadata about a layer, including why it was disabled when it failed.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigLayer {
    /// Layer origin class.
    pub source: ConfigLayerSource,
    /// File path, inline label or environment variable name.
    pub origin: String,
    /// Number of top-level keys the layer contributed.
    pub keys: usize,
    /// Reason the layer was skipped in lenient mode.
    pub disabled_reason: Option<String>,
}

/// Options controlling which layers are loaded and how failures are handled.
#[derive(Debug, Clone, Default)]
pub struct LayeredOverlayOptions {
    /// Layers in insertion order; merged by source precedence, then insertion.
    pub layers: Vec<(ConfigLayerSource, LayerInput)>,
    /// Abort on the first failing layer instead of disabling it.
    pub strict: bool,
}

impl LayeredOverlayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer of the given source class.
    pub fn with_layer(mut self, source: ConfigLayerSource, input: LayerInput) -> Self {
        self.layers.push((source, input));
        self
    }

    /// Add a pinned layer read from disk.
    pub fn with_pinned_path(self, path: impl AsRef<Path>) -> Self {
        self.with_layer(
            ConfigLayerSource::Pinned,
            LayerInput::Path(path.as_ref().to_path_buf()),
        )
    }

    /// Add a base layer read from disk.
    pub fn with_base_path(self, path: impl AsRef<Path>) -> Self {
        self.with_layer(
            ConfigLayerSource::Base,
            LayerInput::Path(path.as_ref().to_path_buf()),
        )
    }

    /// Add a user layer read from disk.
    pub fn with_user_path(self, path: impl AsRef<Path>) -> Self {
        self.with_layer(
            ConfigLayerSource::User,
            LayerInput::Path(path.as_ref().to_path_buf()),
        )
    }

    /// Add a layer read from a file that must exist, such as one named
    /// explicitly by the user.
    pub fn with_required_path(
        self,
        source: ConfigLayerSource,
        path: impl AsRef<Path>,
    ) -> Self {
        self.with_layer(
            source,
            LayerInput::RequiredPath(path.as_ref().to_path_buf()),
        )
    }

    /// Add the user layer at `~/.maskcfg/mask.json5` when a home directory exists.
    pub fn with_default_user_path(self) -> Self {
        match layer_io::default_user_config_path() {
            Some(path) => self.with_user_path(path),
            None => {
                debug!("no home directory; skipping default user layer");
                self
            }
        }
    }

    /// Add an environment layer read from `var` (or its numbered chunks).
    pub fn with_env(self, var: impl Into<String>) -> Self {
        self.with_layer(ConfigLayerSource::Environment, LayerInput::Env(var.into()))
    }

    /// Add a runtime layer read from disk; the file must exist.
    pub fn with_runtime_path(self, path: impl AsRef<Path>) -> Self {
        self.with_layer(
            ConfigLayerSource::Runtime,
            LayerInput::Path(path.as_ref().to_path_buf()),
        )
    }

    /// Add an inline document.
    pub fn with_inline(
        self,
        source: ConfigLayerSource,
        label: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        self.with_layer(
            source,
            LayerInput::Inline {
                label: label.into(),
                contents: contents.into(),
            },
        )
    }

    /// Toggle strict mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Internal representation of a loaded layer.
#[derive(Debug, Clone)]
struct LoadedLayer {
    meta: ConfigLayer,
    value: Value,
}

impl MaskConfig {
    /// Load a layered overlay, reading environment layers from the process
    /// environment.
    pub fn load_layered(options: LayeredOverlayOptions) -> Result<LayeredMaskConfig, ConfigError> {
        Self::load_layered_with_env(options, |name| std::env::var(name).ok())
    }

    /// Load a layered overlay with a custom environment lookup.
    ///
    /// Layer precedence (low -> high): pinned, base, user, environment,
    /// runtime. Pinned values survive every later layer.
    pub fn load_layered_with_env<F>(
        options: LayeredOverlayOptions,
        lookup: F,
    ) -> Result<LayeredMaskConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ordered = options.layers;
        ordered.sort_by_key(|(source, _)| *source);

        let mut layers = Vec::new();
        let mut merge_layers = Vec::new();
        let mut pinned: Option<Value> = None;
        let mut first_failure = None;

        for (source, input) in &ordered {
            match layer_io::load_layer(*source, input, &lookup) {
                Ok(Some(layer)) => {
                    debug!(
                        "loaded layer (source={}, origin={}, keys={})",
                        source, layer.meta.origin, layer.meta.keys
                    );
                    layers.push(layer.meta.clone());
                    if *source == ConfigLayerSource::Pinned {
                        let slot = pinned.get_or_insert_with(|| Value::Object(Default::default()));
                        merge::merge_json_values(slot, &layer.value);
                    } else {
                        merge_layers.push(layer);
                    }
                }
                Ok(None) => {}
                Err(err) if options.strict => return Err(err),
                Err(err) => {
                    let origin = input.origin();
                    warn!("layer disabled (source={source}, origin={origin}, reason={err})");
                    first_failure.get_or_insert_with(|| err.to_string());
                    layers.push(ConfigLayer {
                        source: *source,
                        origin,
                        keys: 0,
                        disabled_reason: Some(err.to_string()),
                    });
                }
            }
        }

        let loaded = layers
            .iter()
            .filter(|layer| layer.disabled_reason.is_none())
            .count();
        if loaded == 0 {
            let config = match first_failure {
                Some(reason) => MaskConfig::with_status(Document::new(), LoadStatus::Failed(reason)),
                None => MaskConfig::empty(),
            };
            info!("no override layers loaded (considered={})", layers.len());
            return Ok(LayeredMaskConfig { config, layers });
        }

        let mut merged = pinned
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()));
        for layer in &merge_layers {
            merge::merge_json_with_pins(&mut merged, &layer.value, pinned.as_ref());
        }

        let document = Document::from_value(merged, "effective")?;
        info!(
            "layered overrides loaded (layers={loaded}, keys={})",
            document.len()
        );
        Ok(LayeredMaskConfig {
            config: MaskConfig::from_document(document),
            layers,
        })
    }
}

//! Implementations behind the `maskcfg` subcommands.

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::debug;
use maskcfg_config::{ConfigLayer, ConfigLayerSource, LayeredOverlayOptions, MaskConfig};
use maskcfg_features::FeatureSet;
use maskcfg_schema::{PropertySchema, SchemaReport};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Accessor used by `maskcfg get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupKind {
    String,
    Bool,
    I32,
    U32,
    U64,
    F64,
    List,
}

/// Assemble layer options from CLI flags. `--config` files are user layers
/// applied in the order given; each named file must exist.
pub fn layer_options(
    configs: &[PathBuf],
    pin: Option<&Path>,
    env_var: Option<&str>,
    strict: bool,
) -> LayeredOverlayOptions {
    let mut options = LayeredOverlayOptions::new().strict(strict);
    if let Some(pin) = pin {
        options = options.with_pinned_path(pin);
    }
    for config in configs {
        options = options.with_required_path(ConfigLayerSource::User, config);
    }
    if let Some(var) = env_var {
        options = options.with_env(var);
    }
    options
}

/// Validate the effective document against a catalog file.
pub fn check(config: &MaskConfig, catalog: &Path) -> Result<SchemaReport> {
    let schema = PropertySchema::load_from_path(catalog)
        .with_context(|| format!("failed to load catalog {}", catalog.display()))?;
    debug!("validating against {} declared properties", schema.len());
    Ok(schema.validate(config.raw()))
}

/// Render a typed lookup, or `None` when there is no override.
pub fn lookup(config: &MaskConfig, key: &str, kind: LookupKind) -> Option<String> {
    match kind {
        LookupKind::String => config.get_string(key),
        LookupKind::Bool => config.get_bool(key).map(|value| value.to_string()),
        LookupKind::I32 => config.get_i32(key).map(|value| value.to_string()),
        LookupKind::U32 => config.get_u32(key).map(|value| value.to_string()),
        LookupKind::U64 => config.get_u64(key).map(|value| value.to_string()),
        LookupKind::F64 => config.get_f64(key).map(|value| value.to_string()),
        LookupKind::List => Some(Value::from(config.get_list(key)).to_string()),
    }
}

/// Pretty-printed JSON of every configured structured feature.
pub fn features_json(config: &MaskConfig) -> Result<String> {
    let features = FeatureSet::collect(config);
    serde_json::to_string_pretty(&features).context("failed to encode features")
}

/// One line per layer: source, origin, key count or disabled reason.
pub fn render_layers(layers: &[ConfigLayer]) -> String {
    layers
        .iter()
        .map(|layer| match &layer.disabled_reason {
            Some(reason) => format!("{:<12} {} (disabled: {reason})\n", layer.source, layer.origin),
            None => format!("{:<12} {} ({} keys)\n", layer.source, layer.origin, layer.keys),
        })
        .collect()
}

/// Layers that failed to load, formatted for error output.
pub fn disabled_layers(layers: &[ConfigLayer]) -> Vec<String> {
    layers
        .iter()
        .filter_map(|layer| {
            layer
                .disabled_reason
                .as_ref()
                .map(|reason| format!("{}: {reason}", layer.origin))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskcfg_test_utils::overlay_from;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_renders_each_kind() {
        let config = overlay_from(
            r#"{ "s": "Win32", "b": false, "n": -2, "u": 8, "f": 0.5, "l": ["en", "fi"] }"#,
        );
        assert_eq!(lookup(&config, "s", LookupKind::String), Some("Win32".to_string()));
        assert_eq!(lookup(&config, "b", LookupKind::Bool), Some("false".to_string()));
        assert_eq!(lookup(&config, "n", LookupKind::I32), Some("-2".to_string()));
        assert_eq!(lookup(&config, "n", LookupKind::U32), None);
        assert_eq!(lookup(&config, "u", LookupKind::U64), Some("8".to_string()));
        assert_eq!(lookup(&config, "f", LookupKind::F64), Some("0.5".to_string()));
        assert_eq!(
            lookup(&config, "l", LookupKind::List),
            Some(r#"["en","fi"]"#.to_string())
        );
        assert_eq!(lookup(&config, "missing", LookupKind::List), Some("[]".to_string()));
    }

    #[test]
    fn renders_disabled_layers() {
        let layers = vec![
            ConfigLayer {
                source: ConfigLayerSource::User,
                origin: "a.json5".to_string(),
                keys: 3,
                disabled_reason: None,
            },
            ConfigLayer {
                source: ConfigLayerSource::Runtime,
                origin: "b.json5".to_string(),
                keys: 0,
                disabled_reason: Some("bad".to_string()),
            },
        ];
        let rendered = render_layers(&layers);
        assert!(rendered.contains("a.json5 (3 keys)"));
        assert!(rendered.contains("b.json5 (disabled: bad)"));
        assert_eq!(disabled_layers(&layers), vec!["b.json5: bad".to_string()]);
    }
}

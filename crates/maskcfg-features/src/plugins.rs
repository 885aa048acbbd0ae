//! `navigator.plugins` override.
//!
//! The key holds an array of plugin records. Each record's `mimeTypes` entries
//! are either a bare MIME type string or an object with `type`, `description`
//! and `suffixes`. Malformed plugins and malformed MIME types are skipped; the
//! remaining entries are kept in document order.

use log::warn;
use maskcfg_config::MaskConfig;
use serde::Serialize;
use serde_json::{Map, Value};

pub const PLUGINS_KEY: &str = "navigator.plugins";

/// A MIME type exposed by a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MimeType {
    #[serde(rename = "type")]
    pub mime_type: String,
    pub description: String,
    pub suffixes: String,
}

/// A single spoofed plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub name: String,
    pub description: String,
    pub filename: String,
    pub mime_types: Vec<MimeType>,
}

impl Plugin {
    /// Number of MIME types, as reported by `plugin.length`.
    pub fn len(&self) -> usize {
        self.mime_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mime_types.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&MimeType> {
        self.mime_types.get(index)
    }

    pub fn named_item(&self, mime_type: &str) -> Option<&MimeType> {
        self.mime_types.iter().find(|mt| mt.mime_type == mime_type)
    }
}

/// Ordered plugin list. An empty list is a valid override meaning "no plugins".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PluginList {
    plugins: Vec<Plugin>,
}

impl PluginList {
    pub fn new(plugins: Vec<Plugin>) -> Self {
        Self { plugins }
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&Plugin> {
        self.plugins.get(index)
    }

    /// First plugin with the given name.
    pub fn named_item(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|plugin| plugin.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.iter()
    }

    /// Resolve a MIME type across all plugins, returning it with the plugin
    /// that provides it (`mimeType.enabledPlugin`). The first plugin wins.
    pub fn mime_type(&self, mime_type: &str) -> Option<(&Plugin, &MimeType)> {
        self.plugins
            .iter()
            .find_map(|plugin| plugin.named_item(mime_type).map(|mt| (plugin, mt)))
    }
}

/// Parse the plugin override, or `None` when it is absent or not an array.
pub fn parse_plugins(config: &MaskConfig) -> Option<PluginList> {
    let value = config.raw().get(PLUGINS_KEY)?;
    let Value::Array(entries) = value else {
        warn!("{PLUGINS_KEY} is not an array; ignoring override");
        return None;
    };
    let plugins = entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| parse_plugin(entry, idx))
        .collect();
    Some(PluginList::new(plugins))
}

fn parse_plugin(entry: &Value, idx: usize) -> Option<Plugin> {
    let Some(record) = entry.as_object() else {
        warn!("skipping {PLUGINS_KEY}[{idx}]: expected object");
        return None;
    };
    let Some(name) = record.get("name").and_then(Value::as_str) else {
        warn!("skipping {PLUGINS_KEY}[{idx}]: missing name");
        return None;
    };
    let mime_types = match record.get("mimeTypes") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(mt_idx, item)| parse_mime_type(item, idx, mt_idx))
            .collect(),
        Some(_) => {
            warn!("{PLUGINS_KEY}[{idx}].mimeTypes is not an array; treating as empty");
            Vec::new()
        }
    };
    Some(Plugin {
        name: name.to_string(),
        description: string_field(record, "description"),
        filename: string_field(record, "filename"),
        mime_types,
    })
}

fn parse_mime_type(item: &Value, idx: usize, mt_idx: usize) -> Option<MimeType> {
    match item {
        Value::String(mime_type) => Some(MimeType {
            mime_type: mime_type.clone(),
            description: String::new(),
            suffixes: String::new(),
        }),
        Value::Object(record) => match record.get("type").and_then(Value::as_str) {
            Some(mime_type) => Some(MimeType {
                mime_type: mime_type.to_string(),
                description: string_field(record, "description"),
                suffixes: string_field(record, "suffixes"),
            }),
            None => {
                warn!("skipping {PLUGINS_KEY}[{idx}].mimeTypes[{mt_idx}]: missing type");
                None
            }
        },
        _ => {
            warn!("skipping {PLUGINS_KEY}[{idx}].mimeTypes[{mt_idx}]: expected string or object");
            None
        }
    }
}

fn string_field(record: &Map<String, Value>, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

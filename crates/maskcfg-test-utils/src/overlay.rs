//! Overlay construction helpers.

use maskcfg_config::MaskConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Build an overlay from JSON5 text, panicking on malformed fixtures.
pub fn overlay_from(json5: &str) -> MaskConfig {
    MaskConfig::load_from_str(json5).expect("fixture document")
}

/// Write a layer file under `dir`, creating parent directories if needed.
pub fn write_layer(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("layer dir");
    }
    fs::write(&path, contents).expect("write layer");
    path
}

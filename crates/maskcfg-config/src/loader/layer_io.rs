//! IO helpers for reading override layers.

use super::{
    ConfigLayer, ConfigLayerSource, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE, LayerInput,
    LoadedLayer, env, merge,
};
use crate::{ConfigError, Document};
use directories::UserDirs;
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Load one layer. `Ok(None)` means the layer is simply not present.
pub(super) fn load_layer<F>(
    source: ConfigLayerSource,
    input: &LayerInput,
    lookup: &F,
) -> Result<Option<LoadedLayer>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let origin = input.origin();
    let contents = match input {
        LayerInput::Path(path) => {
            if source != ConfigLayerSource::Runtime && !path.exists() {
                debug!("optional layer missing (source={source}, path={origin})");
                return Ok(None);
            }
            fs::read_to_string(path)?
        }
        LayerInput::RequiredPath(path) => fs::read_to_string(path)?,
        LayerInput::Inline { contents, .. } => contents.clone(),
        LayerInput::Env(var) => match env::read_env_document(var, lookup) {
            Some(contents) => contents,
            None => {
                debug!("environment layer not set (source={source}, var={var})");
                return Ok(None);
            }
        },
    };

    let document = Document::parse(&contents, &layer_label(source, &origin))?;
    Ok(Some(LoadedLayer {
        meta: ConfigLayer {
            source,
            origin,
            keys: document.len(),
            disabled_reason: None,
        },
        value: merge::expand_dotted_keys(document.into_value()),
    }))
}

/// Build a user-friendly label for document errors.
pub(super) fn layer_label(source: ConfigLayerSource, origin: &str) -> String {
    format!("{source}({origin})")
}

/// Default user layer path under the home directory.
pub(super) fn default_user_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE)
    })
}

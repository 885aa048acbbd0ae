//! Tests for layered override loading.

use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn later_sources_take_precedence() {
    let temp = TempDir::new().expect("tmp");
    let base = temp.path().join("base.json5");
    write_json5(&base, r#"{ "navigator.platform": "Linux x86_64", "timezone": "UTC" }"#);
    let user = temp.path().join("user.json5");
    write_json5(&user, r#"{ "navigator.platform": "Win32" }"#);
    let runtime = temp.path().join("runtime.json5");
    write_json5(&runtime, r#"{ "timezone": "Europe/Helsinki" }"#);

    // Added out of order on purpose; precedence comes from the source class.
    let options = LayeredOverlayOptions::new()
        .with_runtime_path(&runtime)
        .with_user_path(&user)
        .with_base_path(&base);
    let layered = MaskConfig::load_layered_with_env(options, no_env).expect("layered");

    let sources: Vec<ConfigLayerSource> = layered.layers.iter().map(|l| l.source).collect();
    assert_eq!(
        sources,
        vec![
            ConfigLayerSource::Base,
            ConfigLayerSource::User,
            ConfigLayerSource::Runtime
        ]
    );
    assert_eq!(
        layered.config.get_string("navigator.platform"),
        Some("Win32".to_string())
    );
    assert_eq!(
        layered.config.get_string("timezone"),
        Some("Europe/Helsinki".to_string())
    );
}

#[test]
fn pinned_values_cannot_be_overridden() {
    let options = LayeredOverlayOptions::new()
        .with_inline(
            ConfigLayerSource::Pinned,
            "pins",
            r#"{ "navigator.webdriver": false }"#,
        )
        .with_inline(
            ConfigLayerSource::Runtime,
            "runtime",
            r#"{ "navigator.webdriver": true, "navigator.hardwareConcurrency": 8 }"#,
        );
    let layered = MaskConfig::load_layered_with_env(options, no_env).expect("layered");
    assert_eq!(layered.config.get_bool("navigator.webdriver"), Some(false));
    assert_eq!(
        layered.config.get_u32("navigator.hardwareConcurrency"),
        Some(8)
    );
}

#[test]
fn missing_optional_file_is_skipped() {
    let temp = TempDir::new().expect("tmp");
    let options = LayeredOverlayOptions::new()
        .with_base_path(temp.path().join("absent.json5"))
        .with_inline(ConfigLayerSource::User, "user", r#"{ "a": 1 }"#)
        .strict(true);
    let layered = MaskConfig::load_layered_with_env(options, no_env).expect("layered");
    assert_eq!(layered.layers.len(), 1);
    assert_eq!(layered.config.get_u32("a"), Some(1));
}

#[test]
fn missing_runtime_file_fails_in_strict_mode() {
    let temp = TempDir::new().expect("tmp");
    let options = LayeredOverlayOptions::new()
        .with_runtime_path(temp.path().join("absent.json5"))
        .strict(true);
    let err = MaskConfig::load_layered_with_env(options, no_env).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}

#[test]
fn malformed_layer_is_disabled_in_lenient_mode() {
    let options = LayeredOverlayOptions::new()
        .with_inline(ConfigLayerSource::Base, "base", r#"{ "a": "kept" }"#)
        .with_inline(ConfigLayerSource::User, "broken", r#"{ "a": "lost", "#);
    let layered = MaskConfig::load_layered_with_env(options, no_env).expect("layered");

    assert_eq!(layered.config.status(), &LoadStatus::Loaded);
    assert_eq!(layered.config.get_string("a"), Some("kept".to_string()));
    let broken = &layered.layers[1];
    assert_eq!(broken.origin, "broken");
    assert!(broken.disabled_reason.is_some());
}

#[test]
fn malformed_layer_aborts_in_strict_mode() {
    let options = LayeredOverlayOptions::new()
        .with_inline(ConfigLayerSource::User, "broken", "[1, 2]")
        .strict(true);
    let err = MaskConfig::load_layered_with_env(options, no_env).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("user(broken)"));
}

#[test]
fn all_layers_failing_reports_failed_status() {
    let options =
        LayeredOverlayOptions::new().with_inline(ConfigLayerSource::Base, "bad", "{ nope");
    let layered = MaskConfig::load_layered_with_env(options, no_env).expect("layered");
    assert!(matches!(layered.config.status(), LoadStatus::Failed(_)));
    assert!(layered.config.is_empty());
}

#[test]
fn no_layers_is_unconfigured() {
    let layered =
        MaskConfig::load_layered_with_env(LayeredOverlayOptions::new(), no_env).expect("layered");
    assert_eq!(layered.config.status(), &LoadStatus::Unconfigured);
    assert!(layered.layers.is_empty());
}

#[test]
fn environment_layer_sits_between_user_and_runtime() {
    let vars = HashMap::from([(
        "MASK_CONFIG".to_string(),
        r#"{ "locale:language": "fi", "locale:region": "FI" }"#.to_string(),
    )]);
    let options = LayeredOverlayOptions::new()
        .with_inline(
            ConfigLayerSource::User,
            "user",
            r#"{ "locale:language": "en", "locale:region": "US" }"#,
        )
        .with_env(DEFAULT_ENV_VAR)
        .with_inline(
            ConfigLayerSource::Runtime,
            "runtime",
            r#"{ "locale:region": "AX" }"#,
        );
    let layered =
        MaskConfig::load_layered_with_env(options, |name| vars.get(name).cloned()).expect("layered");
    assert_eq!(
        layered.config.get_string("locale:language"),
        Some("fi".to_string())
    );
    assert_eq!(
        layered.config.get_string("locale:region"),
        Some("AX".to_string())
    );
    assert_eq!(layered.layers[1].origin, "$MASK_CONFIG");
}

#[test]
fn nested_runtime_value_beats_flat_base_value() {
    let options = LayeredOverlayOptions::new()
        .with_inline(
            ConfigLayerSource::Base,
            "base",
            r#"{ "navigator.platform": "Linux", "navigator.userAgent": "UA" }"#,
        )
        .with_inline(
            ConfigLayerSource::Runtime,
            "runtime",
            r#"{ navigator: { platform: "Win32" } }"#,
        );
    let layered = MaskConfig::load_layered_with_env(options, no_env).expect("layered");
    assert_eq!(
        layered.config.get_string("navigator.platform"),
        Some("Win32".to_string())
    );
    assert_eq!(
        layered.config.get_string("navigator.userAgent"),
        Some("UA".to_string())
    );
}

#[test]
fn nested_pin_holds_against_flat_override() {
    let options = LayeredOverlayOptions::new()
        .with_inline(
            ConfigLayerSource::Pinned,
            "pins",
            r#"{ navigator: { webdriver: false } }"#,
        )
        .with_inline(
            ConfigLayerSource::Runtime,
            "runtime",
            r#"{ "navigator.webdriver": true, "navigator.platform": "Win32" }"#,
        );
    let layered = MaskConfig::load_layered_with_env(options, no_env).expect("layered");
    assert_eq!(layered.config.get_bool("navigator.webdriver"), Some(false));
    assert_eq!(
        layered.config.get_string("navigator.platform"),
        Some("Win32".to_string())
    );
}

#[test]
fn flat_pin_holds_against_nested_override() {
    let options = LayeredOverlayOptions::new()
        .with_inline(
            ConfigLayerSource::Pinned,
            "pins",
            r#"{ "navigator.webdriver": false }"#,
        )
        .with_inline(
            ConfigLayerSource::User,
            "user",
            r#"{ navigator: { webdriver: true } }"#,
        );
    let layered = MaskConfig::load_layered_with_env(options, no_env).expect("layered");
    assert_eq!(layered.config.get_bool("navigator.webdriver"), Some(false));
}

#[test]
fn missing_required_file_fails_for_any_source() {
    let temp = TempDir::new().expect("tmp");
    let missing = temp.path().join("typo.json5");
    let options = LayeredOverlayOptions::new()
        .with_required_path(ConfigLayerSource::User, &missing)
        .strict(true);
    let err = MaskConfig::load_layered_with_env(options, no_env).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));

    let options =
        LayeredOverlayOptions::new().with_required_path(ConfigLayerSource::User, &missing);
    let layered = MaskConfig::load_layered_with_env(options, no_env).expect("layered");
    assert!(matches!(layered.config.status(), LoadStatus::Failed(_)));
    assert_eq!(layered.layers[0].origin, missing.display().to_string());
    assert!(layered.layers[0].disabled_reason.is_some());
}

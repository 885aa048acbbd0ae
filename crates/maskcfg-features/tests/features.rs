//! Structured feature parsing through the public API.

use maskcfg_config::MaskConfig;
use maskcfg_features::plugins::parse_plugins;
use maskcfg_features::{ConnectionType, FeatureSet, ScreenArea};
use maskcfg_test_utils::{FINGERPRINT_DOCUMENT, PLUGINS_DOCUMENT, overlay_from};
use pretty_assertions::assert_eq;

/// Custom plugins keep document order and both mime type spellings.
#[test]
fn parses_custom_plugins() {
    let plugins = parse_plugins(&overlay_from(PLUGINS_DOCUMENT)).expect("plugins");
    assert_eq!(plugins.len(), 2);

    let widevine = plugins.item(0).expect("widevine");
    assert_eq!(widevine.name, "Widevine Content Decryption Module");
    assert_eq!(widevine.filename, "widevinecdm.dll");
    assert_eq!(widevine.len(), 2);
    assert_eq!(
        widevine.item(0).map(|mt| mt.mime_type.as_str()),
        Some("application/x-ppapi-widevine-cdm")
    );
    assert_eq!(widevine.item(0).map(|mt| mt.description.as_str()), Some(""));

    let pdf = plugins.item(1).expect("pdf");
    assert_eq!(pdf.description, "Portable Document Format");
    assert_eq!(pdf.item(0).map(|mt| mt.suffixes.as_str()), Some("pdf"));
}

#[test]
fn plugin_lookup_by_index_and_name_agree() {
    let config = overlay_from(
        r#"{ "navigator.plugins": [{
            "name": "Test Plugin", "description": "Test Description", "filename": "test.so",
            "mimeTypes": [{ "type": "application/test", "description": "Test Type", "suffixes": "test" }]
        }] }"#,
    );
    let plugins = parse_plugins(&config).expect("plugins");
    assert_eq!(plugins.item(0), plugins.named_item("Test Plugin"));
    assert!(plugins.named_item("NonExistent").is_none());

    let (owner, mime) = plugins.mime_type("application/test").expect("mime type");
    assert_eq!(owner.name, "Test Plugin");
    assert_eq!(mime.description, "Test Type");
}

#[test]
fn malformed_plugins_and_mime_types_are_skipped() {
    let config = overlay_from(
        r#"{ "navigator.plugins": [
            "not a plugin",
            { "description": "nameless" },
            { "name": "Kept", "mimeTypes": [42, { "description": "no type" }, "text/plain"] },
            { "name": "Odd mime list", "mimeTypes": "text/plain" },
        ] }"#,
    );
    let plugins = parse_plugins(&config).expect("plugins");
    let names: Vec<&str> = plugins.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Kept", "Odd mime list"]);
    assert_eq!(plugins.item(0).map(|p| p.len()), Some(1));
    assert_eq!(plugins.item(1).map(|p| p.is_empty()), Some(true));
}

/// An empty array means "no plugins", which differs from "not configured".
#[test]
fn empty_plugin_array_is_an_override() {
    let configured = parse_plugins(&overlay_from(r#"{ "navigator.plugins": [] }"#));
    assert_eq!(configured.map(|p| p.len()), Some(0));

    assert_eq!(parse_plugins(&overlay_from("{}")), None);
    assert_eq!(
        parse_plugins(&overlay_from(r#"{ "navigator.plugins": {} }"#)),
        None
    );
}

#[test]
fn collects_every_feature_from_fingerprint() {
    let features = FeatureSet::collect(&overlay_from(FINGERPRINT_DOCUMENT));
    assert!(features.plugins.is_none());
    assert_eq!(
        features.screen,
        Some(ScreenArea {
            left: 0,
            top: 0,
            width: 1920,
            height: 1040
        })
    );
    assert_eq!(features.battery.and_then(|b| b.level), Some(0.67));
    assert_eq!(
        features.network.and_then(|n| n.connection_type),
        Some(ConnectionType::Wifi)
    );
    assert_eq!(
        features.locale.as_ref().map(|l| l.tag()),
        Some("fi-FI".to_string())
    );
    assert!(features.geolocation.is_some());
}

#[test]
fn failed_document_yields_no_features() {
    let config = MaskConfig::from_str_lenient("{ broken");
    assert!(FeatureSet::collect(&config).is_empty());
}

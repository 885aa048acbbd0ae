//! Canned documents and catalogs.

/// A representative flat override document covering every structured feature.
pub const FINGERPRINT_DOCUMENT: &str = r#"{
    "navigator.userAgent": "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:144.0) Gecko/20100101 Firefox/144.0",
    "navigator.platform": "Win32",
    "navigator.hardwareConcurrency": 8,
    "navigator.languages": ["fi-FI", "fi", "en-US"],
    "timezone": "Europe/Helsinki",
    "locale:language": "fi",
    "locale:region": "FI",
    "geolocation:latitude": 60.1699,
    "geolocation:longitude": 24.9384,
    "geolocation:accuracy": 30,
    "screen.availLeft": 0,
    "screen.availTop": 0,
    "screen.availWidth": 1920,
    "screen.availHeight": 1040,
    "battery": true,
    "battery:charging": true,
    "battery:chargingTime": 1,
    "battery:dischargingTime": 1,
    "battery:level": 0.67,
    "net-info-api": true,
    "net-info-api:type": "wifi",
    "net-info-api:effectiveType": "4g",
    "net-info-api:downlink": 10.0,
    "net-info-api:downlinkMax": "Infinity",
    "net-info-api:rtt": 50.0,
    "net-info-api:saveData": false,
}"#;

/// Plugin list mixing string and object mime type entries.
pub const PLUGINS_DOCUMENT: &str = r#"{
    "navigator.plugins": [
        {
            "name": "Widevine Content Decryption Module",
            "description": "Provides DRM video playback support.",
            "filename": "widevinecdm.dll",
            "mimeTypes": [
                "application/x-ppapi-widevine-cdm",
                {
                    "type": "application/x-google-chrome-pdf",
                    "description": "Portable Document Format",
                    "suffixes": "pdf",
                },
            ],
        },
        {
            "name": "Chrome PDF Plugin",
            "description": "Portable Document Format",
            "filename": "internal-pdf-viewer",
            "mimeTypes": [
                {
                    "type": "application/pdf",
                    "description": "Portable Document Format",
                    "suffixes": "pdf",
                },
            ],
        },
    ],
}"#;

/// Catalog declaring every key in [`FINGERPRINT_DOCUMENT`] and [`PLUGINS_DOCUMENT`].
pub const CATALOG: &str = r#"{
    properties: [
        { property: "navigator.userAgent", type: "str" },
        { property: "navigator.platform", type: "str" },
        { property: "navigator.hardwareConcurrency", type: "uint", min: 1, max: 256 },
        { property: "navigator.languages", type: "array<str>", pattern: "^[a-z]{2,3}(-[A-Z]{2})?$" },
        { property: "navigator.plugins", type: "array<dict>" },
        { property: "timezone", type: "str" },
        { property: "locale:language", type: "str", pattern: "^[a-z]{2,3}$" },
        { property: "locale:region", type: "str", pattern: "^[A-Z]{2}$" },
        { property: "locale:script", type: "str" },
        { property: "geolocation:latitude", type: "double", min: -90, max: 90 },
        { property: "geolocation:longitude", type: "double", min: -180, max: 180 },
        { property: "geolocation:accuracy", type: "double", min: 0 },
        { property: "screen.availLeft", type: "uint" },
        { property: "screen.availTop", type: "uint" },
        { property: "screen.availWidth", type: "uint" },
        { property: "screen.availHeight", type: "uint" },
        { property: "battery", type: "bool" },
        { property: "battery:charging", type: "bool" },
        { property: "battery:chargingTime", type: "double", min: 0 },
        { property: "battery:dischargingTime", type: "double", min: 0 },
        { property: "battery:level", type: "double", min: 0, max: 1 },
        { property: "net-info-api", type: "bool" },
        { property: "net-info-api:type", type: "str",
          values: ["cellular", "bluetooth", "ethernet", "wifi", "other", "none", "unknown"] },
        { property: "net-info-api:effectiveType", type: "str", values: ["slow-2g", "2g", "3g", "4g"] },
        { property: "net-info-api:downlink", type: "double", min: 0 },
        { property: "net-info-api:downlinkMax", type: "double|str" },
        { property: "net-info-api:rtt", type: "double", min: 0 },
        { property: "net-info-api:saveData", type: "bool" },
    ],
    passthrough: ["debug:*"],
}"#;

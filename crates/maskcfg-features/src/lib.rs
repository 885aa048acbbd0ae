//! Structured fingerprint features built on the raw override document.
//!
//! Each feature has its own small parser rather than a generic deserializer,
//! and each decides for itself what to do with malformed entries. Every
//! parser returns `None` when its feature is not configured so the caller can
//! keep the browser's built-in behaviour.

pub mod battery;
mod error;
pub mod geolocation;
pub mod locale;
pub mod netinfo;
pub mod plugins;
pub mod screen;

pub use battery::{BatteryController, BatteryOverride, BatteryPatch, FieldUpdate};
pub use error::FeatureError;
pub use geolocation::Geolocation;
pub use locale::Locale;
pub use netinfo::{ConnectionType, EffectiveType, NetworkInformation};
pub use plugins::{MimeType, Plugin, PluginList};
pub use screen::ScreenArea;

use maskcfg_config::MaskConfig;
use serde::Serialize;

/// Every structured feature configured in one overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<PluginList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatteryOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<Geolocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenArea>,
}

impl FeatureSet {
    /// Run every feature parser against the overlay.
    pub fn collect(config: &MaskConfig) -> Self {
        Self {
            plugins: plugins::parse_plugins(config),
            battery: BatteryOverride::from_config(config),
            network: NetworkInformation::from_config(config),
            geolocation: Geolocation::from_config(config),
            locale: Locale::from_config(config),
            screen: screen::available_area(config),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

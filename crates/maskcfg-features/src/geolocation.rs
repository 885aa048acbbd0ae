//! Geolocation API override.

use log::warn;
use maskcfg_config::MaskConfig;
use serde::Serialize;

pub const LATITUDE_KEY: &str = "geolocation:latitude";
pub const LONGITUDE_KEY: &str = "geolocation:longitude";
pub const ACCURACY_KEY: &str = "geolocation:accuracy";

/// Spoofed position. Latitude and longitude only make sense together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl Geolocation {
    /// Read the position; `None` unless both coordinates are set and in range.
    pub fn from_config(config: &MaskConfig) -> Option<Self> {
        let latitude = config.get_f64(LATITUDE_KEY);
        let longitude = config.get_f64(LONGITUDE_KEY);
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => (latitude, longitude),
            (None, None) => return None,
            _ => {
                warn!("ignoring geolocation: latitude and longitude must both be set");
                return None;
            }
        };
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            warn!("ignoring geolocation: ({latitude}, {longitude}) is out of range");
            return None;
        }
        let accuracy = config
            .get_f64(ACCURACY_KEY)
            .filter(|accuracy| *accuracy >= 0.0);
        Some(Self {
            latitude,
            longitude,
            accuracy,
        })
    }
}

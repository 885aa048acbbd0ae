//! Network Information API (`navigator.connection`) overrides.

use log::warn;
use maskcfg_config::MaskConfig;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

pub const NET_INFO_KEY: &str = "net-info-api";
pub const TYPE_KEY: &str = "net-info-api:type";
pub const EFFECTIVE_TYPE_KEY: &str = "net-info-api:effectiveType";
pub const DOWNLINK_KEY: &str = "net-info-api:downlink";
pub const DOWNLINK_MAX_KEY: &str = "net-info-api:downlinkMax";
pub const RTT_KEY: &str = "net-info-api:rtt";
pub const SAVE_DATA_KEY: &str = "net-info-api:saveData";

/// `NetworkInformation.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Cellular,
    Bluetooth,
    Ethernet,
    Wifi,
    Other,
    None,
    Unknown,
}

impl FromStr for ConnectionType {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "cellular" => Ok(Self::Cellular),
            "bluetooth" => Ok(Self::Bluetooth),
            "ethernet" => Ok(Self::Ethernet),
            "wifi" => Ok(Self::Wifi),
            "other" => Ok(Self::Other),
            "none" => Ok(Self::None),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown connection type `{other}`")),
        }
    }
}

/// `NetworkInformation.effectiveType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectiveType {
    #[serde(rename = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    TwoG,
    #[serde(rename = "3g")]
    ThreeG,
    #[serde(rename = "4g")]
    FourG,
}

impl FromStr for EffectiveType {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "slow-2g" => Ok(Self::Slow2g),
            "2g" => Ok(Self::TwoG),
            "3g" => Ok(Self::ThreeG),
            "4g" => Ok(Self::FourG),
            other => Err(format!("unknown effective type `{other}`")),
        }
    }
}

/// Spoofed connection properties. `None` fields keep the browser default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInformation {
    /// `false` hides `navigator.connection` entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<ConnectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_type: Option<EffectiveType>,
    /// Mbps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downlink: Option<f64>,
    /// Mbps; may be infinite.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_downlink_max"
    )]
    pub downlink_max: Option<f64>,
    /// Milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_data: Option<bool>,
}

impl NetworkInformation {
    /// Read network overrides; `None` when no `net-info-api*` key is usable.
    ///
    /// Unknown enumerated values and negative numbers are dropped field by field.
    pub fn from_config(config: &MaskConfig) -> Option<Self> {
        let parsed = Self {
            enabled: config.get_bool(NET_INFO_KEY),
            connection_type: parse_enum(config, TYPE_KEY),
            effective_type: parse_enum(config, EFFECTIVE_TYPE_KEY),
            downlink: non_negative(config, DOWNLINK_KEY),
            downlink_max: downlink_max(config),
            rtt: non_negative(config, RTT_KEY),
            save_data: config.get_bool(SAVE_DATA_KEY),
        };
        (parsed != Self::default()).then_some(parsed)
    }

    /// Whether `navigator.connection` should be exposed at all.
    pub fn is_api_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

fn parse_enum<T>(config: &MaskConfig, key: &str) -> Option<T>
where
    T: FromStr<Err = String>,
{
    match config.get_str(key)?.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("ignoring {key}: {err}");
            None
        }
    }
}

fn non_negative(config: &MaskConfig, key: &str) -> Option<f64> {
    let value = config.get_f64(key)?;
    if value >= 0.0 {
        Some(value)
    } else {
        warn!("ignoring {key}: {value} is negative");
        None
    }
}

/// JSON cannot carry infinity, so the strings `Infinity` and `inf` stand in.
/// A bare JSON5 `Infinity` is loaded as the string `Infinity`.
fn downlink_max(config: &MaskConfig) -> Option<f64> {
    match config.raw().get(DOWNLINK_MAX_KEY)? {
        Value::String(text) if matches!(text.as_str(), "Infinity" | "inf") => Some(f64::INFINITY),
        Value::Number(_) => non_negative(config, DOWNLINK_MAX_KEY),
        other => {
            warn!("ignoring {DOWNLINK_MAX_KEY}: unexpected value {other}");
            None
        }
    }
}

fn serialize_downlink_max<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(max) if max.is_infinite() => serializer.serialize_str("Infinity"),
        Some(max) => serializer.serialize_f64(*max),
        None => serializer.serialize_none(),
    }
}

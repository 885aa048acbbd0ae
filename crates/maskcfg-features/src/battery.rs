//! Battery Status API overrides.
//!
//! Launch-time values come from the `battery*` keys of the overlay. A host may
//! additionally apply runtime patches; a runtime value wins over the launch
//! value for the same field, clearing a runtime field falls back to the launch
//! value, and an empty patch drops every runtime value at once.

use crate::FeatureError;
use log::{debug, warn};
use maskcfg_config::MaskConfig;
use serde::Serialize;
use serde_json::{Map, Value};

pub const BATTERY_KEY: &str = "battery";
pub const CHARGING_KEY: &str = "battery:charging";
pub const LEVEL_KEY: &str = "battery:level";
pub const CHARGING_TIME_KEY: &str = "battery:chargingTime";
pub const DISCHARGING_TIME_KEY: &str = "battery:dischargingTime";

/// Protocol command carrying a [`BatteryPatch`] payload.
pub const SET_BATTERY_OVERRIDE: &str = "Browser.setBatteryOverride";

/// Battery values to report. `None` fields keep the browser's own value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharging_time: Option<f64>,
}

impl BatteryOverride {
    /// Read launch-time battery overrides; `None` if no battery key is set.
    ///
    /// Out-of-range levels and negative times are dropped.
    pub fn from_config(config: &MaskConfig) -> Option<Self> {
        let parsed = Self {
            enabled: config.get_bool(BATTERY_KEY),
            charging: config.get_bool(CHARGING_KEY),
            level: config
                .get_f64(LEVEL_KEY)
                .and_then(|level| keep_valid(LEVEL_KEY, level, check_level)),
            charging_time: config
                .get_f64(CHARGING_TIME_KEY)
                .and_then(|time| keep_valid(CHARGING_TIME_KEY, time, check_time)),
            discharging_time: config
                .get_f64(DISCHARGING_TIME_KEY)
                .and_then(|time| keep_valid(DISCHARGING_TIME_KEY, time, check_time)),
        };
        (!parsed.is_empty()).then_some(parsed)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Field-wise fallback: values set on `self` win over `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            enabled: self.enabled.or(fallback.enabled),
            charging: self.charging.or(fallback.charging),
            level: self.level.or(fallback.level),
            charging_time: self.charging_time.or(fallback.charging_time),
            discharging_time: self.discharging_time.or(fallback.discharging_time),
        }
    }
}

fn keep_valid(key: &str, value: f64, check: fn(f64) -> Result<f64, String>) -> Option<f64> {
    match check(value) {
        Ok(value) => Some(value),
        Err(message) => {
            warn!("ignoring {key}: {message}");
            None
        }
    }
}

fn check_level(level: f64) -> Result<f64, String> {
    if level.is_finite() && (0.0..=1.0).contains(&level) {
        Ok(level)
    } else {
        Err(format!("{level} is outside [0, 1]"))
    }
}

fn check_time(seconds: f64) -> Result<f64, String> {
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(format!("{seconds} is not a non-negative number of seconds"))
    }
}

/// Tri-state update for one runtime field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum FieldUpdate<T> {
    /// Leave the current runtime value alone.
    #[default]
    Keep,
    /// Drop the runtime value, falling back to the launch value.
    Clear,
    /// Replace the runtime value.
    Set(T),
}

impl<T: Copy> FieldUpdate<T> {
    fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }

    fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value),
        }
    }
}

impl<T: Copy + Into<Value>> FieldUpdate<T> {
    fn write(self, payload: &mut Map<String, Value>, key: &str) {
        match self {
            Self::Keep => {}
            Self::Clear => {
                payload.insert(key.to_string(), Value::Null);
            }
            Self::Set(value) => {
                payload.insert(key.to_string(), value.into());
            }
        }
    }
}

/// Runtime battery update. Fields left at `Keep` are not touched; passing
/// `None` to a setter clears that field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatteryPatch {
    pub enabled: FieldUpdate<bool>,
    pub charging: FieldUpdate<bool>,
    pub level: FieldUpdate<f64>,
    pub charging_time: FieldUpdate<f64>,
    pub discharging_time: FieldUpdate<f64>,
}

impl BatteryPatch {
    /// An empty patch, which resets every runtime override when applied.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: Option<bool>) -> Self {
        self.enabled = FieldUpdate::from_option(enabled);
        self
    }

    pub fn charging(mut self, charging: Option<bool>) -> Self {
        self.charging = FieldUpdate::from_option(charging);
        self
    }

    pub fn level(mut self, level: Option<f64>) -> Result<Self, FeatureError> {
        self.level = FieldUpdate::from_option(validated("level", level, check_level)?);
        Ok(self)
    }

    pub fn charging_time(mut self, seconds: Option<f64>) -> Result<Self, FeatureError> {
        self.charging_time =
            FieldUpdate::from_option(validated("chargingTime", seconds, check_time)?);
        Ok(self)
    }

    pub fn discharging_time(mut self, seconds: Option<f64>) -> Result<Self, FeatureError> {
        self.discharging_time =
            FieldUpdate::from_option(validated("dischargingTime", seconds, check_time)?);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parameters for [`SET_BATTERY_OVERRIDE`]; `None` means the command is
    /// sent without parameters, which clears all runtime overrides.
    pub fn to_payload(&self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        let mut payload = Map::new();
        self.enabled.write(&mut payload, "enabled");
        self.charging.write(&mut payload, "charging");
        self.level.write(&mut payload, "level");
        self.charging_time.write(&mut payload, "chargingTime");
        self.discharging_time.write(&mut payload, "dischargingTime");
        Some(Value::Object(payload))
    }
}

fn validated(
    field: &'static str,
    value: Option<f64>,
    check: fn(f64) -> Result<f64, String>,
) -> Result<Option<f64>, FeatureError> {
    value
        .map(check)
        .transpose()
        .map_err(|message| FeatureError::InvalidValue { field, message })
}

/// Tracks launch-time and runtime battery values for one browser.
#[derive(Debug, Clone, Default)]
pub struct BatteryController {
    launch: BatteryOverride,
    runtime: BatteryOverride,
}

impl BatteryController {
    pub fn new(launch: Option<BatteryOverride>) -> Self {
        Self {
            launch: launch.unwrap_or_default(),
            runtime: BatteryOverride::default(),
        }
    }

    pub fn from_config(config: &MaskConfig) -> Self {
        Self::new(BatteryOverride::from_config(config))
    }

    /// Apply a runtime patch.
    pub fn apply(&mut self, patch: &BatteryPatch) {
        if patch.is_empty() {
            debug!("clearing runtime battery overrides");
            self.runtime = BatteryOverride::default();
            return;
        }
        patch.enabled.apply(&mut self.runtime.enabled);
        patch.charging.apply(&mut self.runtime.charging);
        patch.level.apply(&mut self.runtime.level);
        patch.charging_time.apply(&mut self.runtime.charging_time);
        patch.discharging_time.apply(&mut self.runtime.discharging_time);
    }

    /// Values currently reported: runtime values over launch values.
    pub fn effective(&self) -> BatteryOverride {
        self.runtime.or(self.launch)
    }
}

//! Tolerant loader for persisted snapshots.
//!
//! Stored settings may come from an older build or a hand-edited file.
//! Fields that are missing, of the wrong type, non-finite, or name an
//! unknown enum value fall back to defaults; numbers are clamped.

use serde_json::{Map, Value};

use crate::constants::*;
use crate::enums::Weather;
use crate::error::PersistError;
use crate::locations;
use crate::state::PersistedSnapshot;

/// Parse and sanitize a persisted snapshot.
pub fn load_snapshot(json: &str) -> Result<PersistedSnapshot, PersistError> {
    let value: Value = serde_json::from_str(json)?;
    let obj = value.as_object().ok_or(PersistError::NotAnObject)?;
    Ok(sanitize(obj))
}

/// Serialize a snapshot for storage.
pub fn save_snapshot(snapshot: &PersistedSnapshot) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

fn sanitize(obj: &Map<String, Value>) -> PersistedSnapshot {
    let defaults = PersistedSnapshot::default();

    let location = obj
        .get("location")
        .and_then(Value::as_str)
        .filter(|id| locations::find(id).is_some())
        .map(str::to_string)
        .unwrap_or(defaults.location);

    let weather = obj
        .get("weather")
        .and_then(Value::as_str)
        .and_then(Weather::parse)
        .unwrap_or(defaults.weather);

    PersistedSnapshot {
        location,
        altitude: finite(obj, "altitude")
            .map(|a| a.clamp(MIN_ALTITUDE, MAX_ALTITUDE))
            .unwrap_or(defaults.altitude),
        weather,
        cloud_density: finite(obj, "cloud_density")
            .map(|d| d.clamp(CLOUD_DENSITY_RANGE.0, CLOUD_DENSITY_RANGE.1))
            .unwrap_or(defaults.cloud_density),
        show_clouds: flag(obj, "show_clouds").unwrap_or(defaults.show_clouds),
        autopilot: flag(obj, "autopilot").unwrap_or(defaults.autopilot),
        ambient_drift: flag(obj, "ambient_drift").unwrap_or(defaults.ambient_drift),
        sync_to_clock: flag(obj, "sync_to_clock").unwrap_or(defaults.sync_to_clock),
    }
}

fn finite(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
}

fn flag(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    obj.get(key).and_then(Value::as_bool)
}

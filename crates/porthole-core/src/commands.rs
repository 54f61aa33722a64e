//! User actions sent from the control panel to the window model.
//!
//! Commands are queued and applied at the next tick boundary. Every
//! command also has a direct method on the model.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{InteractionKind, Weather};
use crate::error::{ensure_finite, ValidationError};

/// All possible user actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WindowCommand {
    SetLocation { id: String },
    SetAltitude { feet: f64 },
    SetTime { hours: f64 },
    SetWeather { weather: Weather },
    SetHeading { degrees: f64 },
    FlyTo { id: String },
    /// Let the director pick and fly to a new location now.
    FlyToNext,
    ApplyPatch { patch: StatePatch },
    UserInteraction { kind: InteractionKind },
}

/// Batch of optional setters, as sent by UI sliders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatePatch {
    pub altitude: Option<f64>,
    pub time_of_day: Option<f64>,
    pub weather: Option<Weather>,
    pub heading: Option<f64>,
    pub flight_speed: Option<f64>,
    pub cloud_density: Option<f64>,
    pub cloud_speed: Option<f64>,
    pub haze: Option<f64>,
    pub show_clouds: Option<bool>,
    pub autopilot: Option<bool>,
    pub ambient_drift: Option<bool>,
    pub sync_to_clock: Option<bool>,
}

impl StatePatch {
    /// Reject the whole patch if any numeric field is non-finite, otherwise
    /// return a copy with every numeric field clamped into range.
    pub fn validated(&self) -> Result<StatePatch, ValidationError> {
        let clamp = |field: &'static str,
                     value: Option<f64>,
                     (lo, hi): (f64, f64)|
         -> Result<Option<f64>, ValidationError> {
            value
                .map(|v| ensure_finite(field, v).map(|v| v.clamp(lo, hi)))
                .transpose()
        };

        Ok(StatePatch {
            altitude: clamp("altitude", self.altitude, (MIN_ALTITUDE, MAX_ALTITUDE))?,
            time_of_day: self
                .time_of_day
                .map(|h| ensure_finite("time_of_day", h).map(|h| h.rem_euclid(HOURS_PER_DAY)))
                .transpose()?,
            weather: self.weather,
            heading: self
                .heading
                .map(|d| ensure_finite("heading", d))
                .transpose()?,
            flight_speed: clamp("flight_speed", self.flight_speed, FLIGHT_SPEED_RANGE)?,
            cloud_density: clamp("cloud_density", self.cloud_density, CLOUD_DENSITY_RANGE)?,
            cloud_speed: clamp("cloud_speed", self.cloud_speed, CLOUD_SPEED_RANGE)?,
            haze: clamp("haze", self.haze, HAZE_RANGE)?,
            show_clouds: self.show_clouds,
            autopilot: self.autopilot,
            ambient_drift: self.ambient_drift,
            sync_to_clock: self.sync_to_clock,
        })
    }

    /// Whether the patch touches any cloud/haze/weather control.
    pub fn touches_atmosphere(&self) -> bool {
        self.weather.is_some()
            || self.cloud_density.is_some()
            || self.cloud_speed.is_some()
            || self.haze.is_some()
    }
}

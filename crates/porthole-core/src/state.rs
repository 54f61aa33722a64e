//! Window state: everything the renderers read each frame, plus the
//! small persisted subset.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::locations::DEFAULT_LOCATION;
use crate::types::*;

/// Complete readable state of the window model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub time: SimTime,
    /// Id of the location currently orbited.
    pub location: String,
    pub pose: Pose,
    pub orbit: OrbitPath,
    pub flight: FlightState,
    /// Current speed multiplier along the orbit (includes warp).
    pub flight_speed: f64,
    /// Speed multiplier the user asked for, restored after a cruise.
    pub base_flight_speed: f64,
    /// Window shade; closed only while in transit.
    pub blind_open: bool,
    pub motion: MotionState,
    pub bump: Option<BumpImpulse>,
    /// Local time of day (hours, [0, 24)).
    pub time_of_day: f64,
    pub sync_to_clock: bool,
    pub weather: Weather,
    pub atmosphere: Atmosphere,
    pub lightning: Lightning,
    pub micro_event: Option<MicroEvent>,
    pub timers: AmbientTimers,
    pub autopilot: bool,
    pub ambient_drift: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            time: SimTime::default(),
            location: DEFAULT_LOCATION.to_string(),
            pose: Pose::default(),
            orbit: OrbitPath::default(),
            flight: FlightState::default(),
            flight_speed: DEFAULT_FLIGHT_SPEED,
            base_flight_speed: DEFAULT_FLIGHT_SPEED,
            blind_open: true,
            motion: MotionState::default(),
            bump: None,
            time_of_day: DEFAULT_TIME_OF_DAY,
            sync_to_clock: false,
            weather: Weather::default(),
            atmosphere: Atmosphere::default(),
            lightning: Lightning::default(),
            micro_event: None,
            timers: AmbientTimers::default(),
            autopilot: true,
            ambient_drift: true,
        }
    }
}

impl WindowState {
    pub fn is_transitioning(&self) -> bool {
        self.flight.mode.is_cruising()
    }

    pub fn sky_phase(&self) -> SkyPhase {
        SkyPhase::from_hours(self.time_of_day)
    }

    pub fn turbulence(&self) -> Turbulence {
        self.weather.turbulence()
    }

    /// JSON-safe subset kept across restarts.
    pub fn persisted(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            location: self.location.clone(),
            altitude: self.pose.altitude,
            weather: self.weather,
            cloud_density: self.atmosphere.cloud_density,
            show_clouds: self.atmosphere.show_clouds,
            autopilot: self.autopilot,
            ambient_drift: self.ambient_drift,
            sync_to_clock: self.sync_to_clock,
        }
    }
}

/// Settings stored by the host between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub location: String,
    pub altitude: f64,
    pub weather: Weather,
    pub cloud_density: f64,
    pub show_clouds: bool,
    pub autopilot: bool,
    pub ambient_drift: bool,
    pub sync_to_clock: bool,
}

impl Default for PersistedSnapshot {
    fn default() -> Self {
        WindowState::default().persisted()
    }
}

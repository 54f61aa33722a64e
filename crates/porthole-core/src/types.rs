//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{FlightMode, MicroEventKind};

/// Aircraft pose as seen through the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Latitude (degrees).
    pub lat: f64,
    /// Longitude (degrees).
    pub lon: f64,
    /// Altitude (feet), always within [MIN_ALTITUDE, MAX_ALTITUDE].
    pub altitude: f64,
    /// Heading (degrees, 0 = North, clockwise), always within [0, 360).
    pub heading: f64,
    /// Pitch (degrees, positive = nose up).
    pub pitch: f64,
    /// Bank angle (degrees, positive = right wing down).
    pub bank_angle: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            lat: 0.0,
            lon: 0.0,
            altitude: DEFAULT_ALTITUDE,
            heading: 0.0,
            pitch: 0.0,
            bank_angle: 0.0,
        }
    }
}

/// Closed elliptical flight path in lat/lon degree space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPath {
    pub center_lat: f64,
    pub center_lon: f64,
    /// Semi-major axis (degrees).
    pub radius_major: f64,
    /// Semi-minor axis (degrees).
    pub radius_minor: f64,
    /// Orientation of the major axis (degrees clockwise from North).
    pub bearing: f64,
    /// Ellipse parameter (radians, kept within [0, TAU)).
    pub angle: f64,
}

impl Default for OrbitPath {
    fn default() -> Self {
        Self::around(0.0, 0.0)
    }
}

impl OrbitPath {
    /// Orbit centered on a location with its deterministic bearing and angle 0.
    pub fn around(center_lat: f64, center_lon: f64) -> Self {
        Self {
            center_lat,
            center_lon,
            radius_major: ORBIT_RADIUS_MAJOR,
            radius_minor: ORBIT_RADIUS_MINOR,
            bearing: bearing_for(center_lat, center_lon),
            angle: 0.0,
        }
    }

    /// Unrotated tangent magnitude at `angle`. Small near the turns,
    /// large along the straight legs.
    pub fn local_speed(&self, angle: f64) -> f64 {
        DVec2::new(
            self.radius_major * angle.cos(),
            -self.radius_minor * angle.sin(),
        )
        .length()
    }

    /// Offset from the center at `angle`, as (east, north) degrees of arc.
    pub fn offset_at(&self, angle: f64) -> DVec2 {
        rotate_by_bearing(
            DVec2::new(
                self.radius_major * angle.sin(),
                self.radius_minor * angle.cos(),
            ),
            self.bearing,
        )
    }

    /// Direction of travel at `angle`, as an (east, north) vector.
    pub fn tangent_at(&self, angle: f64) -> DVec2 {
        rotate_by_bearing(
            DVec2::new(
                self.radius_major * angle.cos(),
                -self.radius_minor * angle.sin(),
            ),
            self.bearing,
        )
    }

    /// Latitude/longitude at `angle`, with the longitude stretched by
    /// 1/cos(center latitude).
    pub fn position_at(&self, angle: f64) -> (f64, f64) {
        let offset = self.offset_at(angle);
        let lon_scale = self.center_lat.to_radians().cos().max(0.01);
        (
            self.center_lat + offset.y,
            self.center_lon + offset.x / lon_scale,
        )
    }

    /// Heading of travel at `angle` (degrees, [0, 360)).
    pub fn heading_at(&self, angle: f64) -> f64 {
        let t = self.tangent_at(angle);
        normalize_degrees(t.x.atan2(t.y).to_degrees())
    }
}

/// Rotate an (east, north) vector clockwise by `bearing` degrees.
fn rotate_by_bearing(v: DVec2, bearing: f64) -> DVec2 {
    DVec2::from_angle(-bearing.to_radians()).rotate(v)
}

/// Deterministic orbit orientation for a location (degrees, [0, 360)).
pub fn bearing_for(lat: f64, lon: f64) -> f64 {
    let hash = (lat * 1000.0).abs().floor() * 7.0 + (lon * 1000.0).abs().floor() * 13.0;
    hash.rem_euclid(360.0)
}

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed smallest difference `to - from` in degrees, within (-180, 180].
pub fn heading_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Cruise state machine data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub mode: FlightMode,
    /// Destination location id while cruising.
    pub cruise_target: Option<String>,
    /// Time spent in the current cruise phase (seconds).
    pub cruise_elapsed: f64,
    /// Warp ramp, 0 = normal flight, 1 = full warp.
    pub warp_factor: f64,
    /// Flight speed captured when the cruise began.
    pub pre_warp_speed: f64,
    /// Warp factor at the start of transit, eased out to zero.
    pub transit_start_warp: f64,
}

/// Per-frame motion outputs in screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub engine_vibe_x: f64,
    pub engine_vibe_y: f64,
    pub breathing_offset: f64,
    /// Contribution of the active turbulence bump to `offset_y`.
    pub bump_offset: f64,
    /// Heading rate of change used for banking (degrees/second).
    pub turn_rate: f64,
}

/// A single damped-sinusoid turbulence impulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BumpImpulse {
    /// +1 or -1.
    pub sign: f64,
    pub amplitude: f64,
    pub elapsed: f64,
}

impl BumpImpulse {
    pub fn new(sign: f64, amplitude: f64) -> Self {
        Self {
            sign,
            amplitude,
            elapsed: 0.0,
        }
    }

    /// Envelope magnitude at `t` seconds after onset.
    pub fn envelope_at(&self, t: f64) -> f64 {
        self.amplitude.abs() * (-BUMP_DECAY * t).exp()
    }

    /// Signed displacement at `t` seconds after onset. Zero once the bump
    /// has run its course.
    pub fn value_at(&self, t: f64) -> f64 {
        if !(0.0..BUMP_DURATION_SECS).contains(&t) {
            return 0.0;
        }
        self.sign * self.amplitude * (-BUMP_DECAY * t).exp() * (BUMP_RING_FREQ * t).sin()
    }

    pub fn value(&self) -> f64 {
        self.value_at(self.elapsed)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= BUMP_DURATION_SECS
    }
}

/// Random-interval countdown: accumulate time, fire once past a threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalTimer {
    pub elapsed: f64,
    pub threshold: f64,
}

impl IntervalTimer {
    pub fn new(threshold: f64) -> Self {
        Self {
            elapsed: 0.0,
            threshold,
        }
    }

    /// Accumulate `delta`; returns true once the threshold has been reached.
    pub fn advance(&mut self, delta: f64) -> bool {
        self.elapsed += delta;
        self.is_due()
    }

    pub fn is_due(&self) -> bool {
        self.elapsed >= self.threshold
    }

    /// Start a new countdown toward `threshold`.
    pub fn restart(&mut self, threshold: f64) {
        self.elapsed = 0.0;
        self.threshold = threshold;
    }

    pub fn remaining(&self) -> f64 {
        (self.threshold - self.elapsed).max(0.0)
    }
}

/// Independent scheduler state for every random-interval process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmbientTimers {
    pub lightning: IntervalTimer,
    pub micro_event: IntervalTimer,
    pub bump: IntervalTimer,
    pub drift: IntervalTimer,
    /// Director dwell countdown to the next autonomous cruise.
    pub director: IntervalTimer,
}

/// Lightning flash state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Lightning {
    /// Flash brightness, 0 = dark.
    pub intensity: f64,
    /// Screen position (0..1).
    pub x: f64,
    pub y: f64,
}

/// Active transient overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MicroEvent {
    pub kind: MicroEventKind,
    pub elapsed: f64,
    pub duration: f64,
    /// Screen position (0..1).
    pub x: f64,
    pub y: f64,
}

impl MicroEvent {
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Cloud and haze parameters consumed by the sky renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub cloud_density: f64,
    pub cloud_speed: f64,
    pub haze: f64,
    pub show_clouds: bool,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            cloud_density: DEFAULT_CLOUD_DENSITY,
            cloud_speed: DEFAULT_CLOUD_SPEED,
            haze: DEFAULT_HAZE,
            show_clouds: true,
        }
    }
}

/// Monotonic animation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of accepted ticks.
    pub frame: u64,
    /// Accumulated animation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one accepted frame of `delta` seconds.
    pub fn advance(&mut self, delta: f64) {
        self.frame += 1;
        self.elapsed_secs += delta;
    }
}

/// Whether `delta` is an acceptable frame step.
pub fn is_valid_delta(delta: f64) -> bool {
    delta.is_finite() && delta > 0.0 && delta <= MAX_TICK_DELTA
}

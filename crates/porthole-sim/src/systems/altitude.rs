//! Altitude governor: eases altitude toward the preset for the current
//! location and sky phase at a capped rate.

use porthole_core::constants::*;
use porthole_core::locations;
use porthole_core::state::WindowState;

/// Step altitude toward its target unless the user is holding it.
pub fn run(state: &mut WindowState, delta: f64, user_override: bool) {
    if !user_override {
        if let Some(target) = target_altitude(state) {
            state.pose.altitude = ease_toward(state.pose.altitude, target, delta);
        }
    }
    state.pose.altitude = state.pose.altitude.clamp(MIN_ALTITUDE, MAX_ALTITUDE);
}

/// Preset altitude for the current location at the current time of day.
pub fn target_altitude(state: &WindowState) -> Option<f64> {
    locations::find(&state.location).map(|loc| {
        loc.altitudes
            .for_phase(state.sky_phase())
            .clamp(MIN_ALTITUDE, MAX_ALTITUDE)
    })
}

/// Proportional approach capped at `ALTITUDE_MAX_STEP` feet per nominal frame.
pub fn ease_toward(current: f64, target: f64, delta: f64) -> f64 {
    let diff = target - current;
    if diff == 0.0 {
        return current;
    }
    let step = (diff.abs() * ALTITUDE_EASE_GAIN).min(ALTITUDE_MAX_STEP) * delta * NOMINAL_FRAME_RATE;
    current + diff.signum() * step.min(diff.abs())
}

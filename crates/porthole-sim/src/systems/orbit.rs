//! Orbit tracker.
//!
//! Advances the ellipse parameter so that ground speed stays constant:
//! the angular rate is divided by the local tangent length, so the tight
//! turns at the ends of the major axis are swept quickly and the long legs
//! slowly. The result reads as long straight cruise legs with brief turns.

use std::f64::consts::TAU;

use porthole_core::constants::{DRIFT_RATE, HEADING_WANDER};
use porthole_core::state::WindowState;
use porthole_core::types::normalize_degrees;

/// Floor on the tangent length so a degenerate ellipse cannot blow up the
/// angular rate.
const MIN_LOCAL_SPEED: f64 = 1e-6;

/// Advance the orbit angle by `delta` seconds and update lat/lon/heading.
pub fn run(state: &mut WindowState, delta: f64) {
    let orbit = &mut state.orbit;
    let local_speed = orbit.local_speed(orbit.angle).max(MIN_LOCAL_SPEED);
    let angular_speed = DRIFT_RATE * state.flight_speed / local_speed;
    orbit.angle = (orbit.angle + angular_speed * delta).rem_euclid(TAU);
    place(state);
}

/// Recompute lat/lon/heading from the current orbit angle without moving.
pub fn place(state: &mut WindowState) {
    let angle = state.orbit.angle;
    let (lat, lon) = state.orbit.position_at(angle);
    state.pose.lat = lat;
    state.pose.lon = lon;
    state.pose.heading =
        normalize_degrees(state.orbit.heading_at(angle) + wander(state.time.elapsed_secs));
}

/// Slow superimposed heading drift (degrees).
pub fn wander(t: f64) -> f64 {
    HEADING_WANDER
        .iter()
        .map(|&(omega, amplitude)| amplitude * (omega * t).sin())
        .sum()
}

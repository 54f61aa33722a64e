//! Cruise state machine: the "fly somewhere new" transition.
//!
//! Orbit -> CruiseDeparture -> CruiseTransit -> Orbit. Departure ramps the
//! warp factor up with a smoothstep while the aircraft keeps orbiting;
//! transit closes the blind and eases the warp back out. The location swap
//! itself is done by the engine when `run` reports `Arrived`.

use porthole_core::constants::*;
use porthole_core::enums::FlightMode;
use porthole_core::types::FlightState;

/// Outcome of one cruise update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CruiseStep {
    /// Still inside the current phase (or not cruising at all).
    Holding,
    /// Departure finished this tick; the blind should close.
    EnteredTransit,
    /// Transit finished this tick; swap the location and reopen.
    Arrived,
}

/// Begin a cruise from the current flight speed.
pub fn begin(flight: &mut FlightState, target: &str, current_speed: f64) {
    flight.mode = FlightMode::CruiseDeparture;
    flight.cruise_target = Some(target.to_string());
    flight.cruise_elapsed = 0.0;
    flight.warp_factor = 0.0;
    flight.transit_start_warp = 0.0;
    flight.pre_warp_speed = current_speed;
}

/// Advance the cruise phase timer and warp ramp.
pub fn run(flight: &mut FlightState, delta: f64) -> CruiseStep {
    match flight.mode {
        FlightMode::Orbit => CruiseStep::Holding,
        FlightMode::CruiseDeparture => {
            flight.cruise_elapsed += delta;
            flight.warp_factor = departure_warp(flight.cruise_elapsed);
            if flight.cruise_elapsed > DEPARTURE_SECS {
                flight.mode = FlightMode::CruiseTransit;
                flight.cruise_elapsed = 0.0;
                flight.transit_start_warp = flight.warp_factor;
                CruiseStep::EnteredTransit
            } else {
                CruiseStep::Holding
            }
        }
        FlightMode::CruiseTransit => {
            flight.cruise_elapsed += delta;
            flight.warp_factor = transit_warp(flight.transit_start_warp, flight.cruise_elapsed);
            if flight.cruise_elapsed > TRANSIT_SECS {
                flight.warp_factor = 0.0;
                CruiseStep::Arrived
            } else {
                CruiseStep::Holding
            }
        }
    }
}

/// Return to orbit after arrival. Returns the speed to restore.
pub fn finish(flight: &mut FlightState) -> f64 {
    flight.mode = FlightMode::Orbit;
    flight.cruise_target = None;
    flight.cruise_elapsed = 0.0;
    flight.warp_factor = 0.0;
    flight.transit_start_warp = 0.0;
    flight.pre_warp_speed
}

/// Flight speed implied by the current warp.
pub fn warped_speed(flight: &FlightState) -> f64 {
    flight.pre_warp_speed + flight.warp_factor * WARP_SPEED_BOOST
}

/// Smoothstep ramp 0 -> 1 over `WARP_RAMP_SECS`.
pub fn departure_warp(elapsed: f64) -> f64 {
    let s = (elapsed / WARP_RAMP_SECS).clamp(0.0, 1.0);
    s * s * (3.0 - 2.0 * s)
}

/// Quadratic ease-out from `start` to 0 over `TRANSIT_SECS`.
pub fn transit_warp(start: f64, elapsed: f64) -> f64 {
    let p = (elapsed / TRANSIT_SECS).clamp(0.0, 1.0);
    start * (1.0 - p) * (1.0 - p)
}

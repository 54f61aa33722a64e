//! Director (autopilot): after a random dwell, pick somewhere new to fly.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use porthole_core::constants::DIRECTOR_PREFERENCE_WEIGHT;
use porthole_core::enums::{FlightMode, LocationKind};
use porthole_core::locations::{self, Location};
use porthole_core::state::WindowState;

/// Count down the dwell while orbiting; return a destination when it expires.
pub fn run(
    state: &mut WindowState,
    rng: &mut ChaCha8Rng,
    delta: f64,
    suppressed: bool,
) -> Option<&'static Location> {
    if state.flight.mode != FlightMode::Orbit || !state.autopilot || suppressed {
        return None;
    }
    if !state.timers.director.advance(delta) {
        return None;
    }
    pick_next(&state.location, state.time_of_day, rng)
}

/// Cities during the working day and late evening, nature otherwise.
pub fn preferred_kind(hours: f64) -> LocationKind {
    let h = hours.rem_euclid(24.0);
    if (10.0..16.0).contains(&h) || h >= 19.0 || h < 5.0 {
        LocationKind::City
    } else {
        LocationKind::Nature
    }
}

/// Pick a location other than `current`, weighted toward the kind the time
/// of day prefers.
pub fn pick_next(current: &str, hours: f64, rng: &mut ChaCha8Rng) -> Option<&'static Location> {
    let preferred = preferred_kind(hours);
    let other = match preferred {
        LocationKind::City => LocationKind::Nature,
        LocationKind::Nature => LocationKind::City,
    };
    let candidates = |kind| -> Vec<&'static Location> {
        locations::of_kind(kind).filter(|loc| loc.id != current).collect()
    };
    let favored = candidates(preferred);
    let others = candidates(other);

    let use_others =
        favored.is_empty() || (!others.is_empty() && !rng.gen_bool(DIRECTOR_PREFERENCE_WEIGHT));
    let pool = if use_others { &others } else { &favored };
    pool.choose(rng).copied()
}

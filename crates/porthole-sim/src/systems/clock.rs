//! Local time of day.

use chrono::{DateTime, Timelike, Utc};

use porthole_core::constants::{HOURS_PER_DAY, SECS_PER_HOUR};
use porthole_core::state::WindowState;

/// Let synced time of day follow the animation clock.
pub fn run(state: &mut WindowState, delta: f64) {
    if state.sync_to_clock {
        state.time_of_day = (state.time_of_day + delta / SECS_PER_HOUR).rem_euclid(HOURS_PER_DAY);
    }
}

/// Local hours at a UTC instant for a location with the given UTC offset.
pub fn local_hours(now: DateTime<Utc>, utc_offset: f64) -> f64 {
    let utc_hours = now.hour() as f64
        + now.minute() as f64 / 60.0
        + now.second() as f64 / SECS_PER_HOUR;
    (utc_hours + utc_offset).rem_euclid(HOURS_PER_DAY)
}

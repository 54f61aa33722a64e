//! Slow ambient drift of clouds, haze and weather.

use log::info;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use porthole_core::constants::*;
use porthole_core::enums::Weather;
use porthole_core::events::WindowEvent;
use porthole_core::state::WindowState;

use super::draw;

/// Weather a drift may switch to, with cumulative-roll weights.
const DRIFT_WEATHER: [(Weather, f64); 4] = [
    (Weather::Clear, 0.30),
    (Weather::Cloudy, 0.40),
    (Weather::Rain, 0.15),
    (Weather::Overcast, 0.15),
];

/// Every few minutes nudge the atmosphere. Paused entirely while the user
/// is working the atmosphere controls or drift is switched off.
pub fn run(
    state: &mut WindowState,
    rng: &mut ChaCha8Rng,
    delta: f64,
    suppressed: bool,
    events: &mut Vec<WindowEvent>,
) {
    if suppressed || !state.ambient_drift {
        return;
    }
    if !state.timers.drift.advance(delta) {
        return;
    }

    let atmosphere = &mut state.atmosphere;
    atmosphere.cloud_density = nudge(rng, atmosphere.cloud_density, DRIFT_DENSITY_STEP, DRIFT_DENSITY_RANGE);
    atmosphere.cloud_speed = nudge(rng, atmosphere.cloud_speed, DRIFT_SPEED_STEP, DRIFT_SPEED_RANGE);
    atmosphere.haze = nudge(rng, atmosphere.haze, DRIFT_HAZE_STEP, DRIFT_HAZE_RANGE);

    if rng.gen_bool(DRIFT_WEATHER_PROBABILITY) {
        let from = state.weather;
        let to = pick_weather(rng.gen::<f64>());
        if from != to {
            info!("ambient drift: weather {} -> {}", from.as_str(), to.as_str());
            state.weather = to;
            super::motion::retime_bump(state, from);
            events.push(WindowEvent::WeatherChanged { from, to });
        }
    }

    state.timers.drift.restart(draw(rng, DRIFT_INTERVAL_RANGE));
}

/// Random walk of at most `step`. A value the user left outside the drift
/// range is pulled back toward it one step at a time.
pub fn nudge(rng: &mut ChaCha8Rng, value: f64, step: f64, (lo, hi): (f64, f64)) -> f64 {
    let proposed = (value + draw(rng, (-step, step))).clamp(lo, hi);
    value + (proposed - value).clamp(-step, step)
}

/// Map a uniform roll in [0, 1) onto the drift weather distribution.
pub fn pick_weather(roll: f64) -> Weather {
    let mut acc = 0.0;
    for (weather, weight) in DRIFT_WEATHER {
        acc += weight;
        if roll < acc {
            return weather;
        }
    }
    Weather::Cloudy
}

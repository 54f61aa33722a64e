//! Lightning flashes during storms.

use log::trace;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use porthole_core::constants::*;
use porthole_core::enums::Weather;
use porthole_core::events::WindowEvent;
use porthole_core::state::WindowState;

use super::draw;

/// Decay the current flash and, in a storm, strike again once the previous
/// flash has faded and the interval has elapsed.
pub fn run(
    state: &mut WindowState,
    rng: &mut ChaCha8Rng,
    delta: f64,
    events: &mut Vec<WindowEvent>,
) {
    let lightning = &mut state.lightning;
    lightning.intensity *= (-LIGHTNING_DECAY * delta).exp();
    if lightning.intensity < LIGHTNING_EPSILON {
        lightning.intensity = 0.0;
    }

    if state.weather != Weather::Storm {
        return;
    }

    let due = state.timers.lightning.advance(delta);
    if due && lightning.intensity == 0.0 {
        lightning.intensity = draw(rng, LIGHTNING_INTENSITY_RANGE);
        lightning.x = rng.gen::<f64>();
        lightning.y = rng.gen::<f64>();
        trace!("lightning strike: intensity {:.2}", lightning.intensity);
        events.push(WindowEvent::LightningStrike {
            intensity: lightning.intensity,
            x: lightning.x,
            y: lightning.y,
        });
        state
            .timers
            .lightning
            .restart(draw(rng, LIGHTNING_INTERVAL_RANGE));
    }
}

//! Sub-updaters run by `WindowModel::tick` in a fixed order.
//!
//! Systems are free functions over the window state. They own no state
//! themselves; randomness is passed in from the engine's seeded RNG.

pub mod altitude;
pub mod clock;
pub mod cruise;
pub mod director;
pub mod drift;
pub mod lightning;
pub mod micro_events;
pub mod motion;
pub mod orbit;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Uniform draw from an inclusive-exclusive `(min, max)` range.
pub(crate) fn draw(rng: &mut ChaCha8Rng, (min, max): (f64, f64)) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

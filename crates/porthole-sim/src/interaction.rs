//! Debounce windows for user interaction with the control panel.
//!
//! While a control category was touched within the last
//! `INTERACTION_DEBOUNCE_SECS` of animation time, the automatic process
//! driving the same thing (altitude governor, director, ambient drift)
//! stands down.

use porthole_core::constants::INTERACTION_DEBOUNCE_SECS;
use porthole_core::enums::InteractionKind;

/// Animation time of the last interaction per control category.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interactions {
    altitude: Option<f64>,
    time: Option<f64>,
    atmosphere: Option<f64>,
}

impl Interactions {
    pub fn mark(&mut self, kind: InteractionKind, now: f64) {
        *self.slot_mut(kind) = Some(now);
    }

    pub fn is_active(&self, kind: InteractionKind, now: f64) -> bool {
        self.slot(kind)
            .is_some_and(|at| now - at < INTERACTION_DEBOUNCE_SECS)
    }

    fn slot(&self, kind: InteractionKind) -> Option<f64> {
        match kind {
            InteractionKind::Altitude => self.altitude,
            InteractionKind::Time => self.time,
            InteractionKind::Atmosphere => self.atmosphere,
        }
    }

    fn slot_mut(&mut self, kind: InteractionKind) -> &mut Option<f64> {
        match kind {
            InteractionKind::Altitude => &mut self.altitude,
            InteractionKind::Time => &mut self.time,
            InteractionKind::Atmosphere => &mut self.atmosphere,
        }
    }
}

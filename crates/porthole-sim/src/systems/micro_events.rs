//! Micro-events: shooting stars at night, birds and contrails by day.

use log::trace;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use porthole_core::constants::*;
use porthole_core::enums::{MicroEventKind, SkyPhase};
use porthole_core::events::WindowEvent;
use porthole_core::state::WindowState;
use porthole_core::types::MicroEvent;

use super::draw;

/// Age the active event, or count down to the next one when idle.
pub fn run(
    state: &mut WindowState,
    rng: &mut ChaCha8Rng,
    delta: f64,
    events: &mut Vec<WindowEvent>,
) {
    if let Some(active) = state.micro_event.as_mut() {
        active.elapsed += delta;
        if active.is_finished() {
            events.push(WindowEvent::MicroEventEnded { kind: active.kind });
            state.micro_event = None;
        }
        return;
    }

    if state.timers.micro_event.advance(delta) {
        let event = spawn(rng, state.sky_phase());
        trace!("micro-event {:?} for {:.1}s", event.kind, event.duration);
        events.push(WindowEvent::MicroEventStarted { kind: event.kind });
        state.micro_event = Some(event);
        state
            .timers
            .micro_event
            .restart(draw(rng, MICRO_EVENT_INTERVAL_RANGE));
    }
}

/// Choose a kind for the sky phase and place it on screen.
pub fn spawn(rng: &mut ChaCha8Rng, phase: SkyPhase) -> MicroEvent {
    let kind = if phase == SkyPhase::Night {
        MicroEventKind::ShootingStar
    } else if rng.gen_bool(BIRD_PROBABILITY) {
        MicroEventKind::Bird
    } else {
        MicroEventKind::Contrail
    };

    let (duration_range, y_range) = match kind {
        MicroEventKind::ShootingStar => (SHOOTING_STAR_DURATION, (0.05, 0.35)),
        MicroEventKind::Bird => (BIRD_DURATION, (0.35, 0.7)),
        MicroEventKind::Contrail => (CONTRAIL_DURATION, (0.1, 0.4)),
    };

    MicroEvent {
        kind,
        elapsed: 0.0,
        duration: draw(rng, duration_range),
        x: draw(rng, (0.1, 0.9)),
        y: draw(rng, y_range),
    }
}

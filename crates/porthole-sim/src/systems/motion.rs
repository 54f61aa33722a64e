//! Motion synthesizer.
//!
//! Screen-space offsets are a sum of independent oscillators driven by the
//! animation clock, so the result is reproducible from `time` alone. The
//! only carried state is the active turbulence bump and the smoothed bank
//! angle.

use std::f64::consts::TAU;

use log::trace;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use porthole_core::constants::*;
use porthole_core::enums::Weather;
use porthole_core::events::WindowEvent;
use porthole_core::state::WindowState;
use porthole_core::types::BumpImpulse;

use super::draw;

/// Update all motion outputs for this frame.
pub fn run(
    state: &mut WindowState,
    rng: &mut ChaCha8Rng,
    delta: f64,
    bank_smoothing: f64,
    events: &mut Vec<WindowEvent>,
) {
    let t = state.time.elapsed_secs;
    let scale = turbulence_scale(state.weather, state.pose.altitude);

    update_bump(state, rng, delta, scale, events);
    let bump_offset = state.bump.map_or(0.0, |b| b.value());

    let motion = &mut state.motion;
    motion.offset_y = (sway(t, &SWAY_Y) + chatter(t, &CHATTER_Y_HZ)) * scale + bump_offset;
    motion.offset_x = (sway(t, &SWAY_X) + chatter(t, &CHATTER_X_HZ)) * scale;
    motion.bump_offset = bump_offset;

    let (vibe_x, vibe_y) = engine_vibration(t);
    motion.engine_vibe_x = vibe_x;
    motion.engine_vibe_y = vibe_y;

    let breath = (BREATHING_OMEGA * t).sin();
    motion.breathing_offset = BREATHING_AMPLITUDE * breath;
    state.pose.pitch = BREATHING_PITCH_DEG * breath;

    let target_bank = target_bank(motion.turn_rate);
    state.pose.bank_angle = smooth_toward(state.pose.bank_angle, target_bank, bank_smoothing, delta);
}

/// Turbulence amplitude multiplier. Clear air above `CALM_AIR_ALTITUDE`
/// fades toward calm as the aircraft nears the tropopause.
pub fn turbulence_scale(weather: Weather, altitude: f64) -> f64 {
    let base = weather.turbulence().multiplier();
    if weather == Weather::Clear && altitude > CALM_AIR_ALTITUDE {
        let f = ((altitude - CALM_AIR_ALTITUDE) / (MAX_ALTITUDE - CALM_AIR_ALTITUDE)).clamp(0.0, 1.0);
        base * (1.0 - CALM_AIR_MAX_DAMPING * f)
    } else {
        base
    }
}

/// Bank target from heading rate, clamped to the bank limit.
pub fn target_bank(turn_rate: f64) -> f64 {
    (turn_rate * BANK_GAIN).clamp(-MAX_BANK_DEG, MAX_BANK_DEG)
}

/// Frame-rate independent exponential approach.
pub fn smooth_toward(current: f64, target: f64, rate: f64, delta: f64) -> f64 {
    current + (target - current) * (1.0 - (-rate * delta).exp())
}

/// Engine vibration offsets (x, y), always present.
pub fn engine_vibration(t: f64) -> (f64, f64) {
    (
        ENGINE_VIBE_AMPLITUDE * (TAU * ENGINE_VIBE_X_HZ * t).sin(),
        ENGINE_VIBE_AMPLITUDE * (TAU * ENGINE_VIBE_Y_HZ * t).sin(),
    )
}

fn sway(t: f64, terms: &[(f64, f64)]) -> f64 {
    SWAY_AMPLITUDE
        * terms
            .iter()
            .map(|&(omega, weight)| weight * (omega * t).sin())
            .sum::<f64>()
}

fn chatter(t: f64, freqs_hz: &[f64]) -> f64 {
    CHATTER_AMPLITUDE * freqs_hz.iter().map(|hz| (TAU * hz * t).sin()).sum::<f64>()
}

/// Age the active bump and fire a new one when the bump timer expires.
fn update_bump(
    state: &mut WindowState,
    rng: &mut ChaCha8Rng,
    delta: f64,
    scale: f64,
    events: &mut Vec<WindowEvent>,
) {
    if let Some(bump) = state.bump.as_mut() {
        bump.elapsed += delta;
        if bump.is_finished() {
            state.bump = None;
        }
    }

    if state.timers.bump.advance(delta) {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let amplitude = draw(rng, BUMP_AMPLITUDE_RANGE) * scale;
        trace!("turbulence bump: amplitude {amplitude:.2}");
        state.bump = Some(BumpImpulse::new(sign, amplitude));
        events.push(WindowEvent::TurbulenceBump { amplitude });
        let next = next_bump_interval(rng, state.weather);
        state.timers.bump.restart(next);
    }
}

/// Rescale the pending bump wait after the weather changed from `previous`,
/// so the time left matches the new turbulence level.
pub fn retime_bump(state: &mut WindowState, previous: Weather) {
    let old = previous.turbulence().multiplier();
    let new = state.weather.turbulence().multiplier();
    if old == new {
        return;
    }
    let timer = &mut state.timers.bump;
    timer.threshold = timer.elapsed + timer.remaining() * old / new;
}

/// Draw the wait until the next bump. Rougher air bumps more often.
pub fn next_bump_interval(rng: &mut ChaCha8Rng, weather: Weather) -> f64 {
    draw(rng, BUMP_INTERVAL_RANGE) / weather.turbulence().multiplier()
}

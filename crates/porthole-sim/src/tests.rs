//! Tests for the window model: orbit geometry, cruise transitions, motion,
//! ambient schedulers, governor, director and user actions.

use std::f64::consts::TAU;

use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::rstest;

use porthole_core::commands::{StatePatch, WindowCommand};
use porthole_core::constants::*;
use porthole_core::enums::*;
use porthole_core::events::WindowEvent;
use porthole_core::types::BumpImpulse;

use crate::engine::{ModelConfig, WindowModel};
use crate::systems::{altitude, clock, cruise, director, drift, micro_events, motion};

const DT: f64 = 1.0 / 60.0;

fn quiet_config() -> ModelConfig {
    ModelConfig {
        autopilot: false,
        ambient_drift: false,
        ..Default::default()
    }
}

fn run_for(model: &mut WindowModel, secs: f64) {
    let ticks = (secs / DT).ceil() as usize;
    for _ in 0..ticks {
        model.tick(DT);
    }
}

/// Tick for `secs`, collecting every emitted event.
fn run_collecting(model: &mut WindowModel, secs: f64) -> Vec<WindowEvent> {
    let mut all = Vec::new();
    let ticks = (secs / DT).ceil() as usize;
    for _ in 0..ticks {
        model.tick(DT);
        all.extend(model.take_events());
    }
    all
}

fn state_json(model: &WindowModel) -> String {
    serde_json::to_string(model.state()).unwrap()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = ModelConfig {
        seed: 12345,
        weather: Weather::Storm,
        ..Default::default()
    };
    let mut a = WindowModel::new(config.clone());
    let mut b = WindowModel::new(config);
    a.fly_to("tokyo");
    b.fly_to("tokyo");

    for _ in 0..1200 {
        a.tick(DT);
        b.tick(DT);
        assert_eq!(state_json(&a), state_json(&b), "states diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut a = WindowModel::new(ModelConfig {
        seed: 111,
        ..Default::default()
    });
    let mut b = WindowModel::new(ModelConfig {
        seed: 222,
        ..Default::default()
    });
    let mut diverged = false;
    for _ in 0..1200 {
        a.tick(DT);
        b.tick(DT);
        if state_json(&a) != state_json(&b) {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds should produce different schedules");
}

// ---- Invariants ----

#[test]
fn test_heading_and_altitude_stay_in_range() {
    let mut model = WindowModel::new(ModelConfig {
        seed: 9,
        weather: Weather::Storm,
        ..Default::default()
    });
    model.fly_to("sydney");
    let ticks = (900.0 / DT) as usize;
    for i in 0..ticks {
        if i == 5000 {
            model.set_altitude(99_999.0);
        }
        if i == 9000 {
            model.set_altitude(-10.0);
        }
        model.tick(DT);
        let pose = model.state().pose;
        assert!(
            (0.0..360.0).contains(&pose.heading),
            "heading {} out of range at tick {i}",
            pose.heading
        );
        assert!(
            (MIN_ALTITUDE..=MAX_ALTITUDE).contains(&pose.altitude),
            "altitude {} out of range at tick {i}",
            pose.altitude
        );
        assert!(pose.bank_angle.abs() <= MAX_BANK_DEG + 1e-9);
    }
}

// ---- Orbit tracker ----

#[test]
fn test_orbit_closes() {
    let speed = 5.0;
    let mut model = WindowModel::new(ModelConfig {
        flight_speed: speed,
        ..quiet_config()
    });
    let orbit = model.state().orbit;
    let (start_lat, start_lon) = (model.state().pose.lat, model.state().pose.lon);

    let segments = 200_000;
    let perimeter: f64 = (0..segments)
        .map(|i| {
            let a0 = TAU * i as f64 / segments as f64;
            let a1 = TAU * (i + 1) as f64 / segments as f64;
            (orbit.offset_at(a1) - orbit.offset_at(a0)).length()
        })
        .sum();
    let expected_period = perimeter / (DRIFT_RATE * speed);

    let mut swept = 0.0;
    let mut guard = 0;
    while swept < TAU {
        let before = model.state().orbit.angle;
        model.tick(DT);
        swept += (model.state().orbit.angle - before).rem_euclid(TAU);
        guard += 1;
        assert!(guard < 1_000_000, "orbit never closed");
    }

    let elapsed = model.time().elapsed_secs;
    assert!(
        ((elapsed - expected_period) / expected_period).abs() < 0.01,
        "period {elapsed:.1}s vs expected {expected_period:.1}s"
    );
    let angle = model.state().orbit.angle;
    assert!(angle.min(TAU - angle) < 0.01);
    assert_abs_diff_eq!(model.state().pose.lat, start_lat, epsilon = 1e-3);
    assert_abs_diff_eq!(model.state().pose.lon, start_lon, epsilon = 1e-3);
}

#[test]
fn test_ground_speed_near_invariant() {
    let mut model = WindowModel::new(quiet_config());
    let center_lat = model.state().orbit.center_lat;
    let lon_scale = center_lat.to_radians().cos();

    let mut speeds = Vec::new();
    let mut swept = 0.0;
    while swept < TAU {
        let before = model.state().pose;
        let angle_before = model.state().orbit.angle;
        model.tick(DT);
        let after = model.state().pose;
        swept += (model.state().orbit.angle - angle_before).rem_euclid(TAU);
        let d_north = after.lat - before.lat;
        let d_east = (after.lon - before.lon) * lon_scale;
        speeds.push((d_north * d_north + d_east * d_east).sqrt() / DT);
    }

    let min = speeds.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = speeds.iter().cloned().fold(0.0, f64::max);
    assert!(min > 0.0);
    assert!(max / min <= 1.2, "ground speed varies {min:e}..{max:e}");
    assert_abs_diff_eq!(max, DRIFT_RATE, epsilon = DRIFT_RATE * 0.05);
}

#[test]
fn test_turns_bank_the_aircraft() {
    let mut model = WindowModel::new(quiet_config());
    let mut max_bank: f64 = 0.0;
    for _ in 0..(700.0 / DT) as usize {
        model.tick(DT);
        max_bank = max_bank.max(model.state().pose.bank_angle.abs());
    }
    assert!(max_bank > 1.0, "orbit turns should bank, max {max_bank}");
    assert!(max_bank <= MAX_BANK_DEG + 1e-9);
}

#[test]
fn test_orbit_resets_on_location_change() {
    let mut model = WindowModel::new(quiet_config());
    run_for(&mut model, 10.0);
    assert!(model.state().orbit.angle > 0.0);

    model.set_location("paris");
    let state = model.state();
    assert_eq!(state.location, "paris");
    assert_eq!(state.orbit.angle, 0.0);
    assert_eq!(state.orbit.center_lat, 48.8566);
    assert!((state.pose.lat - 48.8566).abs() < ORBIT_RADIUS_MAJOR);
}

#[test]
fn test_set_heading_reorients_orbit() {
    let mut model = WindowModel::new(quiet_config());
    model.set_heading(123.0);
    assert_abs_diff_eq!(model.state().pose.heading, 123.0, epsilon = 1e-6);
    model.set_heading(-90.0);
    assert_abs_diff_eq!(model.state().pose.heading, 270.0, epsilon = 1e-6);
}

// ---- Cruise state machine ----

#[test]
fn test_fly_to_completes() {
    let mut model = WindowModel::new(ModelConfig::default());
    assert!(model.fly_to("mumbai"));
    run_for(&mut model, 4.6);

    let state = model.state();
    assert_eq!(state.flight.mode, FlightMode::Orbit);
    assert_eq!(state.location, "mumbai");
    assert_abs_diff_eq!(state.flight.warp_factor, 0.0);
    assert!(state.blind_open);
    assert_eq!(state.flight.cruise_target, None);
    assert_abs_diff_eq!(state.flight_speed, DEFAULT_FLIGHT_SPEED);
}

#[test]
fn test_fly_to_himalayas_scenario() {
    let mut model = WindowModel::new(ModelConfig::default());
    assert_eq!(model.state().pose.altitude, 35_000.0);
    assert_eq!(model.state().weather, Weather::Clear);
    assert_eq!(model.state().flight.mode, FlightMode::Orbit);

    model.fly_to("himalayas");
    for _ in 0..300 {
        model.tick(DT);
    }
    assert_eq!(model.state().location, "himalayas");
    assert!(!model.state().is_transitioning());
}

#[test]
fn test_fly_to_current_location_is_noop() {
    let mut model = WindowModel::new(ModelConfig::default());
    let here = model.state().location.clone();
    let before = state_json(&model);
    assert!(!model.fly_to(&here));
    assert_eq!(model.state().flight.mode, FlightMode::Orbit);
    assert_eq!(state_json(&model), before);
    assert!(model.take_events().is_empty());
}

#[test]
fn test_fly_to_unknown_location_is_noop() {
    let mut model = WindowModel::new(ModelConfig::default());
    assert!(!model.fly_to("atlantis"));
    assert_eq!(model.state().flight.mode, FlightMode::Orbit);
}

#[test]
fn test_fly_to_during_cruise_keeps_first_target() {
    let mut model = WindowModel::new(ModelConfig::default());
    assert!(model.fly_to("mumbai"));
    run_for(&mut model, 1.0);
    assert!(!model.fly_to("tokyo"));
    assert!(!model.fly_to("mumbai"));
    assert_eq!(model.state().flight.cruise_target.as_deref(), Some("mumbai"));
    run_for(&mut model, 4.0);
    assert_eq!(model.state().location, "mumbai");
}

#[test]
fn test_cruise_phases() {
    let mut model = WindowModel::new(ModelConfig::default());
    model.fly_to("london");
    let events = model.take_events();
    assert!(matches!(events.as_slice(), [WindowEvent::DepartureStarted { target }] if target == "london"));

    // Departure: warp ramps, orbit keeps moving, blind open.
    let angle_start = model.state().orbit.angle;
    run_for(&mut model, 1.0);
    let state = model.state();
    assert_eq!(state.flight.mode, FlightMode::CruiseDeparture);
    assert!(state.blind_open);
    assert!(state.flight.warp_factor > 0.2 && state.flight.warp_factor < 0.6);
    assert!(state.flight_speed > DEFAULT_FLIGHT_SPEED + 10.0);
    assert!(state.orbit.angle != angle_start);

    // Transit: blind closed, orbit frozen, warp easing out.
    let mut guard = 0;
    while model.state().flight.mode == FlightMode::CruiseDeparture {
        model.tick(DT);
        guard += 1;
        assert!(guard < 200);
    }
    assert_eq!(model.state().flight.mode, FlightMode::CruiseTransit);
    assert!(!model.state().blind_open);
    let frozen = model.state().orbit.angle;
    let mut last_warp = model.state().flight.warp_factor;
    for _ in 0..60 {
        model.tick(DT);
        assert_eq!(model.state().orbit.angle, frozen);
        assert!(model.state().flight.warp_factor <= last_warp);
        last_warp = model.state().flight.warp_factor;
    }

    run_for(&mut model, 1.5);
    assert_eq!(model.state().flight.mode, FlightMode::Orbit);
    assert_eq!(model.state().location, "london");
    let events = model.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, WindowEvent::TransitStarted { target } if target == "london")));
    assert!(events
        .iter()
        .any(|e| matches!(e, WindowEvent::Arrived { location } if location == "london")));
}

#[test]
fn test_arrival_rerolls_director_dwell() {
    let mut model = WindowModel::new(ModelConfig::default());
    run_for(&mut model, 30.0);
    model.fly_to("dubai");
    run_for(&mut model, 4.5);
    let director = model.state().timers.director;
    assert!(director.elapsed < 1.0);
    assert!((DIRECTOR_DWELL_RANGE.0..DIRECTOR_DWELL_RANGE.1).contains(&director.threshold));
}

#[test]
fn test_cruise_warp_curves() {
    assert_eq!(cruise::departure_warp(0.0), 0.0);
    assert_abs_diff_eq!(cruise::departure_warp(WARP_RAMP_SECS), 1.0);
    assert_abs_diff_eq!(cruise::departure_warp(WARP_RAMP_SECS / 2.0), 0.5);
    let mut last = 0.0;
    for i in 1..=25 {
        let w = cruise::departure_warp(i as f64 * 0.1);
        assert!(w >= last);
        last = w;
    }

    assert_abs_diff_eq!(cruise::transit_warp(0.8, 0.0), 0.8);
    assert_eq!(cruise::transit_warp(0.8, TRANSIT_SECS), 0.0);
    // Ease-out: most of the drop happens early.
    let first_half_drop = 0.8 - cruise::transit_warp(0.8, TRANSIT_SECS / 2.0);
    assert!(first_half_drop > 0.8 * 0.7);
}

// ---- Motion synthesizer ----

#[test]
fn test_bump_decays() {
    let mut model = WindowModel::new(quiet_config());
    {
        let state = model.state_mut();
        state.timers.bump.restart(1e9);
        state.bump = Some(BumpImpulse::new(1.0, 2.0));
    }
    let reference = BumpImpulse::new(1.0, 2.0);

    let mut window_peaks = [0.0_f64; 3];
    let mut t = 0.0;
    while t < BUMP_DURATION_SECS + 0.1 {
        model.tick(DT);
        t += DT;
        let offset = model.state().motion.bump_offset;
        assert!(offset.abs() <= reference.envelope_at(t) + 1e-6);
        let window = ((t / 0.5) as usize).min(2);
        window_peaks[window] = window_peaks[window].max(offset.abs());
        if t >= 1.4 {
            assert!(offset.abs() < 0.01, "bump still {offset} at t={t:.2}");
        }
    }
    assert!(window_peaks[0] > window_peaks[1]);
    assert!(window_peaks[1] > window_peaks[2]);
    assert!(model.state().bump.is_none());
    assert_eq!(model.state().motion.bump_offset, 0.0);
}

#[test]
fn test_bumps_fire_more_often_in_storms() {
    let count_bumps = |weather: Weather| {
        let mut model = WindowModel::new(ModelConfig {
            weather,
            seed: 5,
            ..quiet_config()
        });
        run_collecting(&mut model, 300.0)
            .iter()
            .filter(|e| matches!(e, WindowEvent::TurbulenceBump { .. }))
            .count()
    };
    let calm = count_bumps(Weather::Clear);
    let storm = count_bumps(Weather::Storm);
    assert!(calm > 0);
    assert!(storm > calm * 2, "storm {storm} vs calm {calm}");
}

#[test]
fn test_weather_change_rescales_pending_bump() {
    let mut model = WindowModel::new(ModelConfig {
        seed: 1,
        ..quiet_config()
    });
    let clear_wait = model.state().timers.bump.threshold;
    assert!((BUMP_INTERVAL_RANGE.0..BUMP_INTERVAL_RANGE.1).contains(&clear_wait));

    model.set_weather(Weather::Storm);
    let storm_wait = model.state().timers.bump.threshold;
    assert_abs_diff_eq!(storm_wait, clear_wait / 3.0, epsilon = 1e-9);
    assert!(storm_wait <= BUMP_INTERVAL_RANGE.1 / 3.0);

    // Time already waited is kept; only the remainder is rescaled.
    run_for(&mut model, 1.0);
    let elapsed = model.state().timers.bump.elapsed;
    let remaining = model.state().timers.bump.remaining();
    model.apply_patch(&StatePatch {
        weather: Some(Weather::Rain),
        ..Default::default()
    });
    let timer = model.state().timers.bump;
    assert_abs_diff_eq!(timer.elapsed, elapsed);
    assert_abs_diff_eq!(timer.remaining(), remaining * 2.0, epsilon = 1e-9);
}

#[test]
fn test_restored_storm_uses_storm_bump_interval() {
    let snapshot = porthole_core::state::PersistedSnapshot {
        weather: Weather::Storm,
        ..Default::default()
    };
    let model = WindowModel::from_snapshot(quiet_config(), &snapshot);
    assert_eq!(model.state().weather, Weather::Storm);
    assert!(model.state().timers.bump.threshold <= BUMP_INTERVAL_RANGE.1 / 3.0 + 1e-9);
}

#[test]
fn test_engine_vibration_always_present() {
    let mut model = WindowModel::new(quiet_config());
    let mut max_vibe: f64 = 0.0;
    for _ in 0..120 {
        model.tick(DT);
        let m = model.state().motion;
        assert!(m.engine_vibe_x.abs() <= ENGINE_VIBE_AMPLITUDE + 1e-12);
        assert!(m.engine_vibe_y.abs() <= ENGINE_VIBE_AMPLITUDE + 1e-12);
        max_vibe = max_vibe.max(m.engine_vibe_x.abs());
    }
    assert!(max_vibe > ENGINE_VIBE_AMPLITUDE * 0.5);
}

#[test]
fn test_breathing_drives_pitch() {
    let mut model = WindowModel::new(quiet_config());
    run_for(&mut model, BREATHING_PERIOD_SECS / 4.0);
    let state = model.state();
    assert_abs_diff_eq!(state.motion.breathing_offset, BREATHING_AMPLITUDE, epsilon = 0.01);
    assert_abs_diff_eq!(state.pose.pitch, BREATHING_PITCH_DEG, epsilon = 0.01);
}

#[rstest]
#[case(Weather::Clear, 35_000.0, 1.0)]
#[case(Weather::Cloudy, 35_000.0, 1.0)]
#[case(Weather::Rain, 44_000.0, 1.5)]
#[case(Weather::Storm, 35_000.0, 3.0)]
#[case(Weather::Clear, MAX_ALTITUDE, 1.0 - CALM_AIR_MAX_DAMPING)]
fn test_turbulence_scale(#[case] weather: Weather, #[case] altitude: f64, #[case] expected: f64) {
    assert_abs_diff_eq!(motion::turbulence_scale(weather, altitude), expected, epsilon = 1e-12);
}

#[test]
fn test_calm_air_damping_is_monotonic() {
    let mut last = f64::INFINITY;
    for alt in (40_000..=45_000).step_by(500) {
        let s = motion::turbulence_scale(Weather::Clear, alt as f64);
        assert!(s <= last);
        last = s;
    }
}

#[test]
fn test_bank_target_clamped() {
    assert_eq!(motion::target_bank(100.0), MAX_BANK_DEG);
    assert_eq!(motion::target_bank(-100.0), -MAX_BANK_DEG);
    assert_abs_diff_eq!(motion::target_bank(1.0), BANK_GAIN);
    // Smoothing never overshoots.
    let b = motion::smooth_toward(0.0, 6.0, DEFAULT_BANK_SMOOTHING, 0.1);
    assert!(b > 0.0 && b < 6.0);
}

// ---- Ambient scheduler ----

#[test]
fn test_storm_produces_lightning() {
    let mut model = WindowModel::new(ModelConfig {
        seed: 7,
        weather: Weather::Storm,
        ..quiet_config()
    });
    let mut peak: f64 = 0.0;
    for _ in 0..(60.0 / DT) as usize {
        model.tick(DT);
        peak = peak.max(model.state().lightning.intensity);
    }
    assert!(peak > 0.0, "expected lightning within 60s of storm");
    assert!(peak <= LIGHTNING_INTENSITY_RANGE.1);
}

#[test]
fn test_no_lightning_outside_storms() {
    let mut model = WindowModel::new(ModelConfig {
        seed: 7,
        weather: Weather::Rain,
        ..quiet_config()
    });
    for _ in 0..(120.0 / DT) as usize {
        model.tick(DT);
        assert_eq!(model.state().lightning.intensity, 0.0);
    }
}

#[test]
fn test_lightning_decays_after_strike() {
    let mut model = WindowModel::new(ModelConfig {
        weather: Weather::Storm,
        ..quiet_config()
    });
    model.state_mut().lightning.intensity = 1.0;
    model.state_mut().timers.lightning.restart(1e9);
    let mut last = 1.0;
    for _ in 0..60 {
        model.tick(DT);
        let i = model.state().lightning.intensity;
        assert!(i <= last);
        last = i;
    }
    assert_eq!(last, 0.0);
}

#[test]
fn test_night_micro_events_are_shooting_stars() {
    let mut model = WindowModel::new(ModelConfig {
        time_of_day: 23.0,
        ..quiet_config()
    });
    let kinds: Vec<_> = run_collecting(&mut model, 600.0)
        .into_iter()
        .filter_map(|e| match e {
            WindowEvent::MicroEventStarted { kind } => Some(kind),
            _ => None,
        })
        .collect();
    assert!(!kinds.is_empty());
    assert!(kinds.iter().all(|k| *k == MicroEventKind::ShootingStar));
}

#[test]
fn test_day_micro_events_are_birds_or_contrails() {
    let mut model = WindowModel::new(ModelConfig {
        time_of_day: 12.0,
        ..quiet_config()
    });
    let events = run_collecting(&mut model, 900.0);
    let started: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            WindowEvent::MicroEventStarted { kind } => Some(*kind),
            _ => None,
        })
        .collect();
    let ended = events
        .iter()
        .filter(|e| matches!(e, WindowEvent::MicroEventEnded { .. }))
        .count();
    assert!(started.len() >= 3);
    assert!(started
        .iter()
        .all(|k| matches!(k, MicroEventKind::Bird | MicroEventKind::Contrail)));
    assert!(ended + 1 >= started.len());
}

#[test]
fn test_micro_event_expires() {
    let mut model = WindowModel::new(quiet_config());
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let event = micro_events::spawn(&mut rng, SkyPhase::Day);
    let duration = event.duration;
    model.state_mut().micro_event = Some(event);
    run_for(&mut model, duration + 0.1);
    assert!(model.state().micro_event.is_none());
}

#[test]
fn test_ambient_drift_nudges_atmosphere() {
    let mut model = WindowModel::new(ModelConfig {
        ambient_drift: true,
        ..quiet_config()
    });
    let before = model.state().atmosphere;
    run_for(&mut model, DRIFT_INITIAL_RANGE.1 + 1.0);
    let after = model.state().atmosphere;
    assert_ne!(before, after);
    assert!((DRIFT_DENSITY_RANGE.0..=DRIFT_DENSITY_RANGE.1).contains(&after.cloud_density));
    assert!((DRIFT_SPEED_RANGE.0..=DRIFT_SPEED_RANGE.1).contains(&after.cloud_speed));
    assert!((DRIFT_HAZE_RANGE.0..=DRIFT_HAZE_RANGE.1).contains(&after.haze));
}

#[test]
fn test_ambient_drift_suppressed_while_user_adjusts() {
    let mut model = WindowModel::new(ModelConfig {
        ambient_drift: true,
        ..quiet_config()
    });
    let before = model.state().atmosphere;
    let weather = model.state().weather;
    for _ in 0..120 {
        model.on_user_interaction(InteractionKind::Atmosphere);
        run_for(&mut model, 5.0);
    }
    assert_eq!(model.state().atmosphere, before);
    assert_eq!(model.state().weather, weather);
}

#[test]
fn test_ambient_drift_toggle_off() {
    let mut model = WindowModel::new(quiet_config());
    let before = model.state().atmosphere;
    run_for(&mut model, 600.0);
    assert_eq!(model.state().atmosphere, before);
}

#[test]
fn test_drift_moves_user_values_by_one_step() {
    let mut model = WindowModel::new(ModelConfig {
        ambient_drift: true,
        ..quiet_config()
    });
    model.apply_patch(&StatePatch {
        haze: Some(1.0),
        cloud_density: Some(0.0),
        ..Default::default()
    });
    run_for(&mut model, DRIFT_INITIAL_RANGE.1 + INTERACTION_DEBOUNCE_SECS + 2.0);
    let atmosphere = model.state().atmosphere;
    // Values outside the drift range walk toward it instead of jumping in.
    assert_abs_diff_eq!(atmosphere.haze, 1.0 - DRIFT_HAZE_STEP, epsilon = 1e-9);
    assert_abs_diff_eq!(atmosphere.cloud_density, DRIFT_DENSITY_STEP, epsilon = 1e-9);
}

#[test]
fn test_nudge_bounded_by_step() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut value = 0.5;
    for _ in 0..500 {
        let next = drift::nudge(&mut rng, value, DRIFT_DENSITY_STEP, DRIFT_DENSITY_RANGE);
        assert!((next - value).abs() <= DRIFT_DENSITY_STEP + 1e-12);
        assert!((DRIFT_DENSITY_RANGE.0..=DRIFT_DENSITY_RANGE.1).contains(&next));
        value = next;
    }
}

#[test]
fn test_drift_weather_distribution() {
    assert_eq!(drift::pick_weather(0.0), Weather::Clear);
    assert_eq!(drift::pick_weather(0.35), Weather::Cloudy);
    assert_eq!(drift::pick_weather(0.75), Weather::Rain);
    assert_eq!(drift::pick_weather(0.99), Weather::Overcast);
}

// ---- Altitude governor ----

#[test]
fn test_governor_eases_to_preset() {
    let mut model = WindowModel::new(quiet_config());
    model.set_altitude(20_000.0);

    run_for(&mut model, 7.0);
    assert_eq!(model.state().pose.altitude, 20_000.0, "user altitude should hold");

    let mut last = model.state().pose.altitude;
    for _ in 0..(60.0 / DT) as usize {
        model.tick(DT);
        let alt = model.state().pose.altitude;
        assert!(alt >= last, "governor should climb monotonically");
        assert!(alt - last <= ALTITUDE_MAX_STEP + 1e-9);
        assert!(alt <= 35_000.0);
        last = alt;
    }
    assert_abs_diff_eq!(last, 35_000.0, epsilon = 1.0);
}

#[test]
fn test_governor_follows_sky_phase() {
    let mut model = WindowModel::new(ModelConfig {
        time_of_day: 2.0,
        ..quiet_config()
    });
    run_for(&mut model, 90.0);
    let night = porthole_core::locations::find("new-york").unwrap().altitudes.night;
    assert_abs_diff_eq!(model.state().pose.altitude, night, epsilon = 1.0);
    assert_eq!(altitude::target_altitude(model.state()), Some(night));
}

#[test]
fn test_ease_toward_never_overshoots() {
    assert_eq!(altitude::ease_toward(30_000.0, 30_000.0, 0.1), 30_000.0);
    let up = altitude::ease_toward(30_000.0, 30_000.5, 0.1);
    assert!(up > 30_000.0 && up <= 30_000.5);
    let down = altitude::ease_toward(40_000.0, 30_000.0, DT);
    assert_abs_diff_eq!(down, 40_000.0 - ALTITUDE_MAX_STEP, epsilon = 1e-9);
}

#[test]
fn test_set_altitude_clamps() {
    let mut model = WindowModel::new(quiet_config());
    model.set_altitude(1e9);
    assert_eq!(model.state().pose.altitude, MAX_ALTITUDE);
    model.set_altitude(-5.0);
    assert_eq!(model.state().pose.altitude, MIN_ALTITUDE);
}

// ---- Director ----

#[test]
fn test_director_departs_after_dwell() {
    let mut model = WindowModel::new(ModelConfig {
        seed: 3,
        ..Default::default()
    });
    let origin = model.state().location.clone();
    let mut departed = false;
    for _ in 0..((DIRECTOR_DWELL_RANGE.1 + 1.0) / DT) as usize {
        model.tick(DT);
        if model.state().flight.mode != FlightMode::Orbit {
            departed = true;
            break;
        }
    }
    assert!(departed, "director should start a cruise within the dwell window");
    let target = model.state().flight.cruise_target.clone().unwrap();
    assert_ne!(target, origin);
}

#[test]
fn test_director_suppressed_by_user_controls() {
    let mut model = WindowModel::new(ModelConfig {
        seed: 3,
        ..Default::default()
    });
    for i in 0..80 {
        let kind = if i % 2 == 0 {
            InteractionKind::Altitude
        } else {
            InteractionKind::Time
        };
        model.on_user_interaction(kind);
        run_for(&mut model, 5.0);
        assert_eq!(model.state().flight.mode, FlightMode::Orbit);
    }
}

#[test]
fn test_director_disabled_by_toggle() {
    let mut model = WindowModel::new(quiet_config());
    run_for(&mut model, DIRECTOR_DWELL_RANGE.1 + 10.0);
    assert_eq!(model.state().flight.mode, FlightMode::Orbit);
}

#[rstest]
#[case(12.0, LocationKind::City)]
#[case(21.0, LocationKind::City)]
#[case(3.0, LocationKind::City)]
#[case(8.0, LocationKind::Nature)]
#[case(17.0, LocationKind::Nature)]
fn test_director_time_of_day_preference(#[case] hours: f64, #[case] expected: LocationKind) {
    assert_eq!(director::preferred_kind(hours), expected);
}

#[test]
fn test_pick_next_never_returns_current() {
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let next = director::pick_next("mumbai", 12.0, &mut rng).unwrap();
        assert_ne!(next.id, "mumbai");
    }
}

#[test]
fn test_pick_next_favors_preferred_kind() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let cities = (0..400)
        .filter(|_| {
            director::pick_next("london", 12.0, &mut rng).unwrap().kind == LocationKind::City
        })
        .count();
    assert!(cities > 240, "expected mostly cities, got {cities}/400");
}

// ---- User actions ----

#[test]
fn test_invalid_delta_is_ignored() {
    let mut model = WindowModel::new(ModelConfig::default());
    model.tick(DT);
    model.queue_command(WindowCommand::FlyTo { id: "tokyo".into() });
    let before = state_json(&model);
    for delta in [f64::NAN, f64::INFINITY, -DT, 0.0, 0.5] {
        model.tick(delta);
    }
    assert_eq!(state_json(&model), before);
}

#[test]
fn test_non_finite_setters_are_ignored() {
    let mut model = WindowModel::new(ModelConfig::default());
    let before = state_json(&model);
    model.set_altitude(f64::NAN);
    model.set_heading(f64::INFINITY);
    model.set_time(f64::NAN);
    model.set_location("atlantis");
    model.apply_patch(&StatePatch {
        altitude: Some(30_000.0),
        cloud_speed: Some(f64::NAN),
        ..Default::default()
    });
    assert_eq!(state_json(&model), before);
}

#[test]
fn test_apply_patch() {
    let mut model = WindowModel::new(quiet_config());
    model.apply_patch(&StatePatch {
        altitude: Some(99_999.0),
        weather: Some(Weather::Rain),
        haze: Some(0.3),
        show_clouds: Some(false),
        flight_speed: Some(2.0),
        autopilot: Some(true),
        ..Default::default()
    });
    let state = model.state();
    assert_eq!(state.pose.altitude, MAX_ALTITUDE);
    assert_eq!(state.weather, Weather::Rain);
    assert_eq!(state.atmosphere.haze, 0.3);
    assert!(!state.atmosphere.show_clouds);
    assert_eq!(state.flight_speed, 2.0);
    assert!(state.autopilot);
}

#[test]
fn test_commands_apply_on_next_tick() {
    let mut model = WindowModel::new(ModelConfig::default());
    model.queue_commands([
        WindowCommand::SetWeather {
            weather: Weather::Overcast,
        },
        WindowCommand::FlyTo { id: "mumbai".into() },
    ]);
    assert_eq!(model.state().flight.mode, FlightMode::Orbit);
    assert_eq!(model.state().weather, Weather::Clear);
    model.tick(DT);
    assert_eq!(model.state().flight.mode, FlightMode::CruiseDeparture);
    assert_eq!(model.state().weather, Weather::Overcast);
}

#[test]
fn test_fly_to_next_command() {
    let mut model = WindowModel::new(ModelConfig::default());
    model.queue_command(WindowCommand::FlyToNext);
    model.tick(DT);
    assert!(model.state().is_transitioning());
}

#[test]
fn test_set_location_ignored_while_cruising() {
    let mut model = WindowModel::new(ModelConfig::default());
    model.fly_to("mumbai");
    model.tick(DT);
    model.set_location("paris");
    assert_eq!(model.state().location, "new-york");
    run_for(&mut model, 4.5);
    assert_eq!(model.state().location, "mumbai");
}

#[test]
fn test_persisted_snapshot_restores() {
    let mut model = WindowModel::new(quiet_config());
    model.set_location("tokyo");
    model.set_weather(Weather::Overcast);
    model.apply_patch(&StatePatch {
        cloud_density: Some(0.8),
        sync_to_clock: Some(true),
        ..Default::default()
    });
    model.set_altitude(31_000.0);
    let snapshot = model.persisted_snapshot();

    let restored = WindowModel::from_snapshot(ModelConfig::default(), &snapshot);
    let state = restored.state();
    assert_eq!(state.location, "tokyo");
    assert_eq!(state.weather, Weather::Overcast);
    assert_eq!(state.pose.altitude, 31_000.0);
    assert_eq!(state.atmosphere.cloud_density, 0.8);
    assert!(!state.autopilot);
    assert!(!state.ambient_drift);
    assert!(state.sync_to_clock);
    assert_eq!(restored.persisted_snapshot(), snapshot);
}

#[test]
fn test_unknown_start_location_falls_back() {
    let model = WindowModel::new(ModelConfig {
        start_location: "atlantis".into(),
        ..Default::default()
    });
    assert_eq!(model.state().location, porthole_core::locations::DEFAULT_LOCATION);
}

// ---- Time of day ----

#[test]
fn test_sync_clock_uses_location_offset() {
    let mut model = WindowModel::new(quiet_config());
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 17, 30, 0).unwrap();
    model.sync_clock(now);
    assert!(model.state().sync_to_clock);
    assert_abs_diff_eq!(model.state().time_of_day, 12.5, epsilon = 1e-9);

    model.set_location("london");
    assert_abs_diff_eq!(model.state().time_of_day, 17.5, epsilon = 1e-9);

    run_for(&mut model, 36.0);
    assert_abs_diff_eq!(model.state().time_of_day, 17.51, epsilon = 1e-4);

    model.set_time(3.0);
    assert!(!model.state().sync_to_clock);
    assert_eq!(model.state().sky_phase(), SkyPhase::Night);
}

#[test]
fn test_local_hours_wraps() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 23, 0, 0).unwrap();
    assert_abs_diff_eq!(clock::local_hours(now, 9.0), 8.0, epsilon = 1e-9);
    assert_abs_diff_eq!(clock::local_hours(now, -5.0), 18.0, epsilon = 1e-9);
}

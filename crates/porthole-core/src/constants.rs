//! Simulation constants and tuning parameters.

use std::f64::consts::TAU;

// --- Frame timing ---

/// Largest frame delta accepted by `tick` (seconds). Anything above is a
/// stalled frame (backgrounded tab, debugger pause) and is skipped.
pub const MAX_TICK_DELTA: f64 = 0.1;

/// Nominal frame rate the altitude governor's per-frame cap is expressed in.
pub const NOMINAL_FRAME_RATE: f64 = 60.0;

// --- Altitude ---

/// Lowest cruise altitude (feet).
pub const MIN_ALTITUDE: f64 = 10_000.0;

/// Highest cruise altitude (feet).
pub const MAX_ALTITUDE: f64 = 45_000.0;

/// Default starting altitude (feet).
pub const DEFAULT_ALTITUDE: f64 = 35_000.0;

/// Proportional gain of the altitude governor (fraction of error per frame).
pub const ALTITUDE_EASE_GAIN: f64 = 0.01;

/// Maximum altitude change per nominal frame (feet).
pub const ALTITUDE_MAX_STEP: f64 = 50.0;

// --- Orbit ---

/// Semi-major axis of the orbit ellipse (degrees).
pub const ORBIT_RADIUS_MAJOR: f64 = 0.30;

/// Semi-minor axis of the orbit ellipse (degrees).
pub const ORBIT_RADIUS_MINOR: f64 = 0.06;

/// Ground-track speed at `flight_speed == 1.0` (degrees per second).
pub const DRIFT_RATE: f64 = 0.002;

/// Default flight speed multiplier.
pub const DEFAULT_FLIGHT_SPEED: f64 = 1.0;

/// Allowed range for the user-facing flight speed multiplier.
pub const FLIGHT_SPEED_RANGE: (f64, f64) = (0.1, 5.0);

/// Heading wander terms: (angular frequency rad/s, amplitude degrees).
pub const HEADING_WANDER: [(f64, f64); 3] = [(0.05, 0.25), (0.031, 0.15), (0.017, 0.1)];

// --- Cruise transition ---

/// Duration of the smoothstep warp ramp during departure (seconds).
pub const WARP_RAMP_SECS: f64 = 2.5;

/// Time spent in departure before the blind closes (seconds).
pub const DEPARTURE_SECS: f64 = 2.0;

/// Time spent in transit before arrival (seconds).
pub const TRANSIT_SECS: f64 = 2.0;

/// Flight speed added at full warp.
pub const WARP_SPEED_BOOST: f64 = 100.0;

// --- Motion synthesis ---

/// Low-frequency sway amplitude (pixels).
pub const SWAY_AMPLITUDE: f64 = 1.2;

/// Sway Y components: (angular frequency rad/s, relative weight).
pub const SWAY_Y: [(f64, f64); 2] = [(0.5, 1.0), (1.1, 0.6)];

/// Sway X components: (angular frequency rad/s, relative weight).
pub const SWAY_X: [(f64, f64); 2] = [(0.37, 0.7), (0.83, 0.35)];

/// Mid-frequency chatter amplitude (pixels).
pub const CHATTER_AMPLITUDE: f64 = 0.15;

/// Chatter Y frequencies (Hz).
pub const CHATTER_Y_HZ: [f64; 2] = [2.5, 3.7];

/// Chatter X frequencies (Hz).
pub const CHATTER_X_HZ: [f64; 2] = [2.1, 3.3];

/// Turbulence bump lifetime (seconds).
pub const BUMP_DURATION_SECS: f64 = 1.5;

/// Exponential decay rate of a bump envelope (1/s).
pub const BUMP_DECAY: f64 = 5.0;

/// Ringing angular frequency of a bump (rad/s).
pub const BUMP_RING_FREQ: f64 = 14.0;

/// Base bump amplitude range (pixels, before turbulence scaling).
pub const BUMP_AMPLITUDE_RANGE: (f64, f64) = (0.8, 2.0);

/// Base interval between bumps (seconds, divided by turbulence multiplier).
pub const BUMP_INTERVAL_RANGE: (f64, f64) = (4.0, 12.0);

/// Altitude above which clear-air turbulence fades out (feet).
pub const CALM_AIR_ALTITUDE: f64 = 40_000.0;

/// Fraction of turbulence removed at `MAX_ALTITUDE` in clear weather.
pub const CALM_AIR_MAX_DAMPING: f64 = 0.85;

/// Bank angle limit (degrees).
pub const MAX_BANK_DEG: f64 = 6.0;

/// Bank degrees per degree-per-second of turn rate.
pub const BANK_GAIN: f64 = 2.0;

/// Default exponential smoothing rate for bank angle (1/s).
pub const DEFAULT_BANK_SMOOTHING: f64 = 2.0;

/// Breathing period (seconds).
pub const BREATHING_PERIOD_SECS: f64 = 22.0;

/// Breathing offset amplitude (pixels).
pub const BREATHING_AMPLITUDE: f64 = 0.8;

/// Breathing pitch amplitude (degrees).
pub const BREATHING_PITCH_DEG: f64 = 0.3;

/// Engine vibration amplitude (pixels).
pub const ENGINE_VIBE_AMPLITUDE: f64 = 0.06;

/// Engine vibration frequency on X (Hz).
pub const ENGINE_VIBE_X_HZ: f64 = 11.3;

/// Engine vibration frequency on Y (Hz). Incommensurate with X so the
/// offset never traces a closed Lissajous figure.
pub const ENGINE_VIBE_Y_HZ: f64 = 17.9;

// --- Ambient: lightning ---

/// Interval between lightning strikes in a storm (seconds).
pub const LIGHTNING_INTERVAL_RANGE: (f64, f64) = (5.0, 30.0);

/// Peak intensity range of a strike.
pub const LIGHTNING_INTENSITY_RANGE: (f64, f64) = (0.5, 1.0);

/// Exponential decay rate of lightning intensity (1/s).
pub const LIGHTNING_DECAY: f64 = 6.0;

/// Intensity below which a flash counts as finished.
pub const LIGHTNING_EPSILON: f64 = 0.01;

// --- Ambient: micro-events ---

/// Interval between micro-events (seconds).
pub const MICRO_EVENT_INTERVAL_RANGE: (f64, f64) = (20.0, 75.0);

/// Probability that a daytime micro-event is a bird (otherwise contrail).
pub const BIRD_PROBABILITY: f64 = 0.4;

/// Shooting star lifetime range (seconds).
pub const SHOOTING_STAR_DURATION: (f64, f64) = (0.8, 1.6);

/// Bird lifetime range (seconds).
pub const BIRD_DURATION: (f64, f64) = (5.0, 9.0);

/// Contrail lifetime range (seconds).
pub const CONTRAIL_DURATION: (f64, f64) = (8.0, 14.0);

// --- Ambient: drift ---

/// Delay before the first ambient drift (seconds).
pub const DRIFT_INITIAL_RANGE: (f64, f64) = (120.0, 300.0);

/// Interval between subsequent ambient drifts (seconds).
pub const DRIFT_INTERVAL_RANGE: (f64, f64) = (180.0, 480.0);

/// Probability that a drift also changes the weather.
pub const DRIFT_WEATHER_PROBABILITY: f64 = 0.2;

/// Maximum cloud density nudge per drift.
pub const DRIFT_DENSITY_STEP: f64 = 0.1;

/// Maximum cloud speed nudge per drift.
pub const DRIFT_SPEED_STEP: f64 = 0.2;

/// Maximum haze nudge per drift.
pub const DRIFT_HAZE_STEP: f64 = 0.05;

/// Range ambient drift keeps cloud density in.
pub const DRIFT_DENSITY_RANGE: (f64, f64) = (0.2, 0.9);

/// Range ambient drift keeps cloud speed in.
pub const DRIFT_SPEED_RANGE: (f64, f64) = (0.5, 2.0);

/// Range ambient drift keeps haze in.
pub const DRIFT_HAZE_RANGE: (f64, f64) = (0.0, 0.6);

// --- Atmosphere (user-settable bounds) ---

pub const CLOUD_DENSITY_RANGE: (f64, f64) = (0.0, 1.0);
pub const CLOUD_SPEED_RANGE: (f64, f64) = (0.0, 3.0);
pub const HAZE_RANGE: (f64, f64) = (0.0, 1.0);

pub const DEFAULT_CLOUD_DENSITY: f64 = 0.5;
pub const DEFAULT_CLOUD_SPEED: f64 = 1.0;
pub const DEFAULT_HAZE: f64 = 0.15;

// --- User interaction ---

/// Debounce window after the last interaction with a control (seconds).
pub const INTERACTION_DEBOUNCE_SECS: f64 = 8.0;

// --- Director ---

/// Dwell time at a location before the autopilot moves on (seconds).
pub const DIRECTOR_DWELL_RANGE: (f64, f64) = (120.0, 300.0);

/// Probability the director picks from the time-of-day preferred group.
pub const DIRECTOR_PREFERENCE_WEIGHT: f64 = 0.75;

// --- Time of day ---

/// Default local time of day (hours).
pub const DEFAULT_TIME_OF_DAY: f64 = 12.0;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const SECS_PER_HOUR: f64 = 3600.0;

/// Breathing angular frequency (rad/s).
pub const BREATHING_OMEGA: f64 = TAU / BREATHING_PERIOD_SECS;

//! Window model engine.
//!
//! `WindowModel` owns the window state, processes user commands, runs all
//! systems once per animation frame, and exposes the state for renderers
//! to read. Completely headless and seeded, enabling deterministic testing.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use porthole_core::commands::{StatePatch, WindowCommand};
use porthole_core::constants::*;
use porthole_core::enums::{FlightMode, InteractionKind, Weather};
use porthole_core::error::{ensure_finite, ValidationError};
use porthole_core::events::WindowEvent;
use porthole_core::locations::{self, Location, DEFAULT_LOCATION, LOCATIONS};
use porthole_core::state::{PersistedSnapshot, WindowState};
use porthole_core::types::{heading_delta, is_valid_delta, normalize_degrees, OrbitPath, SimTime};

use crate::interaction::Interactions;
use crate::systems::{self, cruise::CruiseStep, draw};

/// Events kept when the host never drains them.
const MAX_PENDING_EVENTS: usize = 256;

/// Configuration for a new window model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// RNG seed for determinism. Same seed = same window.
    pub seed: u64,
    /// Location id to start at. Unknown ids fall back to the default.
    pub start_location: String,
    /// Base flight speed multiplier.
    pub flight_speed: f64,
    /// Exponential smoothing rate for bank angle (1/s).
    pub bank_smoothing: f64,
    pub weather: Weather,
    /// Local time of day to start at (hours).
    pub time_of_day: f64,
    pub autopilot: bool,
    pub ambient_drift: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_location: DEFAULT_LOCATION.to_string(),
            flight_speed: DEFAULT_FLIGHT_SPEED,
            bank_smoothing: DEFAULT_BANK_SMOOTHING,
            weather: Weather::default(),
            time_of_day: DEFAULT_TIME_OF_DAY,
            autopilot: true,
            ambient_drift: true,
        }
    }
}

/// The window model. Owns all state and the seeded RNG.
pub struct WindowModel {
    state: WindowState,
    rng: ChaCha8Rng,
    bank_smoothing: f64,
    interactions: Interactions,
    command_queue: VecDeque<WindowCommand>,
    events: Vec<WindowEvent>,
}

impl WindowModel {
    /// Create a new window model with the given config.
    pub fn new(config: ModelConfig) -> Self {
        let mut state = WindowState::default();
        state.weather = config.weather;
        state.autopilot = config.autopilot;
        state.ambient_drift = config.ambient_drift;
        state.time_of_day = if config.time_of_day.is_finite() {
            config.time_of_day.rem_euclid(HOURS_PER_DAY)
        } else {
            DEFAULT_TIME_OF_DAY
        };
        let speed = if config.flight_speed.is_finite() {
            config.flight_speed.clamp(FLIGHT_SPEED_RANGE.0, FLIGHT_SPEED_RANGE.1)
        } else {
            DEFAULT_FLIGHT_SPEED
        };
        state.flight_speed = speed;
        state.base_flight_speed = speed;

        let bank_smoothing = if config.bank_smoothing.is_finite() && config.bank_smoothing > 0.0 {
            config.bank_smoothing
        } else {
            DEFAULT_BANK_SMOOTHING
        };

        let mut model = Self {
            state,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            bank_smoothing,
            interactions: Interactions::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        };

        let start = locations::find(&config.start_location)
            .or_else(|| {
                warn!(
                    "unknown start location {:?}, using {DEFAULT_LOCATION}",
                    config.start_location
                );
                locations::find(DEFAULT_LOCATION)
            })
            .unwrap_or(&LOCATIONS[0]);
        model.place_at(start);
        model.seed_timers();
        model
    }

    /// Create a window model and restore persisted settings on top of `config`.
    pub fn from_snapshot(config: ModelConfig, snapshot: &PersistedSnapshot) -> Self {
        let seeded_weather = config.weather;
        let mut model = Self::new(config);
        if let Some(loc) = locations::find(&snapshot.location) {
            model.place_at(loc);
        }
        let state = &mut model.state;
        if snapshot.altitude.is_finite() {
            state.pose.altitude = snapshot.altitude.clamp(MIN_ALTITUDE, MAX_ALTITUDE);
        }
        state.weather = snapshot.weather;
        if snapshot.cloud_density.is_finite() {
            state.atmosphere.cloud_density = snapshot
                .cloud_density
                .clamp(CLOUD_DENSITY_RANGE.0, CLOUD_DENSITY_RANGE.1);
        }
        state.atmosphere.show_clouds = snapshot.show_clouds;
        state.autopilot = snapshot.autopilot;
        state.ambient_drift = snapshot.ambient_drift;
        state.sync_to_clock = snapshot.sync_to_clock;
        systems::motion::retime_bump(state, seeded_weather);
        model
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: WindowCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = WindowCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the model by one animation frame of `delta` seconds.
    ///
    /// Frames with a non-finite, non-positive or oversized delta are
    /// dropped without touching any state.
    pub fn tick(&mut self, delta: f64) {
        if !is_valid_delta(delta) {
            debug!("tick skipped: {}", ValidationError::InvalidDelta(delta));
            return;
        }

        self.process_commands();
        self.state.time.advance(delta);
        self.run_systems(delta);
    }

    /// Current readable state.
    pub fn state(&self) -> &WindowState {
        &self.state
    }

    /// Current animation time.
    pub fn time(&self) -> SimTime {
        self.state.time
    }

    /// JSON-safe subset for external storage.
    pub fn persisted_snapshot(&self) -> PersistedSnapshot {
        self.state.persisted()
    }

    /// Drain events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.events)
    }

    /// Mutable state access for tests that need to stage a situation.
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut WindowState {
        &mut self.state
    }

    // --- Actions ---

    /// Jump straight to a location. Ignored for unknown ids and while a
    /// cruise is in progress.
    pub fn set_location(&mut self, id: &str) {
        let loc = match locations::lookup(id) {
            Ok(loc) => loc,
            Err(err) => return reject("set_location", err),
        };
        if self.state.flight.mode.is_cruising() {
            return reject("set_location", self.cruise_in_progress());
        }
        if self.state.location != id {
            self.place_at(loc);
        }
    }

    /// Hold a user-chosen altitude (the governor stands down for a while).
    pub fn set_altitude(&mut self, feet: f64) {
        match ensure_finite("altitude", feet) {
            Ok(feet) => {
                self.state.pose.altitude = feet.clamp(MIN_ALTITUDE, MAX_ALTITUDE);
                self.mark(InteractionKind::Altitude);
            }
            Err(err) => reject("set_altitude", err),
        }
    }

    /// Set local time of day manually. Turns clock sync off.
    pub fn set_time(&mut self, hours: f64) {
        match ensure_finite("time_of_day", hours) {
            Ok(hours) => {
                self.state.time_of_day = hours.rem_euclid(HOURS_PER_DAY);
                self.state.sync_to_clock = false;
                self.mark(InteractionKind::Time);
            }
            Err(err) => reject("set_time", err),
        }
    }

    /// Sync local time of day to a UTC instant and keep following it.
    pub fn sync_clock(&mut self, now: DateTime<Utc>) {
        let offset = self.current_location().map_or(0.0, |loc| loc.utc_offset);
        self.state.time_of_day = systems::clock::local_hours(now, offset);
        self.state.sync_to_clock = true;
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.change_weather(weather);
        self.mark(InteractionKind::Atmosphere);
    }

    /// Re-orient the orbit so the aircraft now points at `degrees`.
    pub fn set_heading(&mut self, degrees: f64) {
        match ensure_finite("heading", degrees) {
            Ok(degrees) => {
                let turn = heading_delta(self.state.pose.heading, normalize_degrees(degrees));
                self.state.orbit.bearing = normalize_degrees(self.state.orbit.bearing + turn);
                systems::orbit::place(&mut self.state);
            }
            Err(err) => reject("set_heading", err),
        }
    }

    /// Start the cinematic transition to another location. Returns whether
    /// a cruise was started.
    pub fn fly_to(&mut self, id: &str) -> bool {
        if let Err(err) = locations::lookup(id) {
            reject("fly_to", err);
            return false;
        }
        match self.state.flight.mode {
            FlightMode::Orbit if self.state.location == id => {
                debug!("fly_to {id}: already here");
                false
            }
            FlightMode::Orbit => {
                systems::cruise::begin(&mut self.state.flight, id, self.state.flight_speed);
                info!("departing {} for {id}", self.state.location);
                self.push_event(WindowEvent::DepartureStarted {
                    target: id.to_string(),
                });
                true
            }
            FlightMode::CruiseDeparture | FlightMode::CruiseTransit => {
                reject("fly_to", self.cruise_in_progress());
                false
            }
        }
    }

    /// Let the director choose a destination for the current time of day.
    pub fn pick_next_location(&mut self) -> Option<&'static Location> {
        systems::director::pick_next(&self.state.location, self.state.time_of_day, &mut self.rng)
    }

    /// Apply a batch of slider values. A patch with any non-finite number
    /// is dropped whole; everything else is clamped into range.
    pub fn apply_patch(&mut self, patch: &StatePatch) {
        let patch = match patch.validated() {
            Ok(patch) => patch,
            Err(err) => return reject("apply_patch", err),
        };

        if let Some(feet) = patch.altitude {
            self.set_altitude(feet);
        }
        if let Some(hours) = patch.time_of_day {
            self.set_time(hours);
        }
        if let Some(degrees) = patch.heading {
            self.set_heading(degrees);
        }
        if let Some(speed) = patch.flight_speed {
            self.state.base_flight_speed = speed;
            if self.state.flight.mode.is_cruising() {
                self.state.flight.pre_warp_speed = speed;
            } else {
                self.state.flight_speed = speed;
            }
        }
        if let Some(weather) = patch.weather {
            self.change_weather(weather);
        }
        let atmosphere = &mut self.state.atmosphere;
        if let Some(density) = patch.cloud_density {
            atmosphere.cloud_density = density;
        }
        if let Some(speed) = patch.cloud_speed {
            atmosphere.cloud_speed = speed;
        }
        if let Some(haze) = patch.haze {
            atmosphere.haze = haze;
        }
        if let Some(show) = patch.show_clouds {
            atmosphere.show_clouds = show;
        }
        if let Some(on) = patch.autopilot {
            self.state.autopilot = on;
        }
        if let Some(on) = patch.ambient_drift {
            self.state.ambient_drift = on;
        }
        if let Some(on) = patch.sync_to_clock {
            self.state.sync_to_clock = on;
        }
        if patch.touches_atmosphere() {
            self.mark(InteractionKind::Atmosphere);
        }
    }

    /// Note that the user is working a control; suppresses the matching
    /// automatic behavior for `INTERACTION_DEBOUNCE_SECS`.
    pub fn on_user_interaction(&mut self, kind: InteractionKind) {
        self.mark(kind);
    }

    // --- Internals ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: WindowCommand) {
        match command {
            WindowCommand::SetLocation { id } => self.set_location(&id),
            WindowCommand::SetAltitude { feet } => self.set_altitude(feet),
            WindowCommand::SetTime { hours } => self.set_time(hours),
            WindowCommand::SetWeather { weather } => self.set_weather(weather),
            WindowCommand::SetHeading { degrees } => self.set_heading(degrees),
            WindowCommand::FlyTo { id } => {
                self.fly_to(&id);
            }
            WindowCommand::FlyToNext => {
                if let Some(next) = self.pick_next_location() {
                    self.fly_to(next.id);
                }
            }
            WindowCommand::ApplyPatch { patch } => self.apply_patch(&patch),
            WindowCommand::UserInteraction { kind } => self.on_user_interaction(kind),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, delta: f64) {
        let now = self.state.time.elapsed_secs;

        // 1. Time of day
        systems::clock::run(&mut self.state, delta);

        // 2. Cruise state machine
        if self.state.flight.mode.is_cruising() {
            match systems::cruise::run(&mut self.state.flight, delta) {
                CruiseStep::Holding => {}
                CruiseStep::EnteredTransit => self.enter_transit(),
                CruiseStep::Arrived => self.complete_cruise(),
            }
            if self.state.flight.mode.is_cruising() {
                self.state.flight_speed = systems::cruise::warped_speed(&self.state.flight);
            }
        }

        // 3. Orbit (frozen while the blind is closed)
        let heading_before = self.state.pose.heading;
        if self.state.flight.mode == FlightMode::CruiseTransit {
            self.state.motion.turn_rate = 0.0;
        } else {
            systems::orbit::run(&mut self.state, delta);
            self.state.motion.turn_rate = heading_delta(heading_before, self.state.pose.heading) / delta;
        }

        // 4. Director
        let controls_busy = self.interactions.is_active(InteractionKind::Altitude, now)
            || self.interactions.is_active(InteractionKind::Time, now);
        if let Some(next) = systems::director::run(&mut self.state, &mut self.rng, delta, controls_busy) {
            if !self.fly_to(next.id) {
                self.reroll_director();
            }
        }

        // 5. Motion
        systems::motion::run(
            &mut self.state,
            &mut self.rng,
            delta,
            self.bank_smoothing,
            &mut self.events,
        );

        // 6. Altitude
        let holding_altitude = self.interactions.is_active(InteractionKind::Altitude, now);
        systems::altitude::run(&mut self.state, delta, holding_altitude);

        // 7. Ambient
        systems::lightning::run(&mut self.state, &mut self.rng, delta, &mut self.events);
        systems::micro_events::run(&mut self.state, &mut self.rng, delta, &mut self.events);
        let atmosphere_busy = self.interactions.is_active(InteractionKind::Atmosphere, now);
        systems::drift::run(
            &mut self.state,
            &mut self.rng,
            delta,
            atmosphere_busy,
            &mut self.events,
        );

        self.trim_events();
    }

    fn enter_transit(&mut self) {
        self.state.blind_open = false;
        let target = self.state.flight.cruise_target.clone().unwrap_or_default();
        debug!("blind closed, in transit to {target}");
        self.push_event(WindowEvent::TransitStarted { target });
    }

    fn complete_cruise(&mut self) {
        let target = self.state.flight.cruise_target.clone();
        self.state.flight_speed = systems::cruise::finish(&mut self.state.flight);
        if let Some(loc) = target.as_deref().and_then(locations::find) {
            self.place_at(loc);
        }
        self.state.blind_open = true;
        self.state.pose.bank_angle = 0.0;
        self.reroll_director();
        info!("arrived at {}", self.state.location);
        self.push_event(WindowEvent::Arrived {
            location: self.state.location.clone(),
        });
    }

    fn change_weather(&mut self, weather: Weather) {
        let previous = std::mem::replace(&mut self.state.weather, weather);
        systems::motion::retime_bump(&mut self.state, previous);
    }

    /// Move the orbit to a location and recompute the pose there.
    fn place_at(&mut self, loc: &'static Location) {
        if self.state.sync_to_clock {
            if let Some(previous) = self.current_location() {
                self.state.time_of_day = (self.state.time_of_day + loc.utc_offset - previous.utc_offset)
                    .rem_euclid(HOURS_PER_DAY);
            }
        }
        self.state.location = loc.id.to_string();
        self.state.orbit = OrbitPath::around(loc.lat, loc.lon);
        systems::orbit::place(&mut self.state);
        debug!(
            "orbiting {} (bearing {:.0})",
            loc.id, self.state.orbit.bearing
        );
    }

    /// Draw the first threshold of every scheduler.
    fn seed_timers(&mut self) {
        let rng = &mut self.rng;
        let timers = &mut self.state.timers;
        timers.lightning.restart(draw(rng, LIGHTNING_INTERVAL_RANGE));
        timers.micro_event.restart(draw(rng, MICRO_EVENT_INTERVAL_RANGE));
        timers
            .bump
            .restart(systems::motion::next_bump_interval(rng, self.state.weather));
        timers.drift.restart(draw(rng, DRIFT_INITIAL_RANGE));
        timers.director.restart(draw(rng, DIRECTOR_DWELL_RANGE));
    }

    fn reroll_director(&mut self) {
        let dwell = draw(&mut self.rng, DIRECTOR_DWELL_RANGE);
        self.state.timers.director.restart(dwell);
    }

    fn current_location(&self) -> Option<&'static Location> {
        locations::find(&self.state.location)
    }

    fn cruise_in_progress(&self) -> ValidationError {
        ValidationError::CruiseInProgress(self.state.flight.cruise_target.clone().unwrap_or_default())
    }

    fn mark(&mut self, kind: InteractionKind) {
        self.interactions.mark(kind, self.state.time.elapsed_secs);
    }

    fn push_event(&mut self, event: WindowEvent) {
        self.events.push(event);
        self.trim_events();
    }

    fn trim_events(&mut self) {
        if self.events.len() > MAX_PENDING_EVENTS {
            let excess = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }
    }
}

fn reject(action: &str, err: ValidationError) {
    debug!("{action} ignored: {err}");
}

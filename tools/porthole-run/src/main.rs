//! porthole-run: drive the window model headlessly and print what it saw.
//!
//! Usage:
//!   porthole-run run --seconds 600 --seed 7 --fly-to himalayas
//!   porthole-run run --state window.json --sync-clock
//!   porthole-run locations

mod persistence;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

use log::{info, warn};
use serde::Serialize;

use porthole_core::enums::Weather;
use porthole_core::events::WindowEvent;
use porthole_core::locations::LOCATIONS;
use porthole_core::state::WindowState;
use porthole_sim::{ModelConfig, WindowModel};

const FRAME_DELTA: f64 = 1.0 / 60.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "locations" => cmd_locations(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "porthole-run: headless airplane window\n\
         \n\
         Commands:\n\
         \n\
         run        Tick the window model at 60 fps and print a JSON summary\n\
         \n\
           --seconds <N>      Animation seconds to simulate (default: 60)\n\
           --seed <N>         RNG seed (default: 42)\n\
           --fly-to <id>      Start a cruise to this location first\n\
           --weather <name>   Starting weather (clear, cloudy, rain, overcast, storm)\n\
           --state <path>     Load saved settings from, and save them back to, this file\n\
           --sync-clock       Follow the system clock at the current location\n\
         \n\
         locations  List the location catalog\n\
         \n\
         Set RUST_LOG=debug for per-action logging.\n"
    );
}

fn parse_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(&args[i + 1]);
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match parse_value(args, flag) {
        Some(raw) => match raw.parse::<T>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {flag} expects a number, got {raw:?}");
                process::exit(1);
            }
        },
        None => default,
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

// --- Run command ---

#[derive(Serialize)]
struct RunSummary<'a> {
    seed: u64,
    elapsed_secs: f64,
    frames: u64,
    events: BTreeMap<&'static str, usize>,
    arrivals: Vec<String>,
    state: &'a WindowState,
}

fn cmd_run(args: &[String]) {
    let seconds: f64 = parse_number(args, "--seconds", 60.0);
    if !seconds.is_finite() || seconds < 0.0 {
        eprintln!("Error: --seconds must be a non-negative number");
        process::exit(1);
    }

    let mut config = ModelConfig {
        seed: parse_number(args, "--seed", 42),
        ..Default::default()
    };
    if let Some(name) = parse_value(args, "--weather") {
        match Weather::parse(name) {
            Some(weather) => config.weather = weather,
            None => {
                eprintln!("Error: unknown weather {name:?}");
                process::exit(1);
            }
        }
    }

    let state_path = parse_value(args, "--state").map(PathBuf::from);
    let saved = match state_path.as_deref().map(persistence::load_from_file) {
        Some(Ok(saved)) => saved,
        Some(Err(e)) => {
            warn!("{e}; starting from defaults");
            None
        }
        None => None,
    };

    let seed = config.seed;
    let mut model = match saved {
        Some(snapshot) => {
            info!("restored settings at {}", snapshot.location);
            WindowModel::from_snapshot(config, &snapshot)
        }
        None => WindowModel::new(config),
    };

    if has_flag(args, "--sync-clock") || model.state().sync_to_clock {
        model.sync_clock(chrono::Utc::now());
    }
    if let Some(id) = parse_value(args, "--fly-to") {
        if !model.fly_to(id) {
            eprintln!("Warning: could not fly to {id:?}");
        }
    }

    let frames = (seconds / FRAME_DELTA).round() as u64;
    let mut events: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut arrivals = Vec::new();
    for _ in 0..frames {
        model.tick(FRAME_DELTA);
        for event in model.take_events() {
            if let WindowEvent::Arrived { location } = &event {
                arrivals.push(location.clone());
            }
            *events.entry(event_name(&event)).or_default() += 1;
        }
    }

    info!(
        "simulated {frames} frames, now orbiting {}",
        model.state().location
    );

    if let Some(path) = &state_path {
        if let Err(e) = persistence::save_to_file(path, &model.persisted_snapshot()) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    let summary = RunSummary {
        seed,
        elapsed_secs: model.time().elapsed_secs,
        frames,
        events,
        arrivals,
        state: model.state(),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: failed to serialize summary: {e}");
            process::exit(1);
        }
    }
}

fn event_name(event: &WindowEvent) -> &'static str {
    match event {
        WindowEvent::DepartureStarted { .. } => "departure_started",
        WindowEvent::TransitStarted { .. } => "transit_started",
        WindowEvent::Arrived { .. } => "arrived",
        WindowEvent::LightningStrike { .. } => "lightning_strike",
        WindowEvent::MicroEventStarted { .. } => "micro_event_started",
        WindowEvent::MicroEventEnded { .. } => "micro_event_ended",
        WindowEvent::TurbulenceBump { .. } => "turbulence_bump",
        WindowEvent::WeatherChanged { .. } => "weather_changed",
    }
}

// --- Locations command ---

fn cmd_locations() {
    for loc in LOCATIONS.iter() {
        println!(
            "{:<18} {:<22} {:>9.4} {:>10.4}  UTC{:+}  {:?}",
            loc.id, loc.name, loc.lat, loc.lon, loc.utc_offset, loc.kind
        );
    }
}

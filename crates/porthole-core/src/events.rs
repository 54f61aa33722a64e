//! Events emitted by the model for audio and one-shot visual effects.

use serde::{Deserialize, Serialize};

use crate::enums::{MicroEventKind, Weather};

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WindowEvent {
    /// A cruise began; warp is ramping up.
    DepartureStarted { target: String },
    /// The blind closed and the aircraft is in transit.
    TransitStarted { target: String },
    /// The location swap happened and the blind reopened.
    Arrived { location: String },
    /// Lightning flashed (thunder cue).
    LightningStrike { intensity: f64, x: f64, y: f64 },
    MicroEventStarted { kind: MicroEventKind },
    MicroEventEnded { kind: MicroEventKind },
    /// A turbulence bump hit the airframe.
    TurbulenceBump { amplitude: f64 },
    /// Ambient drift changed the weather.
    WeatherChanged { from: Weather, to: Weather },
}

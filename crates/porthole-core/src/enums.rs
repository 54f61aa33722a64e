//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Flight mode (top-level state of the cruise state machine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightMode {
    /// Steady orbit around the current location.
    #[default]
    Orbit,
    /// Warp is ramping up along the existing orbit; blind still open.
    CruiseDeparture,
    /// Blind closed, warp easing out; location swaps at the end.
    CruiseTransit,
}

impl FlightMode {
    pub fn is_cruising(&self) -> bool {
        !matches!(self, Self::Orbit)
    }
}

/// Weather outside the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Overcast,
    Storm,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Clear,
        Weather::Cloudy,
        Weather::Rain,
        Weather::Overcast,
        Weather::Storm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Overcast => "overcast",
            Self::Storm => "storm",
        }
    }

    /// Parse a weather name; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_str() == name)
    }

    /// Turbulence level implied by this weather.
    pub fn turbulence(&self) -> Turbulence {
        match self {
            Self::Clear | Self::Cloudy => Turbulence::Light,
            Self::Rain | Self::Overcast => Turbulence::Moderate,
            Self::Storm => Turbulence::Severe,
        }
    }
}

/// Turbulence level, driven by weather.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turbulence {
    #[default]
    Light,
    Moderate,
    Severe,
}

impl Turbulence {
    /// Amplitude multiplier applied to sway, chatter and bumps.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Light => 1.0,
            Self::Moderate => 1.5,
            Self::Severe => 3.0,
        }
    }
}

/// Coarse sky state derived from local time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkyPhase {
    Night,
    Dawn,
    Day,
    Dusk,
}

impl SkyPhase {
    /// Night [20,5), dawn [5,7), day [7,18), dusk [18,20).
    pub fn from_hours(hours: f64) -> Self {
        let h = hours.rem_euclid(crate::constants::HOURS_PER_DAY);
        if h < 5.0 || h >= 20.0 {
            Self::Night
        } else if h < 7.0 {
            Self::Dawn
        } else if h < 18.0 {
            Self::Day
        } else {
            Self::Dusk
        }
    }
}

/// Transient overlay shown in the window for a few seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MicroEventKind {
    ShootingStar,
    Bird,
    Contrail,
}

/// Control category a user interaction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Altitude,
    Time,
    Atmosphere,
}

/// Broad kind of a catalog location, used by the director's weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    City,
    Nature,
}

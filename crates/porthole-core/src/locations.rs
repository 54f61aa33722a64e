//! Static catalog of places the window can look down on.

use serde::Serialize;

use crate::enums::{LocationKind, SkyPhase};
use crate::error::ValidationError;

/// Cruise altitude per sky phase (feet).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AltitudePresets {
    pub night: f64,
    pub dawn: f64,
    pub day: f64,
    pub dusk: f64,
}

impl AltitudePresets {
    pub fn for_phase(&self, phase: SkyPhase) -> f64 {
        match phase {
            SkyPhase::Night => self.night,
            SkyPhase::Dawn => self.dawn,
            SkyPhase::Day => self.day,
            SkyPhase::Dusk => self.dusk,
        }
    }
}

/// A named place in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    /// Standard UTC offset (hours).
    pub utc_offset: f64,
    pub kind: LocationKind,
    pub altitudes: AltitudePresets,
}

const CITY_ALTITUDES: AltitudePresets = AltitudePresets {
    night: 38_000.0,
    dawn: 34_000.0,
    day: 35_000.0,
    dusk: 33_000.0,
};

const NATURE_ALTITUDES: AltitudePresets = AltitudePresets {
    night: 39_000.0,
    dawn: 31_000.0,
    day: 32_000.0,
    dusk: 30_000.0,
};

const MOUNTAIN_ALTITUDES: AltitudePresets = AltitudePresets {
    night: 41_000.0,
    dawn: 38_000.0,
    day: 39_000.0,
    dusk: 37_000.0,
};

const fn city(id: &'static str, name: &'static str, lat: f64, lon: f64, utc_offset: f64) -> Location {
    Location {
        id,
        name,
        lat,
        lon,
        utc_offset,
        kind: LocationKind::City,
        altitudes: CITY_ALTITUDES,
    }
}

const fn nature(
    id: &'static str,
    name: &'static str,
    lat: f64,
    lon: f64,
    utc_offset: f64,
    altitudes: AltitudePresets,
) -> Location {
    Location {
        id,
        name,
        lat,
        lon,
        utc_offset,
        kind: LocationKind::Nature,
        altitudes,
    }
}

/// Id of the location a fresh model starts at.
pub const DEFAULT_LOCATION: &str = "new-york";

/// Every location the window can visit.
pub const LOCATIONS: &[Location] = &[
    city("new-york", "New York", 40.7128, -74.0060, -5.0),
    city("san-francisco", "San Francisco", 37.7749, -122.4194, -8.0),
    city("london", "London", 51.5074, -0.1278, 0.0),
    city("paris", "Paris", 48.8566, 2.3522, 1.0),
    city("dubai", "Dubai", 25.2048, 55.2708, 4.0),
    city("mumbai", "Mumbai", 19.0760, 72.8777, 5.5),
    city("tokyo", "Tokyo", 35.6762, 139.6503, 9.0),
    city("sydney", "Sydney", -33.8688, 151.2093, 10.0),
    nature("himalayas", "Himalayas", 27.9881, 86.9250, 5.75, MOUNTAIN_ALTITUDES),
    nature("alps", "Swiss Alps", 46.5197, 8.0000, 1.0, MOUNTAIN_ALTITUDES),
    nature("sahara", "Sahara", 23.4162, 25.6628, 2.0, NATURE_ALTITUDES),
    nature("amazon", "Amazon Basin", -3.4653, -62.2159, -4.0, NATURE_ALTITUDES),
    nature("iceland", "Iceland", 64.9631, -19.0208, 0.0, NATURE_ALTITUDES),
    nature("patagonia", "Patagonia", -49.3315, -72.8863, -3.0, MOUNTAIN_ALTITUDES),
    nature("grand-canyon", "Grand Canyon", 36.1069, -112.1129, -7.0, NATURE_ALTITUDES),
    nature("great-barrier-reef", "Great Barrier Reef", -18.2871, 147.6992, 10.0, NATURE_ALTITUDES),
];

/// Look up a location by id.
pub fn find(id: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|loc| loc.id == id)
}

/// Look up a location by id, reporting unknown ids as an error.
pub fn lookup(id: &str) -> Result<&'static Location, ValidationError> {
    find(id).ok_or_else(|| ValidationError::UnknownLocation(id.to_string()))
}

/// All locations of one kind.
pub fn of_kind(kind: LocationKind) -> impl Iterator<Item = &'static Location> {
    LOCATIONS.iter().filter(move |loc| loc.kind == kind)
}

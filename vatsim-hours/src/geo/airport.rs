//! Registry of supported airports

use std::fmt;
use std::str::FromStr;

use super::Coordinate;
use crate::error::{Error, Result};

/// An airport from the fixed registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Airport {
    /// ICAO identifier, e.g. "KSAN"
    pub code: &'static str,
    /// Aerodrome reference point
    pub location: Coordinate,
}

const REGISTRY: [Airport; 4] = [
    Airport::new("KSAN", 32.7338, -117.1933),
    Airport::new("KLAX", 33.9416, -118.4085),
    Airport::new("KSNA", 33.6762, -117.8675),
    Airport::new("KLAS", 36.084, -115.1537),
];

impl Airport {
    const fn new(code: &'static str, latitude: f64, longitude: f64) -> Self {
        Self {
            code,
            location: Coordinate::new(latitude, longitude),
        }
    }

    /// Look up an airport by its exact ICAO code.
    pub fn lookup(code: &str) -> Result<&'static Airport> {
        REGISTRY
            .iter()
            .find(|airport| airport.code == code)
            .ok_or_else(|| Error::UnsupportedAirport(code.to_string()))
    }

    /// Every supported airport, in registry order.
    pub fn all() -> &'static [Airport] {
        &REGISTRY
    }
}

impl FromStr for Airport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Airport::lookup(s).copied()
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.4}, {:.4})",
            self.code, self.location.latitude, self.location.longitude
        )
    }
}

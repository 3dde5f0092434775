//! VATSIM JSON API models

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinate, Positioned};

/// Status manifest returned by the well-known status URL
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusManifest {
    pub data: StatusData,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatusData {
    /// Candidate V3 data endpoints
    #[serde(default)]
    pub v3: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FlightPlan {
    #[serde(default)]
    pub aircraft: String,
    #[serde(default)]
    pub aircraft_faa: String,
    #[serde(default)]
    pub aircraft_short: String,
}

/// One pilot's live snapshot from the V3 data feed
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FlightRecord {
    pub cid: u64,
    #[serde(default)]
    pub name: String,
    pub callsign: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: i64,
    pub transponder: String,
    pub logon_time: String,
    #[serde(default)]
    pub flight_plan: Option<FlightPlan>,
}

impl FlightRecord {
    /// Best available aircraft type from the filed flight plan
    pub fn aircraft(&self) -> Option<&str> {
        let fp = self.flight_plan.as_ref()?;
        [&fp.aircraft_faa, &fp.aircraft_short, &fp.aircraft]
            .into_iter()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }
}

impl Positioned for FlightRecord {
    fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// V3 data feed payload; only pilots are of interest
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct V3ResponseData {
    pub pilots: Vec<FlightRecord>,
}

/// Ratings-times payload, hours per role
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RatingsData {
    pub pilot: f64,
    /// Time spent controlling; absent for some accounts
    #[serde(default)]
    pub atc: Option<f64>,
}

impl From<f64> for RatingsData {
    /// Pilot hours only, controller time unknown.
    fn from(pilot: f64) -> Self {
        Self { pilot, atc: None }
    }
}

//! VATSIM network client
//!
//! Three endpoints are involved:
//! - the status manifest, which lists candidate V3 data URLs
//! - the V3 data feed with every connected pilot
//! - the per-CID ratings endpoint with cumulative hours

mod client;
mod types;

pub use client::{select_endpoint, sort_by_callsign, VatsimClient, CID_PLACEHOLDER};
pub use types::{FlightPlan, FlightRecord, RatingsData, StatusData, StatusManifest, V3ResponseData};

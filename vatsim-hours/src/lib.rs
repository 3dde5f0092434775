//! Live VATSIM pilots around an airport, with their cumulative flight hours.
//!
//! The flow is: [`api::VatsimClient`] discovers a data endpoint and fetches
//! the online pilots, [`geo::filter_by_range`] keeps those near the airport,
//! [`enrich::enrich`] resolves hours through a per-run [`enrich::HoursCache`]
//! and [`report::Report`] sorts and renders the result.

pub mod api;
pub mod config;
pub mod enrich;
pub mod error;
pub mod geo;
pub mod logging;
pub mod pipeline;
pub mod report;

pub use error::{Error, Result};

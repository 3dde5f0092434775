//! Great-circle distance and range filtering around registry airports
//!
//! Distances are expressed in the reporting unit used throughout the tool:
//! metres scaled by [`UNIT_SCALE`] and rounded to the nearest integer, so
//! range checks compare whole units only.

mod airport;
pub use airport::Airport;

use crate::error::Result;

/// Mean Earth radius in metres
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres to reporting units. Calibration constant, reproduced as-is.
const UNIT_SCALE: f64 = 0.00054;

/// A (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Anything that carries a position and can be range-filtered.
pub trait Positioned {
    fn position(&self) -> Coordinate;
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn position(&self) -> Coordinate {
        (**self).position()
    }
}

/// Haversine distance between two points, in whole reporting units.
///
/// <https://www.movable-type.co.uk/scripts/latlong.html>
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn distance(a: Coordinate, b: Coordinate) -> u32 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h just past 1.0 near the antipode
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    (EARTH_RADIUS_M * c * UNIT_SCALE).round() as u32
}

/// Keep the records within `max_distance` units of the airport `code`.
///
/// The boundary is inclusive and input order is preserved. Fails with
/// [`crate::Error::UnsupportedAirport`] when `code` is not in the registry.
pub fn filter_by_range<T, I>(records: I, code: &str, max_distance: u32) -> Result<Vec<T>>
where
    T: Positioned,
    I: IntoIterator<Item = T>,
{
    let airport = Airport::lookup(code)?;
    Ok(records
        .into_iter()
        .filter(|record| distance(record.position(), airport.location) <= max_distance)
        .collect())
}

//! Great-circle distance between two positions.
//!
//! Uses the haversine formula on a spherical Earth of radius 6,371 km.

use crate::position::Coordinate;

/// Mean Earth radius used by the tracker, in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two positions in meters
///
/// Coordinates are not range checked.
pub fn haversine(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_M * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Distance rounded to whole meters, as displayed and as compared against thresholds
pub fn rounded_meters(a: Coordinate, b: Coordinate) -> u64 {
    haversine(a, b).round() as u64
}

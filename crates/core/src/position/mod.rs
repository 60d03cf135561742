//! Geographic positions and the distances between them.

use serde::{Deserialize, Serialize};

pub mod distance;

/// A latitude/longitude pair in degrees.
///
/// Stored in (lat, lon) order to match how positions are displayed; converts
/// to a [`geo::Point`] in (x = lon, y = lat) order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Shift by the same number of degrees in both latitude and longitude
    pub fn offset(&self, degrees: f64) -> Self {
        Self {
            lat: self.lat + degrees,
            lon: self.lon + degrees,
        }
    }

    /// Latitude formatted the way the readout shows it
    pub fn lat_display(&self) -> String {
        format!("{:.5}", self.lat)
    }

    pub fn lon_display(&self) -> String {
        format!("{:.5}", self.lon)
    }
}

impl From<Coordinate> for geo::Point {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lon, c.lat)
    }
}

impl From<geo::Point> for Coordinate {
    fn from(p: geo::Point) -> Self {
        Coordinate::new(p.y(), p.x())
    }
}

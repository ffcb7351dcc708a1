//! Coordinate type and the planar distance used for tour construction.
//!
//! Distances here are Euclidean on raw degrees, not geodesic. Every zone
//! lives inside one metro area, so the distortion does not change which
//! neighbor is nearest in practice. Real road distances come from the
//! [`RouteOracle`](crate::traits::RouteOracle).

use serde::{Deserialize, Serialize};

/// A point in (longitude, latitude) order.
///
/// Serialized as a two-element `[lng, lat]` array, which is also the order
/// OSRM expects on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Planar distance in coordinate units.
    pub fn euclidean_to(&self, other: &Coordinate) -> f64 {
        (self.lng - other.lng).hypot(self.lat - other.lat)
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }

    /// `lng,lat` with six decimals, as used in OSRM path segments.
    pub fn to_osrm_pair(&self) -> String {
        format!("{:.6},{:.6}", self.lng, self.lat)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lng, coord.lat]
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Haversine route oracle (fallback when OSRM is unavailable).
//!
//! Uses great-circle distance between consecutive waypoints and an assumed
//! speed to estimate each leg. Less accurate than OSRM (ignores roads) but
//! always available, which makes it handy for offline development.

use async_trait::async_trait;

use crate::error::OracleError;
use crate::geo::Coordinate;
use crate::model::RouteLeg;
use crate::traits::RouteOracle;

/// Average urban collection-truck speed.
pub const DEFAULT_SPEED_KMH: f64 = 25.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone)]
pub struct HaversineOracle {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineOracle {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineOracle {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Great-circle distance between two points in kilometers.
    pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    fn km_to_seconds(&self, km: f64) -> f64 {
        km / self.speed_kmh * 3600.0
    }
}

#[async_trait]
impl RouteOracle for HaversineOracle {
    async fn route_legs(&self, waypoints: &[Coordinate]) -> Result<Vec<RouteLeg>, OracleError> {
        if waypoints.len() < 2 {
            return Err(OracleError::InvalidWaypoints {
                count: waypoints.len(),
            });
        }

        Ok(waypoints
            .windows(2)
            .map(|pair| {
                let km = Self::haversine_km(pair[0], pair[1]);
                RouteLeg::from_meters_seconds(km * 1000.0, self.km_to_seconds(km))
            })
            .collect())
    }
}

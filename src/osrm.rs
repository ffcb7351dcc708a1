//! OSRM HTTP adapter for per-leg driving distances.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::OracleError;
use crate::geo::Coordinate;
use crate::model::RouteLeg;
use crate::traits::RouteOracle;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// `route` service URL for the given waypoints. Geometry is switched off;
    /// per-leg distance and duration are always part of the response.
    pub fn route_url(&self, waypoints: &[Coordinate]) -> String {
        let coords = waypoints
            .iter()
            .map(Coordinate::to_osrm_pair)
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=false&steps=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

#[async_trait]
impl RouteOracle for OsrmClient {
    async fn route_legs(&self, waypoints: &[Coordinate]) -> Result<Vec<RouteLeg>, OracleError> {
        if waypoints.len() < 2 {
            return Err(OracleError::InvalidWaypoints {
                count: waypoints.len(),
            });
        }

        let url = self.route_url(waypoints);
        tracing::debug!(%url, "requesting OSRM route");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        decode_legs(&body, waypoints.len() - 1)
    }
}

/// Decode an OSRM `route` response into exactly `expected` legs.
///
/// Fails closed: any shape mismatch is an [`OracleError`], never a panic.
pub fn decode_legs(body: &[u8], expected: usize) -> Result<Vec<RouteLeg>, OracleError> {
    let parsed: OsrmRouteResponse = serde_json::from_slice(body)?;

    if parsed.code != "Ok" {
        return Err(OracleError::Rejected {
            code: parsed.code,
            message: parsed.message,
        });
    }

    let route = parsed.routes.into_iter().next().ok_or(OracleError::NoRoute)?;
    if route.legs.len() < expected {
        return Err(OracleError::MissingLegs {
            expected,
            got: route.legs.len(),
        });
    }

    Ok(route
        .legs
        .into_iter()
        .take(expected)
        .map(|leg| RouteLeg::from_meters_seconds(leg.distance, leg.duration))
        .collect())
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    distance: f64,
    duration: f64,
}

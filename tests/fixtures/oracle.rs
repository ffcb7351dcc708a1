//! Scripted route oracle.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use waste_router::error::OracleError;
use waste_router::geo::Coordinate;
use waste_router::model::RouteLeg;
use waste_router::traits::RouteOracle;

/// Answers every call with leg `i` = (i + 1) km and (i + 1) * 2 min, except
/// for the call numbers listed in `failing` (0-based), which fail with HTTP
/// 503. Calls listed in `short` return one leg too few.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    failing: HashSet<usize>,
    short: HashSet<usize>,
    calls: Mutex<Vec<Vec<Coordinate>>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(calls: impl IntoIterator<Item = usize>) -> Self {
        Self {
            failing: calls.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn always_failing(max_calls: usize) -> Self {
        Self::failing_on(0..max_calls)
    }

    pub fn short_on(calls: impl IntoIterator<Item = usize>) -> Self {
        Self {
            short: calls.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Waypoint lists received so far, in call order.
    pub fn calls(&self) -> Vec<Vec<Coordinate>> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl RouteOracle for ScriptedOracle {
    async fn route_legs(&self, waypoints: &[Coordinate]) -> Result<Vec<RouteLeg>, OracleError> {
        let call = {
            let mut calls = self.calls.lock();
            calls.push(waypoints.to_vec());
            calls.len() - 1
        };

        if self.failing.contains(&call) {
            return Err(OracleError::Status(503));
        }

        let mut count = waypoints.len().saturating_sub(1);
        if self.short.contains(&call) {
            count = count.saturating_sub(1);
        }

        Ok((0..count)
            .map(|i| RouteLeg {
                distance_km: (i + 1) as f64,
                duration_min: ((i + 1) * 2) as f64,
            })
            .collect())
    }
}

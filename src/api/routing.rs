//! Route planning endpoint

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::{ApiError, AppState};
use crate::error::SkippedTruck;
use crate::model::{TruckRoute, ZoneId};
use crate::planner::plan_routes;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalRoutesResponse {
    pub message: &'static str,
    pub routes: Vec<TruckRoute>,
    pub skipped_trucks: Vec<SkippedTruck>,
    pub unrouted_zones: Vec<ZoneId>,
}

/// GET /api/routes/optimal
///
/// Runs the planner once over every eligible zone and idle truck and
/// commits the resulting assignments.
pub async fn optimal_routes(State(state): State<AppState>) -> Result<Json<OptimalRoutesResponse>, ApiError> {
    let _planning = state.planning.lock().await;

    let outcome = plan_routes(
        state.zones.as_ref(),
        state.trucks.as_ref(),
        state.oracle.as_ref(),
        &state.options,
    )
    .await?;

    Ok(Json(OptimalRoutesResponse {
        message: "Optimal routes generated successfully",
        routes: outcome.routes,
        skipped_trucks: outcome.skipped,
        unrouted_zones: outcome.unrouted_zones,
    }))
}

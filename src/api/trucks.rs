//! Truck administration endpoints

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ApiError, AppState};
use crate::model::{NewTruck, Truck, TruckFilter, TruckId, TruckStatus, TruckUpdate, ZoneId};

pub async fn list_trucks(State(state): State<AppState>) -> Result<Json<Vec<Truck>>, ApiError> {
    Ok(Json(state.trucks.find(&TruckFilter::default()).await?))
}

pub async fn get_truck(
    State(state): State<AppState>,
    Path(id): Path<TruckId>,
) -> Result<Json<Truck>, ApiError> {
    let truck = state.trucks.get(id).await?.ok_or(ApiError::NotFound("Truck"))?;
    Ok(Json(truck))
}

pub async fn create_truck(
    State(state): State<AppState>,
    Json(payload): Json<NewTruck>,
) -> Result<(StatusCode, Json<Truck>), ApiError> {
    let truck = payload.into_truck().map_err(ApiError::BadRequest)?;
    let truck = state.trucks.insert(truck).await?;
    tracing::info!(truck = %truck.name, plate = %truck.license_plate, "truck created");
    Ok((StatusCode::CREATED, Json(truck)))
}

pub async fn update_truck(
    State(state): State<AppState>,
    Path(id): Path<TruckId>,
    Json(update): Json<TruckUpdate>,
) -> Result<Json<Truck>, ApiError> {
    let mut truck = state.trucks.get(id).await?.ok_or(ApiError::NotFound("Truck"))?;
    update.apply(&mut truck).map_err(ApiError::BadRequest)?;
    state.trucks.save(&truck).await?;
    Ok(Json(truck))
}

pub async fn delete_truck(
    State(state): State<AppState>,
    Path(id): Path<TruckId>,
) -> Result<Json<Value>, ApiError> {
    let truck = state.trucks.delete(id).await?.ok_or(ApiError::NotFound("Truck"))?;
    tracing::info!(truck = %truck.name, "truck deleted");
    Ok(Json(json!({ "message": "Truck deleted successfully" })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub truck_id: TruckId,
    pub zone_id: ZoneId,
}

/// PUT /api/trucks/assign
///
/// Manual single-zone dispatch. Leaves the planner's `assignedZones` alone.
pub async fn assign_truck_to_zone(
    State(state): State<AppState>,
    Json(request): Json<AssignRequest>,
) -> Result<Json<Truck>, ApiError> {
    let mut truck = state
        .trucks
        .get(request.truck_id)
        .await?
        .ok_or(ApiError::NotFound("Truck"))?;
    let zone = state
        .zones
        .get(request.zone_id)
        .await?
        .ok_or(ApiError::NotFound("Zone"))?;

    truck.assigned_zone = Some(zone.id);
    truck.status = TruckStatus::Assigned;
    truck.updated_at = chrono::Utc::now();
    state.trucks.save(&truck).await?;

    tracing::info!(truck = %truck.name, zone = %zone.name, "truck assigned to zone");
    Ok(Json(truck))
}

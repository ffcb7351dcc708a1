//! Zone administration endpoints

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::{ApiError, AppState};
use crate::model::{NewZone, Zone, ZoneFilter, ZoneId, ZoneUpdate};

pub async fn list_zones(State(state): State<AppState>) -> Result<Json<Vec<Zone>>, ApiError> {
    Ok(Json(state.zones.find(&ZoneFilter::default()).await?))
}

pub async fn get_zone(
    State(state): State<AppState>,
    Path(id): Path<ZoneId>,
) -> Result<Json<Zone>, ApiError> {
    let zone = state.zones.get(id).await?.ok_or(ApiError::NotFound("Zone"))?;
    Ok(Json(zone))
}

pub async fn create_zone(
    State(state): State<AppState>,
    Json(payload): Json<NewZone>,
) -> Result<(StatusCode, Json<Zone>), ApiError> {
    let zone = payload.into_zone().map_err(ApiError::BadRequest)?;
    let zone = state.zones.insert(zone).await?;
    tracing::info!(zone = %zone.name, id = %zone.id, "zone created");
    Ok((StatusCode::CREATED, Json(zone)))
}

pub async fn update_zone(
    State(state): State<AppState>,
    Path(id): Path<ZoneId>,
    Json(update): Json<ZoneUpdate>,
) -> Result<Json<Zone>, ApiError> {
    let mut zone = state.zones.get(id).await?.ok_or(ApiError::NotFound("Zone"))?;
    update.apply(&mut zone);
    state.zones.save(&zone).await?;
    Ok(Json(zone))
}

pub async fn delete_zone(
    State(state): State<AppState>,
    Path(id): Path<ZoneId>,
) -> Result<Json<Value>, ApiError> {
    let zone = state.zones.delete(id).await?.ok_or(ApiError::NotFound("Zone"))?;
    tracing::info!(zone = %zone.name, id = %zone.id, "zone deleted");
    Ok(Json(json!({ "message": "Zone deleted successfully" })))
}

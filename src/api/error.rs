//! HTTP error mapping.
//!
//! Bodies are `{ "message": ... }`, with extra fields where the caller can
//! act on them (`skippedTrucks`, `error`).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::error::{PlanError, StoreError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Entity label, e.g. "Zone".
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                json!({ "message": format!("{entity} not found") }),
            ),
            ApiError::Plan(PlanError::NothingToRoute { zones, trucks }) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "message": "No zones or trucks available",
                    "eligibleZones": zones,
                    "idleTrucks": trucks,
                }),
            ),
            ApiError::Plan(PlanError::AllFailed { skipped }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "message": "No routes could be generated",
                    "skippedTrucks": skipped,
                }),
            ),
            ApiError::Plan(PlanError::Store(err)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "message": "Failed to generate optimal routes",
                    "error": err.to_string(),
                }),
            ),
            ApiError::Store(StoreError::DuplicatePlate(plate)) => (
                StatusCode::CONFLICT,
                json!({ "message": format!("License plate {plate} is already registered") }),
            ),
            ApiError::Store(StoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                json!({ "message": format!("{entity} {id} not found") }),
            ),
            ApiError::Store(err @ StoreError::InvalidRecord { .. }) => {
                (StatusCode::BAD_REQUEST, json!({ "message": err.to_string() }))
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error", "error": err.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

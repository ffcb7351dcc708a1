//! Error types for the oracle, the stores, the planning pipeline and config.

use thiserror::Error;

use crate::model::TruckId;

/// Failure to obtain legs from the routing oracle.
///
/// Always scoped to a single truck: the planner logs it, skips that truck
/// and carries on.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("need at least 2 waypoints, got {count}")]
    InvalidWaypoints { count: usize },

    /// Connection failure, timeout or unreadable body.
    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("routing service answered HTTP {0}")]
    Status(u16),

    #[error("routing service rejected the request: {code}{}", detail(.message))]
    Rejected {
        code: String,
        message: Option<String>,
    },

    #[error("malformed routing response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("routing service returned no route")]
    NoRoute,

    #[error("expected {expected} legs, routing service returned {got}")]
    MissingLegs { expected: usize, got: usize },
}

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: uuid::Uuid },

    #[error("license plate {0} is already registered")]
    DuplicatePlate(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed data: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("invalid {entity} record: {reason}")]
    InvalidRecord { entity: &'static str, reason: String },
}

/// A truck the planner attempted but could not route.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedTruck {
    pub truck_id: TruckId,
    pub truck_name: String,
    pub reason: String,
}

/// Why a planning run produced no routes.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Client-side: nothing eligible to plan. No work was attempted.
    #[error("no zones or trucks available ({zones} eligible zones, {trucks} idle trucks)")]
    NothingToRoute { zones: usize, trucks: usize },

    /// Server-side: every attempted truck failed (or none got any zones).
    #[error("no routes could be generated ({} trucks skipped)", .skipped.len())]
    AllFailed { skipped: Vec<SkippedTruck> },

    /// A commit to the zone/truck store failed. Trucks committed before the
    /// failure stay committed.
    #[error("failed to persist route assignment: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

//! HTTP surface: the routing endpoint plus zone/truck administration.

pub mod error;
pub mod health;
pub mod routing;
pub mod trucks;
pub mod zones;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, put};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::planner::PlanOptions;
use crate::traits::{RouteOracle, TruckStore, ZoneStore};

pub use error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub zones: Arc<dyn ZoneStore>,
    pub trucks: Arc<dyn TruckStore>,
    pub oracle: Arc<dyn RouteOracle>,
    pub options: PlanOptions,
    /// Serializes planning runs inside this process so two requests cannot
    /// hand the same zone to different trucks.
    planning: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        zones: Arc<dyn ZoneStore>,
        trucks: Arc<dyn TruckStore>,
        oracle: Arc<dyn RouteOracle>,
        options: PlanOptions,
    ) -> Self {
        Self {
            zones,
            trucks,
            oracle,
            options,
            planning: Arc::new(Mutex::new(())),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let zones = Router::new()
        .route("/api/zones", get(zones::list_zones).post(zones::create_zone))
        .route(
            "/api/zones/{id}",
            get(zones::get_zone)
                .put(zones::update_zone)
                .delete(zones::delete_zone),
        );

    // Static `/assign` wins over `/{id}` in the matcher.
    let trucks = Router::new()
        .route("/api/trucks/assign", put(trucks::assign_truck_to_zone))
        .route("/api/trucks", get(trucks::list_trucks).post(trucks::create_truck))
        .route(
            "/api/trucks/{id}",
            get(trucks::get_truck)
                .put(trucks::update_truck)
                .delete(trucks::delete_truck),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/routes/optimal", get(routing::optimal_routes))
        .merge(zones)
        .merge(trucks)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! waste-router: route planning service for the waste-collection fleet.

use std::sync::Arc;

use anyhow::Context;

use waste_router::api::{self, AppState};
use waste_router::config::{AppConfig, OracleKind};
use waste_router::haversine::HaversineOracle;
use waste_router::memory::{MemoryTruckStore, MemoryZoneStore, load_seed_file};
use waste_router::osrm::OsrmClient;
use waste_router::traits::RouteOracle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waste_router=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    let oracle: Arc<dyn RouteOracle> = match config.planner.oracle {
        OracleKind::Osrm => {
            tracing::info!(base_url = %config.osrm.base_url, profile = %config.osrm.profile, "using OSRM oracle");
            Arc::new(OsrmClient::new(config.osrm.clone()).context("building OSRM client")?)
        }
        OracleKind::Haversine => {
            tracing::warn!(speed_kmh = config.planner.haversine_speed_kmh, "using straight-line oracle");
            Arc::new(HaversineOracle::new(config.planner.haversine_speed_kmh))
        }
    };

    let zones = Arc::new(MemoryZoneStore::new());
    let trucks = Arc::new(MemoryTruckStore::new());

    if let Some(path) = &config.data.seed_path {
        let summary = load_seed_file(path, zones.as_ref(), trucks.as_ref())
            .await
            .with_context(|| format!("seeding from {}", path.display()))?;
        tracing::info!(zones = summary.zones, trucks = summary.trucks, "seed data loaded");
    }

    let state = AppState::new(zones, trucks, oracle, config.planner.options.clone());
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("binding {}", config.server.bind))?;
    tracing::info!("waste-router listening on {}", config.server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}

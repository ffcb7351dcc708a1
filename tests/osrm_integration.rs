//! Live OSRM tests. Ignored by default.
//!
//! Needs Docker and a dataset already prepared for MLD (`osrm-extract`,
//! `osrm-partition`, `osrm-customize`) in `OSRM_DATA_DIR`. The dataset base
//! name defaults to `southern-zone-latest` and can be changed with
//! `OSRM_DATASET`.
//!
//! ```text
//! OSRM_DATA_DIR=$PWD/osrm-data cargo test --test osrm_integration -- --ignored
//! ```

mod fixtures;

use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant, UNIX_EPOCH};

use testcontainers::core::{IntoContainerPort, Mount};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt, ReuseDirective, TestcontainersError};

use waste_router::geo::Coordinate;
use waste_router::memory::{MemoryTruckStore, MemoryZoneStore};
use waste_router::osrm::{OsrmClient, OsrmConfig};
use waste_router::planner::{PlanOptions, plan_routes};
use waste_router::traits::RouteOracle;

use fixtures::{AREAS, DEPOT, idle_trucks, zones};

async fn osrm_container() -> Result<(ContainerAsync<GenericImage>, String), TestcontainersError> {
    let data_dir = env::var("OSRM_DATA_DIR")
        .map(PathBuf::from)
        .map_err(|_| TestcontainersError::other("OSRM_DATA_DIR is not set"))?;
    let dataset = env::var("OSRM_DATASET").unwrap_or_else(|_| "southern-zone-latest".to_string());

    let partition = data_dir.join(format!("{dataset}.osrm.partition"));
    let mtime = std::fs::metadata(&partition)
        .map_err(|err| TestcontainersError::other(format!("{}: {err}", partition.display())))?
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|duration| duration.as_secs())
        .unwrap_or(0);

    let image = GenericImage::new("osrm/osrm-backend", "latest")
        .with_exposed_port(5000.tcp())
        .with_mount(Mount::bind_mount(data_dir.to_string_lossy().to_string(), "/data"))
        .with_cmd(vec![
            "osrm-routed".to_string(),
            "--algorithm".to_string(),
            "mld".to_string(),
            format!("/data/{dataset}.osrm"),
        ])
        .with_container_name(format!("osrm-{dataset}-mld-{mtime}"))
        .with_startup_timeout(Duration::from_secs(30))
        .with_reuse(ReuseDirective::Always);

    let container = image.start().await?;
    let port = container.get_host_port_ipv4(5000.tcp()).await?;
    Ok((container, format!("http://127.0.0.1:{port}")))
}

fn client(base_url: &str) -> OsrmClient {
    OsrmClient::new(OsrmConfig {
        base_url: base_url.to_string(),
        profile: "driving".into(),
        timeout_secs: 10,
    })
    .expect("build OSRM client")
}

/// osrm-routed accepts connections a little before it can answer queries.
async fn wait_until_ready(client: &OsrmClient, waypoints: &[Coordinate]) {
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(15) {
        if client.route_legs(waypoints).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}

#[tokio::test]
#[ignore = "requires Docker and a prepared OSRM dataset"]
async fn live_route_has_one_leg_per_pair() {
    let (_container, base_url) = osrm_container().await.expect("start OSRM container");
    let client = client(&base_url);

    let waypoints = vec![DEPOT, AREAS[1].coords(), AREAS[0].coords(), DEPOT];
    wait_until_ready(&client, &waypoints).await;

    let legs = client.route_legs(&waypoints).await.expect("route");
    assert_eq!(legs.len(), 3);
    for leg in &legs {
        assert!(leg.distance_km > 0.0, "{leg:?}");
        assert!(leg.duration_min > 0.0, "{leg:?}");
    }
    // Road distance is never shorter than the straight line.
    let straight = waste_router::haversine::HaversineOracle::haversine_km(DEPOT, AREAS[1].coords());
    assert!(legs[0].distance_km >= straight * 0.95);
}

#[tokio::test]
#[ignore = "requires Docker and a prepared OSRM dataset"]
async fn live_plan_routes_every_zone() {
    let (_container, base_url) = osrm_container().await.expect("start OSRM container");
    let client = client(&base_url);
    wait_until_ready(&client, &[DEPOT, AREAS[0].coords()]).await;

    let zone_store = MemoryZoneStore::with_zones(zones(9));
    let truck_store = MemoryTruckStore::with_trucks(idle_trucks(3));

    let outcome = plan_routes(&zone_store, &truck_store, &client, &PlanOptions::default())
        .await
        .expect("plan");

    assert_eq!(outcome.routes.len(), 3);
    assert!(outcome.skipped.is_empty());
    assert!(outcome.unrouted_zones.is_empty());
    assert!(zone_store.snapshot().iter().all(|z| z.assigned_truck.is_some()));
}

//! Route planning pipeline: partition, sequence, resolve legs, commit.
//!
//! Trucks are handled one at a time. A truck whose oracle call fails is
//! skipped and its zones stay unassigned for the next run. Commits are
//! per truck with no surrounding transaction, so a store failure part way
//! through leaves earlier trucks committed.
//!
//! A commit re-reads the truck and its zones and writes back only the
//! planner's fields (truck status and stop list, zone assignment). Edits
//! made through the store while the oracle call was in flight survive.

use chrono::Utc;
use serde::Deserialize;

use crate::error::{OracleError, PlanError, SkippedTruck, StoreError};
use crate::geo::{Coordinate, round2};
use crate::model::{
    RouteLeg, RouteStop, Truck, TruckFilter, TruckId, TruckRoute, TruckStatus, Zone, ZoneFilter,
    ZoneId,
};
use crate::partition::{DEFAULT_MAX_ZONES_PER_TRUCK, Partition, partition};
use crate::tour::nearest_neighbor;
use crate::traits::{RouteOracle, TruckStore, ZoneStore};

/// MG Road, Bengaluru.
pub const DEFAULT_DEPOT: Coordinate = Coordinate::new(77.5946, 12.9716);

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// Start and end of every tour.
    pub depot: Coordinate,
    /// Hard cap on stops per truck per run.
    pub max_zones_per_truck: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            depot: DEFAULT_DEPOT,
            max_zones_per_truck: DEFAULT_MAX_ZONES_PER_TRUCK,
        }
    }
}

/// Result of a run that produced at least one route.
#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    pub routes: Vec<TruckRoute>,
    /// Trucks that got zones but whose oracle call failed.
    pub skipped: Vec<SkippedTruck>,
    /// Eligible zones not assigned this run: leftovers after every truck was
    /// served plus the allocations of skipped trucks.
    pub unrouted_zones: Vec<ZoneId>,
}

pub async fn plan_routes<Z, T, O>(
    zone_store: &Z,
    truck_store: &T,
    oracle: &O,
    options: &PlanOptions,
) -> Result<PlanOutcome, PlanError>
where
    Z: ZoneStore + ?Sized,
    T: TruckStore + ?Sized,
    O: RouteOracle + ?Sized,
{
    let zones = zone_store.find(&ZoneFilter::eligible()).await?;
    let trucks = truck_store.find(&TruckFilter::idle()).await?;

    tracing::info!(zones = zones.len(), trucks = trucks.len(), "planning routes");

    if zones.is_empty() || trucks.is_empty() {
        return Err(PlanError::NothingToRoute {
            zones: zones.len(),
            trucks: trucks.len(),
        });
    }

    let Partition {
        allocations,
        leftover,
    } = partition(zones, trucks.len(), options.max_zones_per_truck);

    let mut unrouted_zones: Vec<ZoneId> = leftover.iter().map(|zone| zone.id).collect();
    let mut attempts: Vec<Result<TruckRoute, SkippedTruck>> = Vec::with_capacity(allocations.len());

    for (truck, allocation) in trucks.into_iter().zip(allocations) {
        let ordered = nearest_neighbor(options.depot, &allocation);
        tracing::debug!(
            truck = %truck.name,
            stops = ?ordered.iter().map(|zone| zone.name.as_str()).collect::<Vec<_>>(),
            "sequenced tour"
        );

        match route_truck(oracle, options.depot, &truck, &ordered).await {
            Ok(route) => {
                if let Err(err) = commit(zone_store, truck_store, truck.id, &route.zone_ids()).await {
                    tracing::error!(truck = %truck.name, error = %err, "route commit failed");
                    return Err(err.into());
                }
                tracing::info!(
                    truck = %truck.name,
                    stops = route.stops.len(),
                    distance_km = route.total_distance_km,
                    "route assigned"
                );
                attempts.push(Ok(route));
            }
            Err(err) => {
                tracing::warn!(truck = %truck.name, error = %err, "routing failed, skipping truck");
                unrouted_zones.extend(ordered.iter().map(|zone| zone.id));
                attempts.push(Err(SkippedTruck {
                    truck_id: truck.id,
                    truck_name: truck.name,
                    reason: err.to_string(),
                }));
            }
        }
    }

    let (routes, skipped): (Vec<_>, Vec<_>) = attempts.into_iter().partition(Result::is_ok);
    let routes: Vec<TruckRoute> = routes.into_iter().filter_map(Result::ok).collect();
    let skipped: Vec<SkippedTruck> = skipped.into_iter().filter_map(Result::err).collect();

    if routes.is_empty() {
        tracing::error!(skipped = skipped.len(), "no routes could be generated");
        return Err(PlanError::AllFailed { skipped });
    }

    tracing::info!(
        routes = routes.len(),
        skipped = skipped.len(),
        unrouted = unrouted_zones.len(),
        "route planning finished"
    );

    Ok(PlanOutcome {
        routes,
        skipped,
        unrouted_zones,
    })
}

/// Waypoints for a tour: depot, each stop, depot.
pub fn tour_waypoints(depot: Coordinate, ordered: &[Zone]) -> Vec<Coordinate> {
    std::iter::once(depot)
        .chain(ordered.iter().map(|zone| zone.coordinates))
        .chain(std::iter::once(depot))
        .collect()
}

async fn route_truck<O>(
    oracle: &O,
    depot: Coordinate,
    truck: &Truck,
    ordered: &[Zone],
) -> Result<TruckRoute, OracleError>
where
    O: RouteOracle + ?Sized,
{
    let waypoints = tour_waypoints(depot, ordered);
    let legs = oracle.route_legs(&waypoints).await?;

    // Trust no oracle on leg count.
    let expected = waypoints.len() - 1;
    if legs.len() < expected {
        return Err(OracleError::MissingLegs {
            expected,
            got: legs.len(),
        });
    }

    Ok(assemble_route(truck, ordered, &legs))
}

/// Pair stop `i` with leg `i` (the leg that arrives at it). The closing leg
/// back to the depot is not attributed to any stop or counted in totals.
pub fn assemble_route(truck: &Truck, ordered: &[Zone], legs: &[RouteLeg]) -> TruckRoute {
    let stops: Vec<RouteStop> = ordered
        .iter()
        .zip(legs)
        .map(|(zone, leg)| RouteStop {
            zone_id: zone.id,
            zone_name: zone.name.clone(),
            complaints: zone.complaints,
            predicted_waste_kg: zone.predicted_waste_kg,
            coordinates: zone.coordinates,
            distance_km: leg.distance_km,
            duration_min: leg.duration_min,
        })
        .collect();

    TruckRoute {
        truck_id: truck.id,
        truck_name: truck.name.clone(),
        total_distance_km: round2(stops.iter().map(|stop| stop.distance_km).sum()),
        total_waste_kg: stops.iter().map(|stop| stop.predicted_waste_kg).sum(),
        estimated_time_min: round2(stops.iter().map(|stop| stop.duration_min).sum()),
        stops,
    }
}

/// Truck first, then its zones, one save at a time.
///
/// Every record is fetched before the first save, so a zone deleted during
/// the oracle call fails the commit with `NotFound` and nothing for this
/// truck is written.
async fn commit<Z, T>(
    zone_store: &Z,
    truck_store: &T,
    truck_id: TruckId,
    zone_ids: &[ZoneId],
) -> Result<(), StoreError>
where
    Z: ZoneStore + ?Sized,
    T: TruckStore + ?Sized,
{
    let mut zones = Vec::with_capacity(zone_ids.len());
    for &id in zone_ids {
        let zone = zone_store
            .get(id)
            .await?
            .ok_or(StoreError::NotFound { entity: "zone", id })?;
        zones.push(zone);
    }
    let mut truck = truck_store.get(truck_id).await?.ok_or(StoreError::NotFound {
        entity: "truck",
        id: truck_id,
    })?;

    let now = Utc::now();

    truck.status = TruckStatus::OnRoute;
    truck.assigned_zones = zone_ids.to_vec();
    truck.updated_at = now;
    truck_store.save(&truck).await?;

    for mut zone in zones {
        zone.assigned_truck = Some(truck_id);
        zone.updated_at = now;
        zone_store.save(&zone).await?;
    }

    Ok(())
}

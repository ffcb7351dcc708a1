//! Core seams between the route planner and the outside world.
//!
//! The planner only ever talks to zone/truck records and the driving-route
//! service through these traits. Concrete apps plug in their own stores and
//! oracles; this crate ships an in-memory store, an OSRM client and a
//! straight-line fallback.

use async_trait::async_trait;

use crate::error::{OracleError, StoreError};
use crate::geo::Coordinate;
use crate::model::{RouteLeg, Truck, TruckFilter, TruckId, Zone, ZoneFilter, ZoneId};

/// Anything with a position that a tour can visit.
pub trait Located {
    fn coordinates(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinates(&self) -> Coordinate {
        *self
    }
}

/// Persistence for zone records.
///
/// `find` returns matches in a stable order (insertion order for the
/// bundled store); the planner relies on that order when partitioning.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    async fn find(&self, filter: &ZoneFilter) -> Result<Vec<Zone>, StoreError>;

    async fn get(&self, id: ZoneId) -> Result<Option<Zone>, StoreError>;

    async fn insert(&self, zone: Zone) -> Result<Zone, StoreError>;

    /// Overwrite an existing record. Fails with `NotFound` if it was deleted.
    async fn save(&self, zone: &Zone) -> Result<(), StoreError>;

    async fn delete(&self, id: ZoneId) -> Result<Option<Zone>, StoreError>;
}

/// Persistence for truck records. License plates are unique.
#[async_trait]
pub trait TruckStore: Send + Sync {
    async fn find(&self, filter: &TruckFilter) -> Result<Vec<Truck>, StoreError>;

    async fn get(&self, id: TruckId) -> Result<Option<Truck>, StoreError>;

    async fn insert(&self, truck: Truck) -> Result<Truck, StoreError>;

    async fn save(&self, truck: &Truck) -> Result<(), StoreError>;

    async fn delete(&self, id: TruckId) -> Result<Option<Truck>, StoreError>;
}

/// Resolves real-world driving legs for an ordered list of waypoints.
///
/// On success returns exactly one leg per consecutive waypoint pair, in
/// waypoint order. Any failure (network, timeout, bad payload, too few legs)
/// is reported as an [`OracleError`]; callers treat it as per-truck and
/// recoverable.
#[async_trait]
pub trait RouteOracle: Send + Sync {
    async fn route_legs(&self, waypoints: &[Coordinate]) -> Result<Vec<RouteLeg>, OracleError>;
}

//! In-memory zone and truck stores, plus JSON seeding.
//!
//! Records are kept in insertion order, which is the order `find` returns
//! them in.

use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;

use crate::error::StoreError;
use crate::model::{NewTruck, NewZone, Truck, TruckFilter, TruckId, Zone, ZoneFilter, ZoneId};
use crate::traits::{TruckStore, ZoneStore};

#[derive(Debug, Default)]
pub struct MemoryZoneStore {
    zones: RwLock<Vec<Zone>>,
}

impl MemoryZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zones(zones: Vec<Zone>) -> Self {
        Self {
            zones: RwLock::new(zones),
        }
    }

    /// Copy of every record, in insertion order.
    pub fn snapshot(&self) -> Vec<Zone> {
        self.zones.read().clone()
    }
}

#[async_trait]
impl ZoneStore for MemoryZoneStore {
    async fn find(&self, filter: &ZoneFilter) -> Result<Vec<Zone>, StoreError> {
        Ok(self
            .zones
            .read()
            .iter()
            .filter(|zone| filter.matches(zone))
            .cloned()
            .collect())
    }

    async fn get(&self, id: ZoneId) -> Result<Option<Zone>, StoreError> {
        Ok(self.zones.read().iter().find(|zone| zone.id == id).cloned())
    }

    async fn insert(&self, zone: Zone) -> Result<Zone, StoreError> {
        self.zones.write().push(zone.clone());
        Ok(zone)
    }

    async fn save(&self, zone: &Zone) -> Result<(), StoreError> {
        let mut zones = self.zones.write();
        let slot = zones
            .iter_mut()
            .find(|existing| existing.id == zone.id)
            .ok_or(StoreError::NotFound {
                entity: "zone",
                id: zone.id,
            })?;
        *slot = zone.clone();
        Ok(())
    }

    async fn delete(&self, id: ZoneId) -> Result<Option<Zone>, StoreError> {
        let mut zones = self.zones.write();
        Ok(zones
            .iter()
            .position(|zone| zone.id == id)
            .map(|index| zones.remove(index)))
    }
}

#[derive(Debug, Default)]
pub struct MemoryTruckStore {
    trucks: RwLock<Vec<Truck>>,
}

impl MemoryTruckStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trucks(trucks: Vec<Truck>) -> Self {
        Self {
            trucks: RwLock::new(trucks),
        }
    }

    pub fn snapshot(&self) -> Vec<Truck> {
        self.trucks.read().clone()
    }
}

fn plate_taken(trucks: &[Truck], plate: &str, except: TruckId) -> bool {
    trucks
        .iter()
        .any(|truck| truck.id != except && truck.license_plate.eq_ignore_ascii_case(plate))
}

#[async_trait]
impl TruckStore for MemoryTruckStore {
    async fn find(&self, filter: &TruckFilter) -> Result<Vec<Truck>, StoreError> {
        Ok(self
            .trucks
            .read()
            .iter()
            .filter(|truck| filter.matches(truck))
            .cloned()
            .collect())
    }

    async fn get(&self, id: TruckId) -> Result<Option<Truck>, StoreError> {
        Ok(self.trucks.read().iter().find(|truck| truck.id == id).cloned())
    }

    async fn insert(&self, truck: Truck) -> Result<Truck, StoreError> {
        let mut trucks = self.trucks.write();
        if plate_taken(&trucks, &truck.license_plate, truck.id) {
            return Err(StoreError::DuplicatePlate(truck.license_plate));
        }
        trucks.push(truck.clone());
        Ok(truck)
    }

    async fn save(&self, truck: &Truck) -> Result<(), StoreError> {
        let mut trucks = self.trucks.write();
        if plate_taken(&trucks, &truck.license_plate, truck.id) {
            return Err(StoreError::DuplicatePlate(truck.license_plate.clone()));
        }
        let slot = trucks
            .iter_mut()
            .find(|existing| existing.id == truck.id)
            .ok_or(StoreError::NotFound {
                entity: "truck",
                id: truck.id,
            })?;
        *slot = truck.clone();
        Ok(())
    }

    async fn delete(&self, id: TruckId) -> Result<Option<Truck>, StoreError> {
        let mut trucks = self.trucks.write();
        Ok(trucks
            .iter()
            .position(|truck| truck.id == id)
            .map(|index| trucks.remove(index)))
    }
}

// ============================================================================
// Seeding
// ============================================================================

/// Seed file contents: the same payloads the create endpoints accept.
#[derive(Debug, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub zones: Vec<NewZone>,
    #[serde(default)]
    pub trucks: Vec<NewTruck>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub zones: usize,
    pub trucks: usize,
}

/// Insert every record from `data`. Stops at the first invalid record.
pub async fn apply_seed<Z, T>(data: SeedData, zones: &Z, trucks: &T) -> Result<SeedSummary, StoreError>
where
    Z: ZoneStore + ?Sized,
    T: TruckStore + ?Sized,
{
    let mut summary = SeedSummary { zones: 0, trucks: 0 };

    for payload in data.zones {
        let zone = payload
            .into_zone()
            .map_err(|reason| StoreError::InvalidRecord { entity: "zone", reason })?;
        zones.insert(zone).await?;
        summary.zones += 1;
    }

    for payload in data.trucks {
        let truck = payload
            .into_truck()
            .map_err(|reason| StoreError::InvalidRecord { entity: "truck", reason })?;
        trucks.insert(truck).await?;
        summary.trucks += 1;
    }

    Ok(summary)
}

pub async fn load_seed_file<Z, T>(path: impl AsRef<Path>, zones: &Z, trucks: &T) -> Result<SeedSummary, StoreError>
where
    Z: ZoneStore + ?Sized,
    T: TruckStore + ?Sized,
{
    let bytes = tokio::fs::read(path.as_ref()).await?;
    let data: SeedData = serde_json::from_slice(&bytes)?;
    apply_seed(data, zones, trucks).await
}

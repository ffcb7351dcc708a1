//! Fleet records and route-planning result types.
//!
//! JSON field names are camelCase to match the dashboard's existing
//! payloads (`licensePlate`, `predictedWasteKg`, `assignedTruck`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinate;
use crate::traits::Located;

pub type ZoneId = Uuid;
pub type TruckId = Uuid;

/// A collection area with pending citizen complaints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub coordinates: Coordinate,
    pub complaints: u32,
    pub predicted_waste_kg: f64,
    /// Truck currently routed through this zone. At most one at a time.
    pub assigned_truck: Option<TruckId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Zone {
    pub fn new(name: impl Into<String>, coordinates: Coordinate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coordinates,
            complaints: 0,
            predicted_waste_kg: 0.0,
            assigned_truck: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_complaints(mut self, complaints: u32) -> Self {
        self.complaints = complaints;
        self
    }

    pub fn with_predicted_waste(mut self, kg: f64) -> Self {
        self.predicted_waste_kg = kg;
        self
    }

    /// Pending complaints and nobody assigned yet.
    pub fn is_eligible(&self) -> bool {
        self.complaints > 0 && self.assigned_truck.is_none()
    }
}

impl Located for Zone {
    fn coordinates(&self) -> Coordinate {
        self.coordinates
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TruckStatus {
    #[default]
    Available,
    Idle,
    OnRoute,
    Assigned,
    Maintenance,
    Full,
}

impl std::fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Available => "available",
            Self::Idle => "idle",
            Self::OnRoute => "on-route",
            Self::Assigned => "assigned",
            Self::Maintenance => "maintenance",
            Self::Full => "full",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: TruckId,
    pub name: String,
    pub license_plate: String,
    pub capacity_kg: f64,
    pub current_load_kg: f64,
    pub status: TruckStatus,
    /// Single-zone assignment made by hand from the dashboard.
    pub assigned_zone: Option<ZoneId>,
    /// Ordered stops written by the route planner.
    #[serde(default)]
    pub assigned_zones: Vec<ZoneId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Truck {
    pub fn new(name: impl Into<String>, license_plate: impl Into<String>, capacity_kg: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            license_plate: license_plate.into(),
            capacity_kg,
            current_load_kg: 0.0,
            status: TruckStatus::default(),
            assigned_zone: None,
            assigned_zones: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: TruckStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_idle(&self) -> bool {
        self.status == TruckStatus::Idle
    }
}

// ============================================================================
// Store filters
// ============================================================================

/// Zone query. The default matches every zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneFilter {
    pub pending_only: bool,
    pub unassigned_only: bool,
}

impl ZoneFilter {
    /// Zones the planner may route: complaints > 0 and no assigned truck.
    pub fn eligible() -> Self {
        Self {
            pending_only: true,
            unassigned_only: true,
        }
    }

    pub fn matches(&self, zone: &Zone) -> bool {
        (!self.pending_only || zone.complaints > 0)
            && (!self.unassigned_only || zone.assigned_truck.is_none())
    }
}

/// Truck query. The default matches every truck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TruckFilter {
    pub status: Option<TruckStatus>,
}

impl TruckFilter {
    pub fn idle() -> Self {
        Self {
            status: Some(TruckStatus::Idle),
        }
    }

    pub fn matches(&self, truck: &Truck) -> bool {
        self.status.is_none_or(|status| truck.status == status)
    }
}

// ============================================================================
// Create / update payloads
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewZone {
    pub name: Option<String>,
    pub coordinates: Option<Coordinate>,
    pub complaints: Option<u32>,
    pub predicted_waste_kg: Option<f64>,
}

impl NewZone {
    /// Build the record, or say which required field is missing.
    pub fn into_zone(self) -> Result<Zone, String> {
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or("name is required")?;
        let coordinates = self.coordinates.ok_or("coordinates are required")?;
        if !coordinates.is_finite() {
            return Err("coordinates must be finite numbers".to_string());
        }

        Ok(Zone::new(name, coordinates)
            .with_complaints(self.complaints.unwrap_or(0))
            .with_predicted_waste(self.predicted_waste_kg.unwrap_or(0.0)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneUpdate {
    pub name: Option<String>,
    pub coordinates: Option<Coordinate>,
    pub complaints: Option<u32>,
    pub predicted_waste_kg: Option<f64>,
}

impl ZoneUpdate {
    pub fn apply(self, zone: &mut Zone) {
        if let Some(name) = self.name {
            zone.name = name;
        }
        if let Some(coordinates) = self.coordinates {
            zone.coordinates = coordinates;
        }
        if let Some(complaints) = self.complaints {
            zone.complaints = complaints;
        }
        if let Some(kg) = self.predicted_waste_kg {
            zone.predicted_waste_kg = kg;
        }
        zone.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTruck {
    pub name: Option<String>,
    pub license_plate: Option<String>,
    pub capacity_kg: Option<f64>,
    pub status: Option<TruckStatus>,
    pub current_load_kg: Option<f64>,
}

impl NewTruck {
    pub fn into_truck(self) -> Result<Truck, String> {
        let missing = || "name, capacityKg and licensePlate are required".to_string();

        let name = self.name.filter(|s| !s.trim().is_empty()).ok_or_else(missing)?;
        let plate = self
            .license_plate
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(missing)?;
        let capacity = self.capacity_kg.filter(|kg| *kg > 0.0).ok_or_else(missing)?;

        let mut truck = Truck::new(name, plate, capacity).with_status(self.status.unwrap_or_default());
        truck.current_load_kg = self.current_load_kg.unwrap_or(0.0);
        Ok(truck)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckUpdate {
    pub name: Option<String>,
    pub license_plate: Option<String>,
    pub capacity_kg: Option<f64>,
    pub current_load_kg: Option<f64>,
    pub status: Option<TruckStatus>,
}

impl TruckUpdate {
    /// Apply the present fields. Rejects the same values creation does
    /// (blank name or plate, non-positive capacity) and leaves `truck`
    /// untouched in that case.
    pub fn apply(self, truck: &mut Truck) -> Result<(), String> {
        if self.name.as_ref().is_some_and(|name| name.trim().is_empty()) {
            return Err("name must not be empty".to_string());
        }
        if self.license_plate.as_ref().is_some_and(|plate| plate.trim().is_empty()) {
            return Err("licensePlate must not be empty".to_string());
        }
        if self.capacity_kg.is_some_and(|kg| kg.is_nan() || kg <= 0.0) {
            return Err("capacityKg must be greater than 0".to_string());
        }

        if let Some(name) = self.name {
            truck.name = name;
        }
        if let Some(plate) = self.license_plate {
            truck.license_plate = plate;
        }
        if let Some(kg) = self.capacity_kg {
            truck.capacity_kg = kg;
        }
        if let Some(kg) = self.current_load_kg {
            truck.current_load_kg = kg;
        }
        if let Some(status) = self.status {
            truck.status = status;
        }
        truck.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================================
// Routing results
// ============================================================================

/// One travel segment between consecutive waypoints, as reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub distance_km: f64,
    pub duration_min: f64,
}

impl RouteLeg {
    /// Convert raw meters/seconds, rounded to two decimals.
    pub fn from_meters_seconds(meters: f64, seconds: f64) -> Self {
        Self {
            distance_km: crate::geo::round2(meters / 1000.0),
            duration_min: crate::geo::round2(seconds / 60.0),
        }
    }
}

/// A zone on a truck's tour together with the leg that reaches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub zone_id: ZoneId,
    pub zone_name: String,
    pub complaints: u32,
    pub predicted_waste_kg: f64,
    pub coordinates: Coordinate,
    pub distance_km: f64,
    pub duration_min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckRoute {
    pub truck_id: TruckId,
    pub truck_name: String,
    #[serde(rename = "routeZones")]
    pub stops: Vec<RouteStop>,
    /// Sum of the stop legs. The return leg to the depot is not included.
    pub total_distance_km: f64,
    pub total_waste_kg: f64,
    pub estimated_time_min: f64,
}

impl TruckRoute {
    pub fn zone_ids(&self) -> Vec<ZoneId> {
        self.stops.iter().map(|stop| stop.zone_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_eligibility() {
        let zone = Zone::new("Koramangala", Coordinate::new(77.6412, 12.9340));
        assert!(!zone.is_eligible(), "no complaints means nothing to collect");

        let mut zone = zone.with_complaints(3);
        assert!(zone.is_eligible());

        zone.assigned_truck = Some(Uuid::new_v4());
        assert!(!zone.is_eligible(), "already claimed by a truck");
    }

    #[test]
    fn test_eligible_filter_matches_is_eligible() {
        let filter = ZoneFilter::eligible();
        let pending = Zone::new("a", Coordinate::new(0.0, 0.0)).with_complaints(1);
        let mut claimed = pending.clone();
        claimed.assigned_truck = Some(Uuid::new_v4());
        let quiet = Zone::new("b", Coordinate::new(0.0, 0.0));

        assert!(filter.matches(&pending));
        assert!(!filter.matches(&claimed));
        assert!(!filter.matches(&quiet));
        assert!(ZoneFilter::default().matches(&quiet));
    }

    #[test]
    fn test_truck_status_wire_names() {
        let json = serde_json::to_string(&TruckStatus::OnRoute).unwrap();
        assert_eq!(json, "\"on-route\"");
        let status: TruckStatus = serde_json::from_str("\"idle\"").unwrap();
        assert_eq!(status, TruckStatus::Idle);
        assert_eq!(TruckStatus::OnRoute.to_string(), "on-route");
    }

    #[test]
    fn test_idle_filter() {
        let idle = Truck::new("Truck 1", "KA01AB1111", 500.0).with_status(TruckStatus::Idle);
        let busy = Truck::new("Truck 4", "KA01AB4444", 450.0).with_status(TruckStatus::OnRoute);
        assert!(TruckFilter::idle().matches(&idle));
        assert!(!TruckFilter::idle().matches(&busy));
        assert!(TruckFilter::default().matches(&busy));
    }

    #[test]
    fn test_new_truck_requires_fields() {
        let payload = NewTruck {
            name: Some("Truck 1".into()),
            license_plate: None,
            capacity_kg: Some(500.0),
            status: None,
            current_load_kg: None,
        };
        assert!(payload.into_truck().is_err());

        let payload = NewTruck {
            name: Some("Truck 1".into()),
            license_plate: Some("KA01AB1111".into()),
            capacity_kg: Some(500.0),
            status: None,
            current_load_kg: None,
        };
        let truck = payload.into_truck().unwrap();
        assert_eq!(truck.status, TruckStatus::Available);
        assert_eq!(truck.current_load_kg, 0.0);
    }

    #[test]
    fn test_truck_update_rejects_what_create_rejects() {
        let mut truck = Truck::new("Truck 1", "KA01AB1111", 500.0);
        let before = truck.clone();

        let zero = TruckUpdate {
            capacity_kg: Some(0.0),
            ..TruckUpdate::default()
        };
        assert!(zero.apply(&mut truck).is_err());

        let blank = TruckUpdate {
            license_plate: Some("  ".into()),
            status: Some(TruckStatus::Idle),
            ..TruckUpdate::default()
        };
        assert!(blank.apply(&mut truck).is_err());
        assert_eq!(truck, before, "a rejected update changes nothing");

        let ok = TruckUpdate {
            capacity_kg: Some(650.0),
            ..TruckUpdate::default()
        };
        ok.apply(&mut truck).unwrap();
        assert_eq!(truck.capacity_kg, 650.0);
    }

    #[test]
    fn test_new_zone_defaults() {
        let payload: NewZone =
            serde_json::from_str(r#"{"name":"Jayanagar","coordinates":[77.5946,12.925]}"#).unwrap();
        let zone = payload.into_zone().unwrap();
        assert_eq!(zone.complaints, 0);
        assert_eq!(zone.predicted_waste_kg, 0.0);
        assert!(zone.assigned_truck.is_none());
    }

    #[test]
    fn test_leg_unit_conversion() {
        let leg = RouteLeg::from_meters_seconds(5234.0, 611.0);
        assert_eq!(leg.distance_km, 5.23);
        assert_eq!(leg.duration_min, 10.18);
    }

    #[test]
    fn test_truck_route_serializes_route_zones() {
        let route = TruckRoute {
            truck_id: Uuid::nil(),
            truck_name: "Truck 1".into(),
            stops: Vec::new(),
            total_distance_km: 0.0,
            total_waste_kg: 0.0,
            estimated_time_min: 0.0,
        };
        let value = serde_json::to_value(&route).unwrap();
        assert!(value.get("routeZones").is_some());
        assert!(value.get("totalDistanceKm").is_some());
    }
}

//! Real Bengaluru neighbourhoods used as collection zones.
//!
//! Coordinates are neighbourhood centroids from OpenStreetMap, (lng, lat).

use waste_router::geo::Coordinate;
use waste_router::model::{Truck, TruckStatus, Zone};

/// A named collection area.
#[derive(Debug, Clone)]
pub struct Area {
    pub name: &'static str,
    pub lng: f64,
    pub lat: f64,
    pub waste_kg: f64,
}

impl Area {
    pub const fn new(name: &'static str, lng: f64, lat: f64, waste_kg: f64) -> Self {
        Self {
            name,
            lng,
            lat,
            waste_kg,
        }
    }

    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.lng, self.lat)
    }

    /// An eligible zone: one pending complaint, unassigned.
    pub fn zone(&self) -> Zone {
        Zone::new(self.name, self.coords())
            .with_complaints(1)
            .with_predicted_waste(self.waste_kg)
    }
}

/// MG Road, the default depot.
pub const DEPOT: Coordinate = Coordinate::new(77.5946, 12.9716);

pub const AREAS: &[Area] = &[
    Area::new("Koramangala", 77.6412, 12.9340, 120.0),
    Area::new("Indiranagar", 77.6406, 12.9716, 100.0),
    Area::new("Whitefield", 77.7480, 12.9698, 90.0),
    Area::new("Malleshwaram", 77.5672, 13.0104, 130.0),
    Area::new("Jayanagar", 77.5946, 12.9250, 110.0),
    Area::new("Banaswadi", 77.6281, 13.0220, 80.0),
    Area::new("HSR Layout", 77.6416, 12.9121, 95.0),
    Area::new("Yelahanka", 77.5938, 13.0846, 60.0),
    Area::new("Rajajinagar", 77.5550, 12.9976, 105.0),
    Area::new("Electronic City", 77.6556, 12.8442, 115.0),
    Area::new("Hebbal", 77.5970, 13.0358, 85.0),
    Area::new("BTM Layout", 77.6101, 12.9166, 100.0),
    Area::new("Marathahalli", 77.6974, 12.9569, 95.0),
    Area::new("Basavanagudi", 77.5737, 12.9422, 90.0),
    Area::new("Yeshwanthpur", 77.5540, 13.0280, 75.0),
];

pub fn zones(count: usize) -> Vec<Zone> {
    AREAS.iter().cycle().take(count).map(Area::zone).collect()
}

pub fn idle_trucks(count: usize) -> Vec<Truck> {
    (1..=count)
        .map(|n| {
            Truck::new(format!("Truck {n}"), format!("KA01AB{n:04}"), 500.0).with_status(TruckStatus::Idle)
        })
        .collect()
}

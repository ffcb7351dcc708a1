//! waste-router core
//!
//! Plans collection-truck routes over zones with pending waste complaints:
//! stop-count partitioning, nearest-neighbor sequencing, real leg distances
//! from a driving-route oracle, and per-truck commits.

pub mod api;
pub mod config;
pub mod error;
pub mod geo;
pub mod haversine;
pub mod memory;
pub mod model;
pub mod osrm;
pub mod partition;
pub mod planner;
pub mod tour;
pub mod traits;

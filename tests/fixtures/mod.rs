//! Test fixtures for waste-router.
//!
//! Provides real Bengaluru collection zones plus a scripted routing oracle.

#![allow(dead_code)]

pub mod bengaluru_zones;
pub mod oracle;

pub use bengaluru_zones::*;
pub use oracle::*;

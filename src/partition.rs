//! Splits eligible zones across idle trucks by stop count.
//!
//! Truck payload capacity is not consulted: each truck gets
//! `min(cap, ceil(remaining_zones / remaining_trucks))` zones taken from the
//! front of the list, recomputed per truck.

/// Default hard cap on stops per truck per planning run.
pub const DEFAULT_MAX_ZONES_PER_TRUCK: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    /// One entry per truck that received zones, in truck order. Never
    /// contains an empty allocation.
    pub allocations: Vec<Vec<T>>,
    /// Zones left over once every truck was served.
    pub leftover: Vec<T>,
}

/// How many zones the next truck takes.
pub fn allocation_size(remaining_zones: usize, remaining_trucks: usize, cap: usize) -> usize {
    if remaining_trucks == 0 {
        return 0;
    }
    remaining_zones.div_ceil(remaining_trucks).min(cap.max(1))
}

/// Partition `zones` (in query order) across `truck_count` trucks.
///
/// Stops early when zones run out, so later trucks get nothing. If trucks
/// run out first, the rest go to `leftover`.
pub fn partition<T>(zones: Vec<T>, truck_count: usize, cap: usize) -> Partition<T> {
    let mut remaining = zones.into_iter();
    let mut remaining_len = remaining.len();
    let mut allocations = Vec::with_capacity(truck_count.min(remaining_len));

    for served in 0..truck_count {
        if remaining_len == 0 {
            break;
        }
        let take = allocation_size(remaining_len, truck_count - served, cap);
        allocations.push(remaining.by_ref().take(take).collect());
        remaining_len -= take;
    }

    Partition {
        allocations,
        leftover: remaining.collect(),
    }
}

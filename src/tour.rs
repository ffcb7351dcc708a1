//! Greedy nearest-neighbor tour construction.

use crate::geo::Coordinate;
use crate::traits::Located;

/// Order `stops` by repeatedly walking to the nearest unvisited one,
/// starting from `start`.
///
/// Returns indices into `stops`. Ties go to the stop that appears first in
/// the input, so the result is a pure function of its arguments. O(n^2),
/// which is fine for the handful of stops a single truck gets.
pub fn nearest_neighbor_order<T: Located>(start: Coordinate, stops: &[T]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..stops.len()).collect();
    let mut order = Vec::with_capacity(stops.len());
    let mut current = start;

    while !remaining.is_empty() {
        let mut best_slot = 0;
        let mut best_distance = f64::INFINITY;

        for (slot, &index) in remaining.iter().enumerate() {
            let distance = current.euclidean_to(&stops[index].coordinates());
            if distance < best_distance {
                best_distance = distance;
                best_slot = slot;
            }
        }

        // `remove` keeps the input order of the rest, which the tie-break relies on.
        let next = remaining.remove(best_slot);
        current = stops[next].coordinates();
        order.push(next);
    }

    order
}

/// Same as [`nearest_neighbor_order`], returning the stops themselves.
pub fn nearest_neighbor<T: Located + Clone>(start: Coordinate, stops: &[T]) -> Vec<T> {
    nearest_neighbor_order(start, stops)
        .into_iter()
        .map(|index| stops[index].clone())
        .collect()
}

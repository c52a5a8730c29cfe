//! Coordinate-to-actor matching strategies.
//!
//! The tracker matches by nearest neighbor, but the strategy is a trait so
//! that a globally optimal assignment (e.g. min-cost bipartite) can be
//! swapped in without touching actor or grid code.

use crate::point::Point3;

/// Assigns each query point a target point.
///
/// Thresholding is deliberately left to the caller: a strategy only ranks
/// candidates by distance, the tracker decides what distance is acceptable.
pub trait MatchingStrategy: Send + Sync {
    /// For each query, the chosen target index and its Euclidean distance.
    ///
    /// Returns one entry per query, `None` only when `targets` is empty.
    fn assign(&self, queries: &[Point3], targets: &[Point3]) -> Vec<Option<(usize, f64)>>;
}

/// Default matching behavior: every query independently takes its nearest
/// target, ties broken by the first candidate encountered.
///
/// Two queries may claim the same target; this is not a bipartite
/// assignment and is kept that way on purpose.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyNearestNeighbor;

impl MatchingStrategy for GreedyNearestNeighbor {
    fn assign(&self, queries: &[Point3], targets: &[Point3]) -> Vec<Option<(usize, f64)>> {
        queries
            .iter()
            .map(|query| nearest(query, targets))
            .collect()
    }
}

/// Index and distance of the target nearest to `query`, first index wins on
/// ties. `None` iff `targets` is empty.
pub fn nearest(query: &Point3, targets: &[Point3]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, target) in targets.iter().enumerate() {
        let dist = query.distance_to(target);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best
}

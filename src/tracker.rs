//! Frame-to-frame identity-preserving tracker.
//!
//! Each frame the manager receives an unordered list of detected points and
//! no identity hints. It matches points to its live actors by nearest
//! neighbor, choosing one of three behaviors depending on whether the frame
//! carries more, fewer, or as many points as there are actors.

use tracing::debug;

use crate::actor::Actor;
use crate::matching::{GreedyNearestNeighbor, MatchingStrategy};
use crate::point::Point3;

/// Tracker tuning values.
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// Maximum distance for a coordinate to move an existing actor.
    pub distance_threshold: f64,

    /// Frames an unmatched actor survives before removal. Zero drops an
    /// unmatched actor on the first missed frame.
    pub grace_frames: u32,
}

impl TrackerConfig {
    pub fn new(distance_threshold: f64) -> Self {
        Self {
            distance_threshold,
            grace_frames: 0,
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Maintains the live actor set across frames.
pub struct ActorManager {
    config: TrackerConfig,
    actors: Vec<Actor>,
    strategy: Box<dyn MatchingStrategy>,
    next_id: u32,
}

impl ActorManager {
    /// Create a manager using the default greedy nearest-neighbor matching.
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_strategy(config, Box::new(GreedyNearestNeighbor))
    }

    /// Create a manager with a custom matching strategy.
    pub fn with_strategy(config: TrackerConfig, strategy: Box<dyn MatchingStrategy>) -> Self {
        Self {
            config,
            actors: Vec::new(),
            strategy,
            next_id: 0,
        }
    }

    /// The live actor set, in creation/match order.
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Ingest one frame of detected coordinates.
    ///
    /// More coordinates than actors: each actor independently moves to its
    /// nearest coordinate when within threshold, and every coordinate left
    /// unclaimed spawns a new actor at rest. Fewer coordinates: each
    /// coordinate takes its nearest actor, and actors left unmatched are
    /// dropped once they exceed the grace window. Equal counts: each
    /// coordinate moves its nearest actor when within threshold, otherwise
    /// both sides stay as they were.
    ///
    /// Matching is per-query nearest neighbor, not a bipartite assignment:
    /// in the growth case two actors can move onto the same coordinate.
    pub fn update(&mut self, coordinates: &[Point3]) {
        if coordinates.len() > self.actors.len() {
            self.grow(coordinates);
        } else if coordinates.len() < self.actors.len() {
            self.shrink(coordinates);
        } else {
            self.track_equal(coordinates);
        }
    }

    fn grow(&mut self, coordinates: &[Point3]) {
        let locations: Vec<Point3> = self.actors.iter().map(|a| a.location).collect();
        let assignments = self.strategy.assign(&locations, coordinates);

        let mut claimed = vec![false; coordinates.len()];
        for (actor, assignment) in self.actors.iter_mut().zip(assignments) {
            if let Some((idx, dist)) = assignment {
                if dist <= self.config.distance_threshold {
                    actor.moved(coordinates[idx]);
                    claimed[idx] = true;
                }
            }
        }

        for (idx, coordinate) in coordinates.iter().enumerate() {
            if !claimed[idx] {
                let actor = Actor::new(self.next_id, *coordinate);
                debug!(id = actor.id, "new actor");
                self.next_id += 1;
                self.actors.push(actor);
            }
        }
    }

    fn shrink(&mut self, coordinates: &[Point3]) {
        let locations: Vec<Point3> = self.actors.iter().map(|a| a.location).collect();
        let assignments = self.strategy.assign(coordinates, &locations);

        let mut matched = vec![false; self.actors.len()];
        let mut survivors: Vec<Actor> = Vec::with_capacity(coordinates.len());
        for (coordinate, assignment) in coordinates.iter().zip(assignments) {
            let Some((idx, _)) = assignment else { continue };
            if matched[idx] {
                // Two coordinates picked the same actor; the first claim
                // already moved it, the later coordinate goes unused.
                continue;
            }
            matched[idx] = true;
            let mut actor = self.actors[idx].clone();
            actor.moved(*coordinate);
            survivors.push(actor);
        }

        for (idx, actor) in self.actors.iter_mut().enumerate() {
            if matched[idx] {
                continue;
            }
            actor.missed_frames += 1;
            if actor.missed_frames <= self.config.grace_frames {
                survivors.push(actor.clone());
            } else {
                debug!(id = actor.id, "actor dropped");
            }
        }

        self.actors = survivors;
    }

    fn track_equal(&mut self, coordinates: &[Point3]) {
        let locations: Vec<Point3> = self.actors.iter().map(|a| a.location).collect();
        let assignments = self.strategy.assign(coordinates, &locations);

        for (coordinate, assignment) in coordinates.iter().zip(assignments) {
            if let Some((idx, dist)) = assignment {
                if dist <= self.config.distance_threshold {
                    self.actors[idx].moved(*coordinate);
                }
            }
        }
    }
}

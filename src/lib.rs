//! # Occutrack - Occupancy Grids & Subject Tracking
//!
//! Turns per-frame raw point detections from a depth/image sensor into a
//! calibrated occupancy grid (top view and side view) and into persistent
//! per-subject tracks carrying position, velocity and acceleration. Built
//! for interactive installations where people in a monitored volume must be
//! located and followed in real time.
//!
//! Blob/contour segmentation, sensor capture, rendering and message
//! transport live outside this crate; it consumes already-computed blob
//! centroids and produces bitmaps and tracks for those collaborators.
//!
//! ## Example
//!
//! ```rust,ignore
//! use occutrack::{ActorManager, GridConfig, OccupancyGrid, Point3, TrackerConfig};
//!
//! let mut grid = OccupancyGrid::new(GridConfig::default()).unwrap();
//! let mut tracker = ActorManager::new(TrackerConfig::default());
//!
//! // One capture tick: rasterize and track the frame's detections.
//! let detections = vec![Point3::new(320.0, 240.0, 227.0)];
//! grid.update(&detections);
//! tracker.update(&detections);
//! ```
//!
//! The grid and the tracker are independent consumers of the same point
//! stream; neither feeds the other. Everything is single-threaded and
//! frame-driven: one `update` per capture tick, no work spans frames.

pub mod actor;
pub mod calibration;
pub mod grid;
pub mod matching;
pub mod point;
pub mod tracker;
pub mod warp;

// Re-exports for convenience
pub use actor::Actor;
pub use calibration::{CalibrationRange, GridConfig, WarpCalibration};
pub use grid::{OccupancyGrid, EMPTY, OCCUPIED};
pub use matching::{GreedyNearestNeighbor, MatchingStrategy};
pub use point::Point3;
pub use tracker::{ActorManager, TrackerConfig};
pub use warp::WarpTable;

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur while building grids and warp tables.
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Degenerate calibration range: min {min} must be below max {max}")]
        DegenerateRange { min: f64, max: f64 },
    }

    /// Result type for occutrack operations.
    pub type Result<T> = std::result::Result<T, Error>;
}

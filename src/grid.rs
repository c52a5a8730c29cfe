//! Occupancy grid rasterizer.
//!
//! Each frame's detections are rescaled into grid units, rectified through
//! the warp table, and written into two orthogonal bitmaps: a top view
//! (height x width) and a side view (depth levels x width). The grid is
//! rebuilt in full on every update; there is no temporal smoothing, so a
//! missed detection shows up as a one-frame gap. That is the intended
//! behavior for the installation, not something to paper over here.

use nalgebra::DMatrix;
use tracing::trace;

use crate::calibration::GridConfig;
use crate::point::Point3;
use crate::warp::WarpTable;
use crate::Result;

/// Cell value for a location with no detection.
pub const EMPTY: u8 = 255;

/// Cell value for a location holding a detection.
pub const OCCUPIED: u8 = 0;

/// Two-view occupancy raster over the sensor's calibrated working volume.
pub struct OccupancyGrid {
    config: GridConfig,
    /// (height x width), vertical slice facing the sensor.
    top_view: DMatrix<u8>,
    /// (depth_levels x width), top-down floor plan.
    side_view: DMatrix<u8>,
    warper: WarpTable,
    rejected: usize,
}

impl OccupancyGrid {
    /// Create a grid for the given configuration.
    ///
    /// Builds the internal warp table sized (depth_levels x width); fails
    /// only on degenerate configuration.
    pub fn new(config: GridConfig) -> Result<Self> {
        let warper = WarpTable::new(config.width, config.depth_levels, &config.warp)?;
        Ok(Self {
            top_view: DMatrix::from_element(config.height, config.width, EMPTY),
            side_view: DMatrix::from_element(config.depth_levels, config.width, EMPTY),
            warper,
            rejected: 0,
            config,
        })
    }

    /// Linearly rescale a raw sensor point into grid units.
    ///
    /// Returns `None` when any rescaled coordinate falls on or outside the
    /// grid edge (open-interval check, so edge points never produce an
    /// out-of-bounds write). A raw `z` of exactly 0 means the producing
    /// capture had no depth channel; such points land in the last depth bin
    /// instead of being dropped.
    pub fn rescale_point(&self, point: Point3) -> Option<Point3> {
        let cfg = &self.config;
        let r_x = (point.x - cfg.width_range.min()) * cfg.width as f64 / cfg.width_range.span();
        let r_y = (point.y - cfg.height_range.min()) * cfg.height as f64 / cfg.height_range.span();
        let mut r_z =
            (point.z - cfg.depth_range.min()) * cfg.depth_levels as f64 / cfg.depth_range.span();

        if point.z == 0.0 {
            r_z = (cfg.depth_levels - 1) as f64;
        } else if r_z <= 0.0 || r_z >= cfg.depth_levels as f64 {
            return None;
        }
        if r_x <= 0.0 || r_x >= cfg.width as f64 {
            return None;
        }
        if r_y <= 0.0 || r_y >= cfg.height as f64 {
            return None;
        }
        Some(Point3::new(r_x, r_y, r_z))
    }

    /// Rasterize one frame's detections.
    ///
    /// Both bitmaps are cleared first, then every point that survives
    /// [`rescale_point`](Self::rescale_point) is warped and written into the
    /// side view and the top view. Out-of-range points are dropped silently;
    /// the per-call count is available from
    /// [`rejected_points`](Self::rejected_points).
    pub fn update(&mut self, points: &[Point3]) {
        self.top_view.fill(EMPTY);
        self.side_view.fill(EMPTY);
        self.rejected = 0;

        for point in points {
            let Some(rescaled) = self.rescale_point(*point) else {
                self.rejected += 1;
                trace!(x = point.x, y = point.y, z = point.z, "point outside grid, dropped");
                continue;
            };
            // Rescaled coordinates are strictly inside (0, size), so
            // truncation gives a valid cell index.
            let (warped_z, warped_x) = self
                .warper
                .get_coords(rescaled.z as usize, rescaled.x as usize);
            let grid_x = (warped_x * (self.config.width - 1) as f64).round() as usize;
            let grid_z = (warped_z * (self.config.depth_levels - 1) as f64).round() as usize;
            let grid_y = rescaled.y as usize;
            self.side_view[(grid_z, grid_x)] = OCCUPIED;
            self.top_view[(grid_y, grid_x)] = OCCUPIED;
        }
    }

    /// Inverse-map the occupied cells back to normalized [0, 1] coordinates.
    ///
    /// Side-view cells supply x and z, top-view cells supply y, paired in
    /// row-major scan order. Useful for exporting the frame independently of
    /// the detections that produced it.
    pub fn points_snapshot(&self) -> Vec<Point3> {
        let side = occupied_cells(&self.side_view);
        let top = occupied_cells(&self.top_view);
        side.iter()
            .zip(top.iter())
            .map(|(&(z_row, x_col), &(y_row, _))| {
                Point3::new(
                    x_col as f64 / self.config.width as f64,
                    y_row as f64 / self.config.height as f64,
                    z_row as f64 / self.config.depth_levels as f64,
                )
            })
            .collect()
    }

    /// Number of points dropped by the most recent [`update`](Self::update).
    pub fn rejected_points(&self) -> usize {
        self.rejected
    }

    /// The (height x width) vertical-slice bitmap.
    pub fn top_view(&self) -> &DMatrix<u8> {
        &self.top_view
    }

    /// The (depth_levels x width) top-down bitmap.
    pub fn side_view(&self) -> &DMatrix<u8> {
        &self.side_view
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}

/// Occupied cell coordinates in row-major order.
fn occupied_cells(view: &DMatrix<u8>) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for row in 0..view.nrows() {
        for col in 0..view.ncols() {
            if view[(row, col)] == OCCUPIED {
                cells.push((row, col));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{CalibrationRange, GridConfig, WarpCalibration};

    fn test_config() -> GridConfig {
        GridConfig::new(
            640,
            480,
            480,
            CalibrationRange::new(0.0, 640.0).unwrap(),
            CalibrationRange::new(0.0, 480.0).unwrap(),
            CalibrationRange::new(200.0, 254.0).unwrap(),
            WarpCalibration::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_rescale_inside_volume() {
        let grid = OccupancyGrid::new(test_config()).unwrap();
        let rescaled = grid.rescale_point(Point3::new(320.0, 240.0, 227.0)).unwrap();
        assert_eq!(rescaled.x, 320.0);
        assert_eq!(rescaled.y, 240.0);
        assert_eq!(rescaled.z, 240.0);
    }

    #[test]
    fn test_rescale_rejects_edges() {
        let grid = OccupancyGrid::new(test_config()).unwrap();
        // Exactly on the lower width edge.
        assert!(grid.rescale_point(Point3::new(0.0, 240.0, 227.0)).is_none());
        // On the upper height edge.
        assert!(grid.rescale_point(Point3::new(320.0, 480.0, 227.0)).is_none());
        // Beyond the depth range.
        assert!(grid.rescale_point(Point3::new(320.0, 240.0, 300.0)).is_none());
    }

    #[test]
    fn test_zero_depth_lands_in_last_bin() {
        // Image-only captures report z == 0; they must not be dropped.
        let grid = OccupancyGrid::new(test_config()).unwrap();
        let rescaled = grid.rescale_point(Point3::new(320.0, 240.0, 0.0)).unwrap();
        assert_eq!(rescaled.z, 479.0);
    }

    #[test]
    fn test_update_writes_both_views() {
        let mut grid = OccupancyGrid::new(test_config()).unwrap();
        grid.update(&[Point3::new(320.0, 240.0, 227.0)]);

        let top: Vec<_> = occupied_cells(grid.top_view());
        let side: Vec<_> = occupied_cells(grid.side_view());
        assert_eq!(top.len(), 1);
        assert_eq!(side.len(), 1);
        // Same warped column in both views.
        assert_eq!(top[0].1, side[0].1);
        assert_eq!(top[0].0, 240);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut grid = OccupancyGrid::new(test_config()).unwrap();
        let points = [
            Point3::new(100.0, 50.0, 210.0),
            Point3::new(320.0, 240.0, 227.0),
            Point3::new(600.0, 400.0, 250.0),
        ];
        grid.update(&points);
        let top_first = grid.top_view().clone();
        let side_first = grid.side_view().clone();
        grid.update(&points);
        assert_eq!(grid.top_view(), &top_first);
        assert_eq!(grid.side_view(), &side_first);
    }

    #[test]
    fn test_no_ghosting_between_frames() {
        let mut grid = OccupancyGrid::new(test_config()).unwrap();
        grid.update(&[Point3::new(320.0, 240.0, 227.0)]);
        assert_eq!(occupied_cells(grid.side_view()).len(), 1);
        grid.update(&[]);
        assert!(occupied_cells(grid.side_view()).is_empty());
        assert!(occupied_cells(grid.top_view()).is_empty());
    }

    #[test]
    fn test_rejected_counter_resets_per_call() {
        let mut grid = OccupancyGrid::new(test_config()).unwrap();
        grid.update(&[
            Point3::new(-5.0, 240.0, 227.0),
            Point3::new(320.0, 240.0, 227.0),
            Point3::new(320.0, 900.0, 227.0),
        ]);
        assert_eq!(grid.rejected_points(), 2);
        grid.update(&[Point3::new(320.0, 240.0, 227.0)]);
        assert_eq!(grid.rejected_points(), 0);
    }

    #[test]
    fn test_interior_points_stay_in_bounds() {
        // Sweep points strictly inside the calibrated volume; every write
        // must land inside both bitmaps (update panics on out-of-bounds).
        let mut grid = OccupancyGrid::new(test_config()).unwrap();
        let mut points = Vec::new();
        for xi in 1..8 {
            for yi in 1..8 {
                for zi in 1..8 {
                    points.push(Point3::new(
                        xi as f64 * 640.0 / 8.0,
                        yi as f64 * 480.0 / 8.0,
                        200.0 + zi as f64 * 54.0 / 8.0,
                    ));
                }
            }
        }
        grid.update(&points);
        assert_eq!(grid.rejected_points(), 0);
    }

    #[test]
    fn test_snapshot_normalized() {
        let mut grid = OccupancyGrid::new(test_config()).unwrap();
        grid.update(&[Point3::new(320.0, 240.0, 227.0)]);
        let snapshot = grid.points_snapshot();
        assert_eq!(snapshot.len(), 1);
        let p = snapshot[0];
        assert!((0.0..1.0).contains(&p.x));
        assert!((0.0..1.0).contains(&p.y));
        assert!((0.0..1.0).contains(&p.z));
        assert_eq!(p.y, 0.5);
    }
}

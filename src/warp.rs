//! Angular warp correction for a wide-angle depth sensor.
//!
//! The sensor sees a trapezoidal slice of the floor: a row of pixels near
//! the sensor spans less real-world width than a row at the far edge. The
//! warp table precomputes, for every (depth row, width column) cell of the
//! output grid, the rectified top-down coordinate pair normalized to [0, 1].
//! Construction is the only expensive step; lookups are O(1) and the table
//! is immutable afterwards, so it can be shared read-only across threads.

use nalgebra::DMatrix;
use crate::calibration::WarpCalibration;
use crate::{Error, Result};

/// Precomputed rectification lookup, dimensioned (rows = depth resolution,
/// cols = width resolution).
#[derive(Debug, Clone)]
pub struct WarpTable {
    width: usize,
    height: usize,
    norm_x: DMatrix<f64>,
    norm_y: DMatrix<f64>,
}

/// Inclusive-endpoint linear interpolation across `n` samples. A single
/// sample sits at `start`.
fn lerp_step(start: f64, end: f64, n: usize) -> impl Fn(usize) -> f64 {
    let step = if n > 1 {
        (end - start) / (n - 1) as f64
    } else {
        0.0
    };
    move |i| start + step * i as f64
}

impl WarpTable {
    /// Build the lookup for the given output resolution and calibration.
    ///
    /// Fails if `width` or `height` is zero; the calibration value is
    /// already validated at its own construction.
    pub fn new(width: usize, height: usize, calibration: &WarpCalibration) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(format!(
                "warp table dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let cal = *calibration;
        let xb_span = cal.xb_max - cal.xb_min;
        let y_span = cal.y_max - cal.y_min;

        // Viewing angle per column: the horizontal extent at the far edge,
        // seen from the sensor origin.
        let xb_at = lerp_step(cal.xb_min, cal.xb_max, width);
        let angles: Vec<f64> = (0..width).map(|c| (xb_at(c) / cal.y_max).atan()).collect();

        // Real depth per row, broadcast across columns.
        let y_at = lerp_step(cal.y_min, cal.y_max, height);

        let norm_x = DMatrix::from_fn(height, width, |r, c| {
            let x = y_at(r) * angles[c].tan();
            ((x - cal.xb_min) / xb_span).clamp(0.0, 1.0)
        });
        let norm_y = DMatrix::from_fn(height, width, |r, _| {
            ((y_at(r) - cal.y_min) / y_span).clamp(0.0, 1.0)
        });

        Ok(Self {
            width,
            height,
            norm_x,
            norm_y,
        })
    }

    /// Look up the rectified `(warped_y, warped_x)` pair for a raw cell.
    ///
    /// The caller must keep `raw_row < height()` and `raw_col < width()`;
    /// indices are validated upstream, not here.
    pub fn get_coords(&self, raw_row: usize, raw_col: usize) -> (f64, f64) {
        debug_assert!(raw_row < self.height && raw_col < self.width);
        (
            self.norm_y[(raw_row, raw_col)],
            self.norm_x[(raw_row, raw_col)],
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

//! Immutable calibration and grid configuration values.
//!
//! Every consumer receives an explicit, validated configuration value at
//! construction time; nothing reads shared globals.

use crate::{Error, Result};

/// Declared real-world (min, max) extent of the sensor's working volume on
/// one axis, in raw sensor units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationRange {
    min: f64,
    max: f64,
}

impl CalibrationRange {
    /// Create a range. Fails unless `max > min`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if max <= min {
            return Err(Error::DegenerateRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Real-world constants for the angular warp correction.
///
/// `y_min`/`y_max` are the distances from the sensor to the nearest and
/// farthest edges of the monitored volume; `xb_min`/`xb_max` are the
/// horizontal distances from the far corners to the sensor axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpCalibration {
    pub y_min: f64,
    pub y_max: f64,
    pub xb_min: f64,
    pub xb_max: f64,
}

impl WarpCalibration {
    /// Create a calibration. Fails if either pair has zero or negative span.
    pub fn new(y_min: f64, y_max: f64, xb_min: f64, xb_max: f64) -> Result<Self> {
        if y_max <= y_min {
            return Err(Error::DegenerateRange {
                min: y_min,
                max: y_max,
            });
        }
        if xb_max <= xb_min {
            return Err(Error::DegenerateRange {
                min: xb_min,
                max: xb_max,
            });
        }
        Ok(Self {
            y_min,
            y_max,
            xb_min,
            xb_max,
        })
    }
}

impl Default for WarpCalibration {
    /// Measured constants for the stock wide-angle depth sensor.
    fn default() -> Self {
        Self {
            y_min: 1.23,
            y_max: 4.52,
            xb_min: -2.44,
            xb_max: 2.44,
        }
    }
}

/// Full configuration for an [`OccupancyGrid`](crate::OccupancyGrid):
/// output resolution plus the calibration range of each raw axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub depth_levels: usize,
    pub width_range: CalibrationRange,
    pub height_range: CalibrationRange,
    pub depth_range: CalibrationRange,
    pub warp: WarpCalibration,
}

impl GridConfig {
    /// Create a grid configuration. Fails on any zero dimension.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: usize,
        height: usize,
        depth_levels: usize,
        width_range: CalibrationRange,
        height_range: CalibrationRange,
        depth_range: CalibrationRange,
        warp: WarpCalibration,
    ) -> Result<Self> {
        if width == 0 || height == 0 || depth_levels == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}x{}",
                width, height, depth_levels
            )));
        }
        Ok(Self {
            width,
            height,
            depth_levels,
            width_range,
            height_range,
            depth_range,
            warp,
        })
    }
}

impl Default for GridConfig {
    /// Stock geometry: 640 x 480 cells, 480 depth levels, depth readings
    /// between 200 and 254 sensor units.
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            depth_levels: 480,
            width_range: CalibrationRange { min: 0.0, max: 640.0 },
            height_range: CalibrationRange { min: 0.0, max: 480.0 },
            depth_range: CalibrationRange { min: 200.0, max: 254.0 },
            warp: WarpCalibration::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_rejects_zero_span() {
        assert!(CalibrationRange::new(5.0, 5.0).is_err());
        assert!(CalibrationRange::new(5.0, 4.0).is_err());
    }

    #[test]
    fn test_range_span() {
        let r = CalibrationRange::new(200.0, 254.0).unwrap();
        assert_eq!(r.span(), 54.0);
    }

    #[test]
    fn test_warp_calibration_rejects_degenerate() {
        assert!(WarpCalibration::new(2.0, 2.0, -1.0, 1.0).is_err());
        assert!(WarpCalibration::new(1.0, 2.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_grid_config_rejects_zero_dimension() {
        let cfg = GridConfig::default();
        assert!(GridConfig::new(
            0,
            cfg.height,
            cfg.depth_levels,
            cfg.width_range,
            cfg.height_range,
            cfg.depth_range,
            cfg.warp,
        )
        .is_err());
    }

    #[test]
    fn test_default_matches_installation() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.depth_levels, 480);
        assert_eq!(cfg.depth_range.min(), 200.0);
        assert_eq!(cfg.warp.y_max, 4.52);
    }
}

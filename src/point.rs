//! Strongly-typed 3D point used throughout the crate.
//!
//! Axis order is fixed once, here: `x` is the horizontal sensor coordinate,
//! `y` is the vertical (or intensity-derived) coordinate, and `z` is the
//! sensor range/depth. All call sites use this order; there is no other.

use nalgebra::Vector3;
use std::ops::{Add, Sub};

/// A raw or rescaled sensor point.
///
/// Depending on the producing capture mode, `y` holds either a vertical
/// pixel coordinate or a depth-derived intensity; the grid and tracker do
/// not care which, they only require the order to be consistent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// Horizontal sensor coordinate.
    pub x: f64,
    /// Vertical or intensity-derived coordinate.
    pub y: f64,
    /// Sensor range/depth.
    pub z: f64,
}

impl Point3 {
    /// Create a point from its three components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Euclidean distance to another point in the full 3D point space.
    pub fn distance_to(&self, other: &Point3) -> f64 {
        (self.as_vector() - other.as_vector()).norm()
    }

    /// View as a nalgebra vector for linear algebra.
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Point3 {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

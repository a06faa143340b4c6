//! Point and coordinate types for the occupancy grid.
//!
//! Three coordinate spaces are used throughout the crate:
//! - [`WorldPoint`]: continuous vehicle-frame coordinates in meters
//! - [`GridPoint`]: continuous cell-space coordinates (cells, f32)
//! - [`GridCoord`]: integer cell indices

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// Continuous cell-space coordinates (cells, f32).
///
/// Ray casting walks the grid in this space so that sub-cell positions
/// survive between steps. Mapping down to a [`GridCoord`] truncates
/// toward zero, never rounds; for the in-bounds domain (both
/// coordinates non-negative) truncation and floor coincide, so cell
/// addressing is floor-biased at exact cell boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GridPoint {
    /// X coordinate in cells (column axis)
    pub x: f32,
    /// Y coordinate in cells (row axis)
    pub y: f32,
}

impl GridPoint {
    /// Create a new cell-space point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Truncate to integer cell indices (toward zero).
    #[inline]
    pub fn trunc_coord(self) -> GridCoord {
        GridCoord::new(self.x as i32, self.y as i32)
    }

    /// Euclidean distance to another point, in cells
    #[inline]
    pub fn distance(&self, other: &GridPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for GridPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Mul<f32> for GridPoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        GridPoint::new(self.x * scalar, self.y * scalar)
    }
}

/// World coordinates (meters, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in meters (forward in REP-103 convention)
    pub x: f32,
    /// Y coordinate in meters (left in REP-103 convention)
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

//! Radial ray casting over the occupancy grid.
//!
//! Rays are walked in unit cell-space steps from a continuous origin.
//! Two outcomes are NORMAL, never errors:
//!
//! - the ray meets an `Occupied` cell → the hit point is returned;
//! - the ray leaves the grid, or exhausts `max_distance` steps without
//!   a hit → the origin itself is returned as a defined fallback.
//!
//! The fallback makes the downstream zone polygon degrade gracefully:
//! a ray that saw nothing contributes a vertex at the vehicle instead
//! of a phantom boundary.
//!
//! ```rust
//! use varuna_perception::core::{CellState, GridCoord, GridPoint};
//! use varuna_perception::grid::{first_hit, OccupancyGrid};
//!
//! let mut grid = OccupancyGrid::filled(20, 20, 0.1, CellState::Unoccupied).unwrap();
//! grid.set(GridCoord::new(15, 10), CellState::Occupied);
//!
//! let hit = first_hit(&grid, GridPoint::new(10.0, 10.0), 0.0, 20);
//! assert_eq!(hit.trunc_coord(), GridCoord::new(15, 10));
//! ```

use std::f32::consts::TAU;

use log::trace;

use crate::core::{CellState, GridPoint};
use crate::grid::OccupancyGrid;

/// Default ray length in cells for standalone casts.
///
/// The radial sweep overrides this with the grid width so rays can
/// reach across the whole map.
pub const DEFAULT_MAX_DISTANCE: usize = 100;

/// Walk a ray outward and return the first `Occupied` point.
///
/// Steps `i = 0..max_distance` along `origin + i * (cos theta, sin theta)`
/// in unit cell increments. The origin cell itself is tested at `i = 0`,
/// so a vehicle sitting on an occupied cell reports a distance-0 hit
/// (which coincides with the fallback value).
///
/// Returns `origin` when the ray leaves the grid or no occupied cell is
/// found within `max_distance` steps. Continuous points truncate to
/// cell indices (floor-biased; see [`GridPoint::trunc_coord`]).
///
/// Pure read: the result depends only on the grid contents and the
/// arguments, and concurrent casts over a shared `&OccupancyGrid` are
/// safe.
pub fn first_hit(
    grid: &OccupancyGrid,
    origin: GridPoint,
    theta: f32,
    max_distance: usize,
) -> GridPoint {
    let dir = GridPoint::new(theta.cos(), theta.sin());

    for i in 0..max_distance {
        let p = origin + dir * i as f32;
        if !grid.contains(p) {
            return origin;
        }
        if grid.state_at(p.trunc_coord()) == CellState::Occupied {
            trace!(
                "ray theta={:.4} hit ({:.1}, {:.1}) after {} steps",
                theta,
                p.x,
                p.y,
                i
            );
            return p;
        }
    }

    origin
}

/// Lazy full-turn sweep of [`first_hit`] rays.
///
/// Yields one hit point per sampled angle for `theta = 0, step, 2*step,
/// ... <= 2π` (f32 accumulation, matching the sweep the zone polygon is
/// defined over; whether the θ=2π boundary ray is emitted depends on
/// rounding and is immaterial to the fill). The iterator holds only a
/// shared borrow of the grid and is restartable by constructing it
/// again with the same inputs.
pub struct RadialSweep<'a> {
    grid: &'a OccupancyGrid,
    origin: GridPoint,
    angle_step: f32,
    max_distance: usize,
    theta: f32,
}

impl<'a> RadialSweep<'a> {
    /// Create a sweep around `origin`.
    ///
    /// `angle_step` must be positive; [`crate::zone::ZoneExtractor`]
    /// validates this before constructing sweeps.
    pub fn new(
        grid: &'a OccupancyGrid,
        origin: GridPoint,
        angle_step: f32,
        max_distance: usize,
    ) -> Self {
        debug_assert!(angle_step > 0.0);
        Self {
            grid,
            origin,
            angle_step,
            max_distance,
            theta: 0.0,
        }
    }
}

impl Iterator for RadialSweep<'_> {
    type Item = GridPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.theta > TAU {
            return None;
        }
        let hit = first_hit(self.grid, self.origin, self.theta, self.max_distance);
        self.theta += self.angle_step;
        Some(hit)
    }
}

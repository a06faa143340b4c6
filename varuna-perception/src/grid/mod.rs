//! Occupancy grid storage and ray casting.
//!
//! - [`OccupancyGrid`]: caller-owned three-state cell buffer
//! - [`first_hit`] / [`RadialSweep`]: radial ray casting primitives the
//!   zone extractor is built on

mod raycaster;
mod storage;

pub use raycaster::{first_hit, RadialSweep, DEFAULT_MAX_DISTANCE};
pub use storage::OccupancyGrid;

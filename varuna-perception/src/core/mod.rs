//! Core types for the varuna-perception library.
//!
//! This module provides the fundamental types used throughout the crate:
//! - [`CellState`] and [`CellCounts`]: grid cell states and statistics
//! - [`GridCoord`], [`GridPoint`] and [`WorldPoint`]: coordinate types
//! - [`Pose2D`]: vehicle reference pose
//! - [`PointCloud`]: XYZ+intensity point cloud (SoA layout)

mod cell;
mod cloud;
mod point;
mod pose;

pub use cell::{CellCounts, CellState};
pub use cloud::PointCloud;
pub use point::{GridCoord, GridPoint, WorldPoint};
pub use pose::{normalize_angle, Pose2D};

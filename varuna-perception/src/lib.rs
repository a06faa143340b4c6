//! # VarunaPerception
//!
//! Occupancy-grid perception support for autonomous underwater
//! vehicles: radial-raycast zone extraction and point-cloud
//! preprocessing.
//!
//! ## Overview
//!
//! The sonar pipeline upstream of this crate builds a 2-D occupancy
//! grid with three cell states:
//!
//! - **Unoccupied** - Confirmed free water
//! - **Occupied** - An obstacle return terminated here
//! - **Unknown** - Never observed, or flagged invalid by the builder
//!
//! Close to the sensor the grid accumulates false returns. The zone
//! extractor suppresses them by sweeping rays outward from the vehicle,
//! collecting the first obstacle hit per angle into a closed polygon,
//! and clearing the polygon's interior — the free water the vehicle can
//! directly see.
//!
//! ## Quick Start
//!
//! ```rust
//! use varuna_perception::{
//!     CellState, GridCoord, OccupancyGrid, Pose2D, ZoneExtractor,
//! };
//!
//! // Grid owned by the caller; 20m x 20m at 0.1 m/cell
//! let mut grid = OccupancyGrid::new(200, 200, 0.1).unwrap();
//! grid.draw_rect(GridCoord::new(60, 60), GridCoord::new(139, 139), CellState::Occupied);
//!
//! let extractor = ZoneExtractor::with_defaults();
//! let result = extractor.extract(&mut grid, Pose2D::identity()).unwrap();
//!
//! println!("cleared {} cells", result.cells_cleared);
//! ```
//!
//! ## Coordinate System
//!
//! World coordinates follow ROS REP-103 (X forward, Y left, CCW
//! positive angles from +X); the world origin maps to the grid center.
//! Continuous cell-space points truncate to cell indices, never round.
//!
//! ## Concurrency
//!
//! Ray casting and polygon computation are pure reads (`&OccupancyGrid`)
//! and safe to run from multiple threads over a shared grid. The zone
//! fill is the sole writer and takes `&mut OccupancyGrid`; exclusive
//! access for the duration of the fill is enforced by the borrow
//! checker, so no internal locking exists or is needed.

#![warn(missing_docs)]

// Core types
pub mod core;

// Grid storage and ray casting
pub mod grid;

// Zone extraction
pub mod zone;

// Point-cloud preprocessing
pub mod preprocessing;

// Unified configuration
pub mod config;

// Visualization output
pub mod io;

// Errors
pub mod error;

// Re-export commonly used types
pub use crate::core::{CellCounts, CellState, GridCoord, GridPoint, PointCloud, Pose2D, WorldPoint};

pub use grid::{first_hit, OccupancyGrid, RadialSweep, DEFAULT_MAX_DISTANCE};

pub use zone::{ZoneConfig, ZoneExtractor, ZonePolygon, ZoneResult};

pub use preprocessing::{remove_outliers, PreprocessingConfig};

pub use config::VarunaConfig;

pub use error::{Result, VarunaError};

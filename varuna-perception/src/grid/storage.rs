//! Occupancy grid storage.
//!
//! The grid is a flat, row-major `u8` buffer of [`CellState`] values
//! with fixed dimensions. It is owned by the caller and shared with the
//! zone extractor: ray casting borrows it immutably, the zone fill
//! borrows it mutably, so the reader/writer discipline of the extraction
//! pipeline is enforced by the borrow checker rather than a lock.
//!
//! ## Coordinate system
//!
//! World coordinates are meters in the vehicle's map frame; the world
//! origin maps to the grid center:
//!
//! ```text
//! cell_x = world_x / resolution + width / 2
//! cell_y = world_y / resolution + height / 2
//! ```
//!
//! Cell (x, y) is addressed as (column, row); continuous cell-space
//! points truncate to indices (see [`GridPoint::trunc_coord`]).

use crate::core::{CellCounts, CellState, GridCoord, GridPoint, Pose2D, WorldPoint};
use crate::error::{Result, VarunaError};

/// A 2-D occupancy grid with three-state cells.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
    resolution: f32,
    /// Pre-computed 1.0 / resolution for faster world-to-cell conversion.
    inv_resolution: f32,
}

impl OccupancyGrid {
    /// Create a new grid with all cells `Unknown`.
    ///
    /// # Errors
    /// `InvalidArgument` if either dimension is zero or the resolution
    /// is not a positive, finite number.
    pub fn new(width: usize, height: usize, resolution: f32) -> Result<Self> {
        Self::filled(width, height, resolution, CellState::Unknown)
    }

    /// Create a new grid with every cell set to `state`.
    pub fn filled(width: usize, height: usize, resolution: f32, state: CellState) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(VarunaError::InvalidArgument(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(VarunaError::InvalidArgument(format!(
                "grid resolution must be positive, got {}",
                resolution
            )));
        }

        Ok(Self {
            cells: vec![state as u8; width * height],
            width,
            height,
            resolution,
            inv_resolution: 1.0 / resolution,
        })
    }

    // === Basic Properties ===

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Resolution in meters per cell.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    // === Coordinate Conversion ===

    /// Convert world coordinates (meters) to continuous cell space.
    ///
    /// The world origin sits at the grid center.
    #[inline]
    pub fn world_to_cell(&self, point: WorldPoint) -> GridPoint {
        GridPoint::new(
            point.x * self.inv_resolution + self.width as f32 / 2.0,
            point.y * self.inv_resolution + self.height as f32 / 2.0,
        )
    }

    /// Convert integer cell indices to world coordinates (cell center).
    #[inline]
    pub fn cell_to_world(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            (coord.x as f32 + 0.5 - self.width as f32 / 2.0) * self.resolution,
            (coord.y as f32 + 0.5 - self.height as f32 / 2.0) * self.resolution,
        )
    }

    /// Project the vehicle pose into continuous cell space.
    #[inline]
    pub fn vehicle_cell(&self, pose: Pose2D) -> GridPoint {
        self.world_to_cell(pose.position())
    }

    /// Check if integer cell indices are within bounds.
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Check if a continuous cell-space point is within `[0,w)x[0,h)`.
    #[inline]
    pub fn contains(&self, point: GridPoint) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f32
            && point.y < self.height as f32
    }

    /// Convert cell indices to a flat array index.
    #[inline]
    fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    // === Cell Access ===

    /// Get the cell state at integer indices (None if out of bounds).
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<CellState> {
        self.coord_to_index(coord)
            .map(|i| CellState::from_u8(self.cells[i]))
    }

    /// Get the cell state at integer indices (`Unknown` if out of bounds).
    #[inline]
    pub fn state_at(&self, coord: GridCoord) -> CellState {
        self.get(coord).unwrap_or_default()
    }

    /// Set the cell state at integer indices.
    ///
    /// Returns false (and writes nothing) if the coordinate is out of
    /// bounds.
    #[inline]
    pub fn set(&mut self, coord: GridCoord, state: CellState) -> bool {
        if let Some(i) = self.coord_to_index(coord) {
            self.cells[i] = state as u8;
            true
        } else {
            false
        }
    }

    /// Set every cell to `state`.
    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state as u8);
    }

    /// Raw access to the cell buffer.
    #[inline]
    pub fn cells_raw(&self) -> &[u8] {
        &self.cells
    }

    // === Fixture Drawing ===

    /// Fill the axis-aligned rectangle `[min, max]` (inclusive) with
    /// `state`, clipped to grid bounds.
    pub fn fill_rect(&mut self, min: GridCoord, max: GridCoord, state: CellState) {
        let x0 = min.x.max(0);
        let y0 = min.y.max(0);
        let x1 = max.x.min(self.width as i32 - 1);
        let y1 = max.y.min(self.height as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let i = y as usize * self.width + x as usize;
                self.cells[i] = state as u8;
            }
        }
    }

    /// Draw the one-cell outline of the rectangle `[min, max]`
    /// (inclusive) with `state`, clipped to grid bounds.
    pub fn draw_rect(&mut self, min: GridCoord, max: GridCoord, state: CellState) {
        self.fill_rect(min, GridCoord::new(max.x, min.y), state);
        self.fill_rect(GridCoord::new(min.x, max.y), max, state);
        self.fill_rect(min, GridCoord::new(min.x, max.y), state);
        self.fill_rect(GridCoord::new(max.x, min.y), max, state);
    }

    // === Statistics ===

    /// Count cells by state.
    pub fn count_by_state(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &cell in &self.cells {
            match cell {
                0 => counts.unoccupied += 1,
                1 => counts.occupied += 1,
                _ => counts.unknown += 1,
            }
        }
        counts
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellState)> + '_ {
        (0..self.cells.len()).map(move |i| {
            let x = (i % self.width) as i32;
            let y = (i / self.width) as i32;
            (GridCoord::new(x, y), CellState::from_u8(self.cells[i]))
        })
    }
}

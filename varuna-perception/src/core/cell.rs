//! Cell states for the occupancy grid.

use serde::{Deserialize, Serialize};

/// Occupancy state of a single grid cell.
///
/// The grid is built by an external sonar/point-cloud pipeline; this
/// crate only distinguishes the three states the zone extractor cares
/// about:
/// - `Unoccupied` - Confirmed free water
/// - `Occupied` - An obstacle return terminated here
/// - `Unknown` - Never observed, or the builder flagged it as an error
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Confirmed free space
    Unoccupied = 0,

    /// Obstacle detected at this cell
    Occupied = 1,

    /// Never observed, or marked invalid by the grid builder
    #[default]
    Unknown = 2,
}

impl CellState {
    /// Is this cell an obstacle?
    #[inline]
    pub fn is_occupied(self) -> bool {
        matches!(self, CellState::Occupied)
    }

    /// Is this cell confirmed free?
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, CellState::Unoccupied)
    }

    /// Convert from u8 (unrecognized values map to Unknown)
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => CellState::Unoccupied,
            1 => CellState::Occupied,
            _ => CellState::Unknown,
        }
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellState::Unoccupied => '.',
            CellState::Occupied => '#',
            CellState::Unknown => '?',
        }
    }
}

/// Cell counts by state.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct CellCounts {
    /// Confirmed free cells.
    pub unoccupied: usize,
    /// Obstacle cells.
    pub occupied: usize,
    /// Unknown cells.
    pub unknown: usize,
}

impl CellCounts {
    /// Total observed cells (free + obstacle).
    pub fn known(&self) -> usize {
        self.unoccupied + self.occupied
    }

    /// Total cells.
    pub fn total(&self) -> usize {
        self.known() + self.unknown
    }
}

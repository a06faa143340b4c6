//! Default value functions for serde deserialization.

use crate::core::CellState;

pub fn resolution() -> f32 {
    0.3
}

pub fn grid_size() -> usize {
    200
}

pub fn angle_step() -> f32 {
    0.005
}

pub fn fill_state() -> CellState {
    CellState::Unoccupied
}

pub fn mean_k() -> usize {
    75
}

pub fn std_dev_mul() -> f32 {
    0.75
}

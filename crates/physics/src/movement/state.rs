//! Per-body movement state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::Matrix2x2;

use super::slide_move::SlideStats;

/// Everything the controller tracks for one body between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    /// Position in world space (center of the box).
    pub position: Vec2,

    /// Desired movement in input space, usually unit length or zero.
    pub input: Vec2,

    /// Blend between walk (0.0) and run (1.0) speed. Not clamped.
    pub run_factor: f32,

    /// Zone transform sampled at the body's position at the end of the last
    /// tick. Identity when the body is outside every zone.
    pub active_matrix: Matrix2x2,

    /// Displacement applied by the last update.
    pub last_displacement: Vec2,

    /// Solver diagnostics from the last update.
    pub last_stats: SlideStats,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            input: Vec2::ZERO,
            run_factor: 0.0,
            active_matrix: Matrix2x2::IDENTITY,
            last_displacement: Vec2::ZERO,
            last_stats: SlideStats::default(),
        }
    }
}

impl BodyState {
    /// Create a body state at the given position.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set this tick's input direction and run factor.
    pub fn set_input(&mut self, input: Vec2, run_factor: f32) {
        self.input = input;
        self.run_factor = run_factor;
    }

    /// Check if the body moved during the last update.
    pub fn is_moving(&self) -> bool {
        self.last_displacement.length_squared() > 1.0e-8
    }

    /// Check if the body currently stands in a zone that bends movement.
    pub fn in_zone(&self) -> bool {
        self.active_matrix != Matrix2x2::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = BodyState::new(Vec2::new(1.0, 2.0));
        assert_eq!(state.position, Vec2::new(1.0, 2.0));
        assert_eq!(state.active_matrix, Matrix2x2::IDENTITY);
        assert!(!state.is_moving());
        assert!(!state.in_zone());
    }

    #[test]
    fn test_set_input() {
        let mut state = BodyState::default();
        state.set_input(Vec2::X, 1.0);
        assert_eq!(state.input, Vec2::X);
        assert_eq!(state.run_factor, 1.0);
    }
}

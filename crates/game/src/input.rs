//! Body input handling.
//!
//! Converts raw directional key state into the input-space direction and run
//! factor the movement controller consumes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Raw movement input for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Run instead of walk.
    pub run: bool,
}

impl MoveInput {
    /// Input holding the keys for `direction`.
    ///
    /// Only the sign of each component matters: `(1.0, 0.2)` presses right
    /// and up, which moves along the normalized diagonal.
    pub fn toward(direction: Vec2) -> Self {
        Self {
            left: direction.x < 0.0,
            right: direction.x > 0.0,
            up: direction.y > 0.0,
            down: direction.y < 0.0,
            run: false,
        }
    }

    pub fn running(mut self) -> Self {
        self.run = true;
        self
    }

    /// Input-space direction, unit length or zero.
    ///
    /// Opposite keys cancel out and diagonals are normalized so moving at an
    /// angle is not faster.
    pub fn direction(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;

        if self.right {
            axis.x += 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.up {
            axis.y += 1.0;
        }
        if self.down {
            axis.y -= 1.0;
        }

        axis.normalize_or_zero()
    }

    /// Blend factor between walk (0.0) and run (1.0) speed.
    pub fn run_factor(&self) -> f32 {
        if self.run {
            1.0
        } else {
            0.0
        }
    }

    /// Check if any movement key is held.
    pub fn has_movement(&self) -> bool {
        self.direction() != Vec2::ZERO
    }
}

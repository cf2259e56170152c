//! Ground effector zones.

use serde::{Deserialize, Serialize};

use crate::math::Matrix2x2;

/// A region of space that remaps movement through a 2x2 matrix.
///
/// The matrix is authored per zone but may be changed between ticks by other
/// systems (a rotating platform, a conveyor that reverses). Readers always see
/// the value at the time they ask.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Zone {
    matrix: Matrix2x2,
}

impl Zone {
    pub fn new(matrix: Matrix2x2) -> Self {
        Self { matrix }
    }

    /// The current movement transform.
    #[inline]
    pub fn matrix(&self) -> Matrix2x2 {
        self.matrix
    }

    pub fn set_matrix(&mut self, matrix: Matrix2x2) {
        self.matrix = matrix;
    }
}

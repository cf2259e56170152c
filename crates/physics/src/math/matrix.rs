//! 2x2 matrices applied to column vectors.

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

/// Determinants at or below this magnitude are treated as singular.
pub const DETERMINANT_EPSILON: f32 = 1.0e-6;

/// A 2x2 linear transform.
///
/// The four components are laid out column by column:
///
/// ```text
/// | a  c |
/// | b  d |
/// ```
///
/// so applying it to `(x, y)` yields `(a·x + c·y, b·x + d·y)`. This is the same
/// column-major order `glam::Mat2` uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix2x2 {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl Default for Matrix2x2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2x2 {
    /// The transform that leaves movement untouched.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Uniform scale by `s` on both axes.
    pub const fn scale(s: f32) -> Self {
        Self::new(s, 0.0, 0.0, s)
    }

    /// Horizontal shear that lifts `x` movement by `slope` units per unit.
    ///
    /// This is the usual ramp: walking right on a 1:2 slope is `shear_y(0.5)`.
    pub const fn shear_y(slope: f32) -> Self {
        Self::new(1.0, slope, 0.0, 1.0)
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() > DETERMINANT_EPSILON
    }

    /// Forward transform `M·v`.
    #[inline]
    pub fn apply(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// Solve `M·x = v` for `x`.
    ///
    /// Fails with [`PhysicsError::SingularMatrix`] when the determinant is
    /// within [`DETERMINANT_EPSILON`] of zero. A singular zone matrix is a
    /// content error; callers should surface it rather than guess a direction.
    pub fn apply_inverse(&self, v: Vec2) -> Result<Vec2, PhysicsError> {
        let determinant = self.determinant();
        if determinant.abs() <= DETERMINANT_EPSILON {
            return Err(PhysicsError::SingularMatrix { determinant });
        }

        let inv_det = 1.0 / determinant;
        Ok(Vec2::new(
            inv_det * (self.d * v.x - self.c * v.y),
            inv_det * (-self.b * v.x + self.a * v.y),
        ))
    }
}

impl From<Mat2> for Matrix2x2 {
    fn from(m: Mat2) -> Self {
        let [a, b, c, d] = m.to_cols_array();
        Self::new(a, b, c, d)
    }
}

impl From<Matrix2x2> for Mat2 {
    fn from(m: Matrix2x2) -> Self {
        Mat2::from_cols_array(&[m.a, m.b, m.c, m.d])
    }
}

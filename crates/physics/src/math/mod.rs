//! Small linear algebra helpers for movement.
//!
//! - [`Matrix2x2`]: Forward and inverse 2x2 transforms used by zones
//! - [`SpeedRange`]: Walk/run speed pair blended by a run factor

mod matrix;
mod speed;

pub use matrix::{Matrix2x2, DETERMINANT_EPSILON};
pub use speed::{blend, SpeedRange};

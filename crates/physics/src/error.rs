//! Errors raised by the physics crate.

use glam::Vec2;
use thiserror::Error;

use crate::collision::ColliderId;

/// Configuration and content errors.
///
/// None of these are ever returned from the solver itself; it recovers locally
/// and reports them through [`crate::SlideStats`] and the log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// An inverse transform was requested on a non-invertible matrix.
    #[error("zone matrix is singular (determinant {determinant}), cannot invert")]
    SingularMatrix { determinant: f32 },

    /// A collider on the zone layers carries no zone data.
    #[error("collider {collider:?} is on a zone layer but has no zone attached")]
    MissingZoneComponent { collider: ColliderId },

    /// A body shape whose skin eats its whole extent.
    #[error("body size {size} is too small for skin width {skin_width}")]
    InvalidExtent { size: Vec2, skin_width: f32 },

    /// A step limit that would reject every tick or cannot be compared.
    #[error("max delta time must be finite and positive, got {max_delta_time}")]
    InvalidTimeStep { max_delta_time: f32 },
}

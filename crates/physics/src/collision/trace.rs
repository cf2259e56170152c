//! Cast results for collision queries.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Handle to a collider in a [`crate::CollisionWorld`] or any other
/// [`crate::SpatialQuery`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// Result of a ray or box cast that hit something.
///
/// Casts that hit nothing return `None` instead of a sentinel result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CastHit {
    /// Distance travelled along the (unit) cast direction before impact.
    pub distance: f32,

    /// `distance / max_distance`.
    ///
    /// - `0.0` = the cast started inside or touching the collider
    /// - `0.5` = hit halfway through
    /// - `1.0` = hit at the very end of the cast
    pub fraction: f32,

    /// Surface normal at the impact point, pointing out of the collider.
    pub normal: Vec2,

    /// The collider that was hit.
    pub collider: ColliderId,
}

impl CastHit {
    pub fn new(distance: f32, max_distance: f32, normal: Vec2, collider: ColliderId) -> Self {
        let fraction = if max_distance > 0.0 {
            distance / max_distance
        } else {
            0.0
        };

        Self {
            distance,
            fraction,
            normal,
            collider,
        }
    }

    /// Check if the cast started inside (or flush against) the collider.
    #[inline]
    pub fn started_inside(&self) -> bool {
        self.fraction == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_hit_fraction() {
        let hit = CastHit::new(2.0, 8.0, Vec2::NEG_X, ColliderId(3));
        assert_eq!(hit.fraction, 0.25);
        assert!(!hit.started_inside());
    }

    #[test]
    fn test_cast_hit_at_origin() {
        let hit = CastHit::new(0.0, 8.0, Vec2::NEG_X, ColliderId(0));
        assert!(hit.started_inside());

        let degenerate = CastHit::new(0.0, 0.0, Vec2::Y, ColliderId(0));
        assert_eq!(degenerate.fraction, 0.0);
    }
}

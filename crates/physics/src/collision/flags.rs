//! Layer masks and depth ranges for collision filtering.

use serde::{Deserialize, Serialize};

/// Which kinds of geometry a collider belongs to, or a query considers.
///
/// A query hits a collider when the two sets intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    /// Nothing.
    pub const EMPTY: Self = Self(0);

    /// Solid geometry that blocks movement.
    pub const WALL: Self = Self(1 << 0);

    /// Ground effector regions that remap movement.
    pub const ZONE: Self = Self(1 << 1);

    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Check if these layers contain all of `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given layers are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for CollisionLayers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for CollisionLayers {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Inclusive z-depth window for point queries.
///
/// Colliders live on a 2D plane but carry a sorting depth, so a scene can stack
/// zones that only apply to bodies on a given depth band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: f32,
    pub max: f32,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl DepthRange {
    /// Every finite depth. Finite bounds keep the range representable in JSON.
    pub const UNBOUNDED: Self = Self {
        min: f32::MIN,
        max: f32::MAX,
    };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, depth: f32) -> bool {
        depth >= self.min && depth <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_operations() {
        let both = CollisionLayers::WALL | CollisionLayers::ZONE;

        assert!(both.contains(CollisionLayers::WALL));
        assert!(both.contains(CollisionLayers::ZONE));
        assert!(!CollisionLayers::WALL.intersects(CollisionLayers::ZONE));
        assert!(CollisionLayers::ALL.contains(both));
        assert_eq!(both & CollisionLayers::ZONE, CollisionLayers::ZONE);
        assert!(!CollisionLayers::EMPTY.intersects(both));
    }

    #[test]
    fn test_depth_range() {
        let range = DepthRange::new(-1.0, 1.0);
        assert!(range.contains(0.0));
        assert!(range.contains(1.0));
        assert!(!range.contains(1.5));
        assert!(DepthRange::default().contains(1.0e9));
    }
}

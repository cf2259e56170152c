//! Query traits the solver depends on.
//!
//! The solver never reaches into a concrete world. It takes anything that can
//! answer these questions, which keeps it independent of the host's entity or
//! component system and lets tests script query responses directly.

use glam::Vec2;

use crate::math::Matrix2x2;

use super::flags::{CollisionLayers, DepthRange};
use super::trace::{CastHit, ColliderId};

/// Spatial queries against static geometry.
pub trait SpatialQuery {
    /// Cast a ray from `origin` along `direction` for up to `max_distance`.
    ///
    /// `direction` is expected to be unit length. A ray starting inside a
    /// collider reports that collider at distance 0.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: CollisionLayers,
    ) -> Option<CastHit>;

    /// Sweep a box of full size `size`, rotated by `angle` radians, from
    /// `origin` along `direction` for up to `max_distance`.
    fn box_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        angle: f32,
        direction: Vec2,
        max_distance: f32,
        layers: CollisionLayers,
    ) -> Option<CastHit>;

    /// Find a collider containing `point` whose depth lies in `depth`.
    fn overlap_point(
        &self,
        point: Vec2,
        layers: CollisionLayers,
        depth: DepthRange,
    ) -> Option<ColliderId>;
}

/// Access to the live transform of zones.
///
/// Implementations must return the current value on every call. The solver
/// relies on that to pick up matrices mutated between ticks.
pub trait ZoneLookup {
    /// The zone matrix attached to `collider`, or `None` if it carries no zone.
    fn zone_matrix(&self, collider: ColliderId) -> Option<Matrix2x2>;
}

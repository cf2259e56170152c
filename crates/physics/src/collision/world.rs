//! Collision world containing static walls and zones.
//!
//! The collision world stores all collidable geometry and answers the
//! [`SpatialQuery`] and [`ZoneLookup`] questions the solver asks.

use glam::Vec2;
use parry2d::math::{Isometry, Point, Real, Vector};
use parry2d::query::{self, PointQuery, Ray, RayCast, ShapeCastOptions};
use parry2d::shape::{Cuboid, SharedShape};

use crate::math::Matrix2x2;

use super::flags::{CollisionLayers, DepthRange};
use super::query::{SpatialQuery, ZoneLookup};
use super::trace::{CastHit, ColliderId};
use super::zone::Zone;

/// A piece of collision geometry in the world.
#[derive(Debug, Clone)]
pub struct Collider {
    /// Unique identifier for this collider.
    pub id: ColliderId,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position and orientation in world space.
    pub transform: Isometry<Real>,
    /// Layers this collider belongs to (wall, zone, ...).
    pub layers: CollisionLayers,
    /// Sorting depth, used by point queries.
    pub depth: f32,
    /// Zone data, if this collider is a ground effector.
    pub zone: Option<Zone>,
}

/// The collision world containing all geometry.
///
/// Colliders are kept in insertion order. When two colliders are hit at the
/// same distance the earlier one wins, so query results are deterministic.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    colliders: Vec<Collider>,
    /// Next collider ID to assign.
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box at depth 0.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis
    /// * `layers` - Layers used for query filtering
    pub fn add_box(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        layers: CollisionLayers,
    ) -> ColliderId {
        self.add_box_at_depth(center, half_extents, layers, 0.0)
    }

    /// Add an axis-aligned box at the given sorting depth.
    pub fn add_box_at_depth(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        layers: CollisionLayers,
        depth: f32,
    ) -> ColliderId {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        let transform = Isometry::translation(center.x, center.y);
        self.insert(shape, transform, layers, depth, None)
    }

    /// Add a box-shaped zone carrying `matrix` on [`CollisionLayers::ZONE`].
    pub fn add_zone(&mut self, center: Vec2, half_extents: Vec2, matrix: Matrix2x2) -> ColliderId {
        self.add_zone_at_depth(center, half_extents, matrix, 0.0)
    }

    /// Add a zone at the given sorting depth.
    pub fn add_zone_at_depth(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        matrix: Matrix2x2,
        depth: f32,
    ) -> ColliderId {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        let transform = Isometry::translation(center.x, center.y);
        self.insert(
            shape,
            transform,
            CollisionLayers::ZONE,
            depth,
            Some(Zone::new(matrix)),
        )
    }

    /// Add a convex hull to the world.
    ///
    /// Returns `None` if the hull couldn't be computed.
    pub fn add_convex_hull(
        &mut self,
        points: &[Vec2],
        layers: CollisionLayers,
    ) -> Option<ColliderId> {
        let parry_points: Vec<Point<Real>> = points.iter().map(|p| Point::new(p.x, p.y)).collect();
        let shape = SharedShape::convex_hull(&parry_points)?;
        Some(self.insert(shape, Isometry::identity(), layers, 0.0, None))
    }

    /// Attach zone data to an existing collider, replacing any previous zone.
    ///
    /// Returns `false` if the collider doesn't exist.
    pub fn attach_zone(&mut self, id: ColliderId, zone: Zone) -> bool {
        match self.collider_mut(id) {
            Some(collider) => {
                collider.zone = Some(zone);
                true
            }
            None => false,
        }
    }

    /// Remove a collider. Returns `true` if it existed.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        let before = self.colliders.len();
        self.colliders.retain(|c| c.id != id);
        self.colliders.len() != before
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    /// Get the number of colliders.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.id == id)
    }

    fn collider_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        self.colliders.iter_mut().find(|c| c.id == id)
    }

    /// The zone attached to a collider.
    pub fn zone(&self, id: ColliderId) -> Option<&Zone> {
        self.collider(id).and_then(|c| c.zone.as_ref())
    }

    /// Mutable access to a zone, for systems that animate its matrix between
    /// ticks.
    pub fn zone_mut(&mut self, id: ColliderId) -> Option<&mut Zone> {
        self.collider_mut(id).and_then(|c| c.zone.as_mut())
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn insert(
        &mut self,
        shape: SharedShape,
        transform: Isometry<Real>,
        layers: CollisionLayers,
        depth: f32,
        zone: Option<Zone>,
    ) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;

        self.colliders.push(Collider {
            id,
            shape,
            transform,
            layers,
            depth,
            zone,
        });

        id
    }

    fn filtered(&self, layers: CollisionLayers) -> impl Iterator<Item = &Collider> {
        self.colliders
            .iter()
            .filter(move |c| layers.intersects(c.layers))
    }
}

impl SpatialQuery for CollisionWorld {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: CollisionLayers,
    ) -> Option<CastHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(Point::new(origin.x, origin.y), Vector::new(dir.x, dir.y));

        let mut closest: Option<CastHit> = None;

        for collider in self.filtered(layers) {
            let Some(hit) = collider
                .shape
                .cast_ray_and_get_normal(&collider.transform, &ray, max_distance, true)
            else {
                continue;
            };

            let is_closer = closest
                .as_ref()
                .map_or(true, |c| hit.time_of_impact < c.distance);

            if is_closer {
                // Rays starting inside report a zero normal; face back along the ray
                let normal = Vec2::new(hit.normal.x, hit.normal.y);
                let normal = if normal.length_squared() > 0.0 {
                    normal
                } else {
                    -dir
                };
                closest = Some(CastHit::new(hit.time_of_impact, max_distance, normal, collider.id));
            }
        }

        closest
    }

    fn box_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        angle: f32,
        direction: Vec2,
        max_distance: f32,
        layers: CollisionLayers,
    ) -> Option<CastHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO || max_distance <= 0.0 {
            return None;
        }

        let half = (size * 0.5).max(Vec2::ZERO);
        let cast_shape = Cuboid::new(Vector::new(half.x, half.y));
        let cast_transform = Isometry::new(Vector::new(origin.x, origin.y), angle);
        let velocity = Vector::new(dir.x, dir.y);
        let at_rest = Vector::zeros();

        let mut closest: Option<CastHit> = None;

        for collider in self.filtered(layers) {
            let hit = match query::cast_shapes(
                &cast_transform,
                &velocity,
                &cast_shape,
                &collider.transform,
                &at_rest,
                collider.shape.as_ref(),
                ShapeCastOptions {
                    max_time_of_impact: max_distance,
                    target_distance: 0.0,
                    // Bodies nudged into a wall by float error may still move out of it
                    stop_at_penetration: false,
                    compute_impact_geometry_on_penetration: true,
                },
            ) {
                Ok(Some(hit)) => hit,
                Ok(None) => continue,
                Err(unsupported) => {
                    log::warn!(
                        "box cast unsupported against collider {:?}: {:?}",
                        collider.id,
                        unsupported
                    );
                    continue;
                }
            };

            let is_closer = closest
                .as_ref()
                .map_or(true, |c| hit.time_of_impact < c.distance);

            if is_closer {
                // normal2 is in the collider's local frame
                let local = hit.normal2.into_inner();
                let world = collider.transform.rotation * local;
                closest = Some(CastHit::new(
                    hit.time_of_impact,
                    max_distance,
                    Vec2::new(world.x, world.y),
                    collider.id,
                ));
            }
        }

        closest
    }

    fn overlap_point(
        &self,
        point: Vec2,
        layers: CollisionLayers,
        depth: DepthRange,
    ) -> Option<ColliderId> {
        let p = Point::new(point.x, point.y);

        self.filtered(layers)
            .filter(|c| depth.contains(c.depth))
            .find(|c| c.shape.contains_point(&c.transform, &p))
            .map(|c| c.id)
    }
}

impl ZoneLookup for CollisionWorld {
    fn zone_matrix(&self, collider: ColliderId) -> Option<Matrix2x2> {
        self.zone(collider).map(Zone::matrix)
    }
}

// ============================================================================
// Tests
// ============================================================================

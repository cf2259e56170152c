//! Move-and-slide algorithm for kinematic box bodies.
//!
//! Given a desired displacement, this produces a collision-corrected one that
//! stops short of walls, slides along them, and bends through zones.
//!
//! # Algorithm
//!
//! 1. Past [`MAX_SLIDE_DEPTH`] nested resolutions, give up and return zero
//! 2. On the outermost call only, look for a zone boundary on the path:
//!    - entering a zone: split the move at the boundary and push the rest
//!      through the zone's matrix
//!    - leaving a zone: split at the boundary and pull the rest back through
//!      the inverse matrix
//! 3. Sweep the (skin-shrunk) box toward the target against walls
//! 4. On a hit, advance to just short of the wall, drop the part of the
//!    remainder that points into the wall and resolve what is left

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{ColliderId, CollisionLayers, SpatialQuery, ZoneLookup};
use crate::error::PhysicsError;
use crate::math::Matrix2x2;

/// Maximum number of nested resolutions per call.
///
/// Zone crossings and wall slides each cost one level. Whatever displacement
/// remains when the cap is reached is dropped.
pub const MAX_SLIDE_DEPTH: u32 = 3;

/// Displacements at or below this length have no usable direction. They are
/// returned as-is without querying the world.
pub const MIN_DISPLACEMENT: f32 = 1.0e-6;

/// The moving body's box and its skin margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyShape {
    size: Vec2,
    skin_width: f32,
}

impl BodyShape {
    /// A unit box with a 1cm skin.
    pub const DEFAULT: Self = Self {
        size: Vec2::ONE,
        skin_width: 0.01,
    };

    /// Create a body shape from its full size and skin width.
    ///
    /// The skin must be non-negative and leave a positive box once taken off
    /// both sides of each axis.
    pub fn new(size: Vec2, skin_width: f32) -> Result<Self, PhysicsError> {
        let effective = size - Vec2::splat(2.0 * skin_width);
        let valid = skin_width >= 0.0 && effective.x > 0.0 && effective.y > 0.0;

        if !valid {
            return Err(PhysicsError::InvalidExtent { size, skin_width });
        }

        Ok(Self { size, skin_width })
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn skin_width(&self) -> f32 {
        self.skin_width
    }

    /// The box actually swept against walls: `size - 2 * skin_width`.
    #[inline]
    pub fn effective_size(&self) -> Vec2 {
        self.size - Vec2::splat(2.0 * self.skin_width)
    }
}

impl Default for BodyShape {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The two independent layer masks the solver queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideFilters {
    /// Geometry that blocks movement.
    pub walls: CollisionLayers,
    /// Geometry that carries zone transforms.
    pub zones: CollisionLayers,
}

impl Default for SlideFilters {
    fn default() -> Self {
        Self {
            walls: CollisionLayers::WALL,
            zones: CollisionLayers::ZONE,
        }
    }
}

/// Diagnostics gathered during one solve.
///
/// None of these are failures from the caller's point of view; the solver
/// always returns a usable displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideStats {
    /// Wall casts that hit something.
    pub wall_hits: u32,
    /// Zone boundaries crossed on the way in.
    pub zone_entries: u32,
    /// Zone boundaries crossed on the way out.
    pub zone_exits: u32,
    /// Non-zero remainders dropped at the depth cap.
    pub depth_exhausted: u32,
    /// Exit transforms skipped because the zone matrix was singular.
    pub singular_transforms: u32,
    /// Zone-layer hits whose collider had no zone attached.
    pub missing_zones: u32,
}

impl SlideStats {
    /// Check if no content errors were hit.
    pub fn is_clean(&self) -> bool {
        self.singular_transforms == 0 && self.missing_zones == 0
    }

    /// Fold another solve's stats into this one.
    pub fn accumulate(&mut self, other: &SlideStats) {
        self.wall_hits += other.wall_hits;
        self.zone_entries += other.zone_entries;
        self.zone_exits += other.zone_exits;
        self.depth_exhausted += other.depth_exhausted;
        self.singular_transforms += other.singular_transforms;
        self.missing_zones += other.missing_zones;
    }
}

/// Output of [`move_and_slide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideResult {
    /// The collision-corrected displacement to apply to the body.
    pub displacement: Vec2,
    pub stats: SlideStats,
}

/// Remove the part of `remainder` that points along `normal`.
///
/// With a unit `normal` the result is tangent to the surface: motion into the
/// wall is cancelled and motion along it is kept.
#[inline]
pub fn clip_to_surface(remainder: Vec2, normal: Vec2) -> Vec2 {
    remainder - remainder.dot(normal) * normal
}

/// Resolve a desired displacement against walls and zones.
///
/// # Arguments
///
/// * `world` - Spatial queries and zone transforms
/// * `displacement` - Desired movement for this tick (world space)
/// * `position` - Current center of the body's box
/// * `shape` - Body box and skin width
/// * `filters` - Wall and zone layer masks
///
/// # Returns
///
/// The displacement to apply, plus diagnostics. Content errors met on the way
/// (singular or missing zone transforms) are logged and counted, never
/// returned.
pub fn move_and_slide<W>(
    world: &W,
    displacement: Vec2,
    position: Vec2,
    shape: &BodyShape,
    filters: &SlideFilters,
) -> SlideResult
where
    W: SpatialQuery + ZoneLookup + ?Sized,
{
    let mut solver = Solver {
        world,
        shape,
        filters,
        stats: SlideStats::default(),
    };

    let displacement = solver.resolve(displacement, position, 0);

    SlideResult {
        displacement,
        stats: solver.stats,
    }
}

/// Look up a zone's live matrix, falling back to identity when the collider
/// has no zone attached.
///
/// A zone-layer collider without a zone is a filter misconfiguration: debug
/// builds panic, release builds log it and carry on untransformed. The bool is
/// `true` when the fallback was taken.
pub(crate) fn zone_matrix_or_identity<W>(world: &W, collider: ColliderId) -> (Matrix2x2, bool)
where
    W: ZoneLookup + ?Sized,
{
    match world.zone_matrix(collider) {
        Some(matrix) => (matrix, false),
        None => {
            let err = PhysicsError::MissingZoneComponent { collider };
            log::error!("{err}");
            if cfg!(debug_assertions) {
                panic!("{err}");
            }
            (Matrix2x2::IDENTITY, true)
        }
    }
}

struct Solver<'a, W: ?Sized> {
    world: &'a W,
    shape: &'a BodyShape,
    filters: &'a SlideFilters,
    stats: SlideStats,
}

impl<W> Solver<'_, W>
where
    W: SpatialQuery + ZoneLookup + ?Sized,
{
    fn resolve(&mut self, displacement: Vec2, position: Vec2, depth: u32) -> Vec2 {
        let distance = displacement.length();

        if depth >= MAX_SLIDE_DEPTH {
            if distance > MIN_DISPLACEMENT {
                self.stats.depth_exhausted += 1;
                log::trace!(
                    "slide depth exhausted at {:?}, dropping {:?}",
                    position,
                    displacement
                );
            }
            return Vec2::ZERO;
        }

        if distance <= MIN_DISPLACEMENT {
            return displacement;
        }

        let direction = displacement / distance;

        if depth == 0 {
            if let Some(crossed) = self.cross_zone(displacement, position, direction, distance) {
                return crossed;
            }
        }

        let skin = self.shape.skin_width();
        let Some(hit) = self.world.box_cast(
            position,
            self.shape.effective_size(),
            0.0,
            direction,
            distance + skin,
            self.filters.walls,
        ) else {
            return displacement;
        };

        self.stats.wall_hits += 1;

        // Stop a skin's width short of the wall, then slide the rest
        let advance = direction * (hit.distance - skin);
        let slide = clip_to_surface(displacement - advance, hit.normal);

        advance + self.resolve(slide, position + advance, depth + 1)
    }

    /// Split the move at the first zone boundary on the path, if any.
    ///
    /// A hit at fraction 0 means the cast started inside the zone (or on its
    /// boundary) and is not a crossing.
    fn cross_zone(
        &mut self,
        displacement: Vec2,
        position: Vec2,
        direction: Vec2,
        distance: f32,
    ) -> Option<Vec2> {
        let zones = self.filters.zones;

        // Entering: boundary between here and the destination
        let entry = self
            .world
            .raycast(position, direction, distance, zones)
            .filter(|hit| hit.fraction > 0.0);

        if let Some(hit) = entry {
            self.stats.zone_entries += 1;
            let fraction = hit.fraction.min(1.0);
            let matrix = self.zone_matrix(hit.collider);

            let outside = displacement * fraction;
            let inside = matrix.apply(displacement * (1.0 - fraction));
            log::trace!(
                "entering zone {:?} at fraction {fraction}: {:?} then {:?}",
                hit.collider,
                outside,
                inside
            );

            return Some(
                self.resolve(outside, position, 1) + self.resolve(inside, position + outside, 1),
            );
        }

        // Leaving: boundary seen looking back from the destination
        let exit = self
            .world
            .raycast(position + displacement, -direction, distance, zones)
            .filter(|hit| hit.fraction > 0.0);

        if let Some(hit) = exit {
            self.stats.zone_exits += 1;
            let fraction = hit.fraction.min(1.0);
            let matrix = self.zone_matrix(hit.collider);

            let inside = displacement * (1.0 - fraction);
            let outside = match matrix.apply_inverse(displacement * fraction) {
                Ok(outside) => outside,
                Err(err) => {
                    self.stats.singular_transforms += 1;
                    log::error!(
                        "zone {:?}: {err}; dropping {:?} of movement",
                        hit.collider,
                        displacement * fraction
                    );
                    Vec2::ZERO
                }
            };
            log::trace!(
                "leaving zone {:?} at fraction {fraction}: {:?} then {:?}",
                hit.collider,
                inside,
                outside
            );

            return Some(
                self.resolve(inside, position, 1) + self.resolve(outside, position + inside, 1),
            );
        }

        None
    }

    fn zone_matrix(&mut self, collider: ColliderId) -> Matrix2x2 {
        let (matrix, missing) = zone_matrix_or_identity(self.world, collider);
        if missing {
            self.stats.missing_zones += 1;
        }
        matrix
    }
}

// ============================================================================
// Tests
// ============================================================================

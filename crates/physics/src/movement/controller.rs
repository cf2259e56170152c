//! Kinematic body controller.
//!
//! This is the main entry point for body movement. Each tick it turns input
//! into a world-space displacement, resolves it through the collision world
//! and tracks which zone the body ends up standing in.

use glam::Vec2;

use crate::collision::{SpatialQuery, ZoneLookup};
use crate::error::PhysicsError;
use crate::math::Matrix2x2;

use super::config::MovementConfig;
use super::slide_move::{move_and_slide, zone_matrix_or_identity, BodyShape};
use super::state::BodyState;

/// Kinematic body controller.
///
/// # Example
///
/// ```ignore
/// let controller = KinematicController::new(MovementConfig::default())?;
/// let mut state = controller.spawn(&world, spawn_position);
///
/// // Each fixed tick:
/// state.set_input(direction, run_factor);
/// controller.update(&mut state, &world, delta_time);
/// ```
#[derive(Debug, Clone)]
pub struct KinematicController {
    /// Movement configuration.
    pub config: MovementConfig,

    /// Validated body shape built from `config`.
    shape: BodyShape,
}

impl KinematicController {
    /// Create a controller, validating the configuration.
    pub fn new(config: MovementConfig) -> Result<Self, PhysicsError> {
        let shape = config.validate()?;
        Ok(Self { config, shape })
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self {
            config: MovementConfig::default(),
            shape: BodyShape::DEFAULT,
        }
    }

    /// Create a body at `position`, already adopting the zone it stands in.
    pub fn spawn<W>(&self, world: &W, position: Vec2) -> BodyState
    where
        W: SpatialQuery + ZoneLookup + ?Sized,
    {
        let mut state = BodyState::new(position);
        state.active_matrix = self.sample_zone(world, position);
        state
    }

    /// Advance a body by one tick.
    ///
    /// # Arguments
    ///
    /// * `state` - The body's movement state (will be modified)
    /// * `world` - The collision world
    /// * `delta_time` - Time step in seconds
    ///
    /// # Returns
    ///
    /// The displacement applied this tick.
    pub fn update<W>(&self, state: &mut BodyState, world: &W, delta_time: f32) -> Vec2
    where
        W: SpatialQuery + ZoneLookup + ?Sized,
    {
        // Clamp delta time to prevent tunnelling through thin walls
        let delta_time = delta_time.min(self.config.max_delta_time).max(0.0);

        let speed = self.config.speed_for(state.run_factor);
        let input_step = state.input * speed * delta_time;

        // The body moves in the frame of the zone it stood in last tick
        let world_step = state.active_matrix.apply(input_step);

        let result = move_and_slide(
            world,
            world_step,
            state.position,
            &self.shape,
            &self.config.filters(),
        );

        state.position += result.displacement;
        state.last_displacement = result.displacement;
        state.last_stats = result.stats;

        state.active_matrix = self.sample_zone(world, state.position);

        result.displacement
    }

    /// The matrix of the zone containing `position`, or identity.
    pub fn sample_zone<W>(&self, world: &W, position: Vec2) -> Matrix2x2
    where
        W: SpatialQuery + ZoneLookup + ?Sized,
    {
        match world.overlap_point(position, self.config.zone_layers, self.config.depth_range) {
            Some(collider) => zone_matrix_or_identity(world, collider).0,
            None => Matrix2x2::IDENTITY,
        }
    }
}

impl Default for KinematicController {
    fn default() -> Self {
        Self::with_default_config()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionLayers, CollisionWorld};
    use crate::math::SpeedRange;

    const DT: f32 = 0.02;

    /// Controller moving exactly one unit per second at walk speed.
    fn unit_speed_controller() -> KinematicController {
        KinematicController::new(MovementConfig {
            speed: SpeedRange::new(1.0, 2.0),
            ..Default::default()
        })
        .unwrap()
    }

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MovementConfig {
            skin_width: 0.6,
            ..Default::default()
        };
        assert!(KinematicController::new(config).is_err());
    }

    #[test]
    fn test_negative_max_delta_time_rejected() {
        let config = MovementConfig {
            max_delta_time: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            KinematicController::new(config),
            Err(PhysicsError::InvalidTimeStep { .. })
        ));
    }

    #[test]
    fn test_nan_delta_time_stays_finite() {
        let world = CollisionWorld::new();
        let controller = unit_speed_controller();
        let mut state = controller.spawn(&world, Vec2::ZERO);
        state.set_input(Vec2::X, 0.0);

        // NaN is dropped by `min`, leaving the configured maximum
        let moved = controller.update(&mut state, &world, f32::NAN);
        assert!(moved.is_finite());
        assert!(state.position.is_finite());
    }

    #[test]
    fn test_identity_outside_zones() {
        let world = CollisionWorld::new();
        let controller = unit_speed_controller();
        let mut state = controller.spawn(&world, Vec2::ZERO);

        state.set_input(Vec2::X, 0.0);
        let moved = controller.update(&mut state, &world, DT);

        assert!(approx_eq(moved, Vec2::new(0.02, 0.0)));
        assert!(approx_eq(state.position, Vec2::new(0.02, 0.0)));
        assert_eq!(state.active_matrix, Matrix2x2::IDENTITY);
    }

    #[test]
    fn test_run_factor_blends_speed() {
        let world = CollisionWorld::new();
        let controller = unit_speed_controller();
        let mut state = controller.spawn(&world, Vec2::ZERO);

        state.set_input(Vec2::X, 0.5);
        let moved = controller.update(&mut state, &world, DT);

        assert!(approx_eq(moved, Vec2::new(0.03, 0.0)));
    }

    #[test]
    fn test_spawn_inside_zone_adopts_matrix() {
        let mut world = CollisionWorld::new();
        world.add_zone(Vec2::ZERO, Vec2::splat(5.0), Matrix2x2::scale(2.0));
        let controller = unit_speed_controller();

        let mut state = controller.spawn(&world, Vec2::ZERO);
        assert_eq!(state.active_matrix, Matrix2x2::scale(2.0));
        assert!(state.in_zone());

        state.set_input(Vec2::Y, 0.0);
        let moved = controller.update(&mut state, &world, DT);
        assert!(approx_eq(moved, Vec2::new(0.0, 0.04)));
    }

    #[test]
    fn test_entering_zone_changes_next_tick() {
        let mut world = CollisionWorld::new();
        // Zone starts at x=1
        world.add_zone(
            Vec2::new(6.0, 0.0),
            Vec2::new(5.0, 5.0),
            Matrix2x2::scale(2.0),
        );
        let controller = unit_speed_controller();
        let mut state = controller.spawn(&world, Vec2::new(0.99, 0.0));
        assert_eq!(state.active_matrix, Matrix2x2::IDENTITY);

        state.set_input(Vec2::X, 0.0);
        controller.update(&mut state, &world, DT);
        assert_eq!(state.active_matrix, Matrix2x2::scale(2.0));

        // Fully inside: the input step is doubled before solving
        let moved = controller.update(&mut state, &world, DT);
        assert!(approx_eq(moved, Vec2::new(0.04, 0.0)), "{moved:?}");
    }

    #[test]
    fn test_shear_ramp_lifts_horizontal_input() {
        let mut world = CollisionWorld::new();
        world.add_zone(Vec2::ZERO, Vec2::splat(10.0), Matrix2x2::shear_y(0.5));
        let controller = unit_speed_controller();
        let mut state = controller.spawn(&world, Vec2::ZERO);

        state.set_input(Vec2::X, 0.0);
        let moved = controller.update(&mut state, &world, DT);

        let expected = Matrix2x2::shear_y(0.5).apply(Vec2::new(0.02, 0.0));
        assert!(approx_eq(moved, expected));
        assert!(moved.y > 0.0);
    }

    #[test]
    fn test_delta_time_clamped() {
        let world = CollisionWorld::new();
        let controller = unit_speed_controller();
        let max_dt = controller.config.max_delta_time;

        let mut state = controller.spawn(&world, Vec2::ZERO);
        state.set_input(Vec2::X, 0.0);
        let moved = controller.update(&mut state, &world, 10.0);
        assert!(approx_eq(moved, Vec2::new(max_dt, 0.0)));

        let moved = controller.update(&mut state, &world, -1.0);
        assert_eq!(moved, Vec2::ZERO);
    }

    #[test]
    fn test_live_zone_mutation_applies_next_tick() {
        let mut world = CollisionWorld::new();
        let zone = world.add_zone(Vec2::ZERO, Vec2::splat(10.0), Matrix2x2::IDENTITY);
        let controller = unit_speed_controller();
        let mut state = controller.spawn(&world, Vec2::ZERO);
        state.set_input(Vec2::X, 0.0);

        world
            .zone_mut(zone)
            .unwrap()
            .set_matrix(Matrix2x2::scale(3.0));

        // Matrix sampled at spawn is still in effect for this tick
        let moved = controller.update(&mut state, &world, DT);
        assert!(approx_eq(moved, Vec2::new(0.02, 0.0)));

        let moved = controller.update(&mut state, &world, DT);
        assert!(approx_eq(moved, Vec2::new(0.06, 0.0)));
    }

    #[test]
    fn test_wall_stops_body() {
        let mut world = CollisionWorld::new();
        // Left face at x=2
        world.add_box(
            Vec2::new(2.5, 0.0),
            Vec2::new(0.5, 5.0),
            CollisionLayers::WALL,
        );
        let controller = KinematicController::new(MovementConfig {
            speed: SpeedRange::new(10.0, 20.0),
            ..Default::default()
        })
        .unwrap();
        let mut state = controller.spawn(&world, Vec2::ZERO);
        state.set_input(Vec2::X, 1.0);

        for _ in 0..50 {
            controller.update(&mut state, &world, DT);
        }

        assert!(state.position.x <= 1.5 + 1e-3, "{:?}", state.position);
        assert!(state.position.x > 1.4, "{:?}", state.position);
        assert!(state.last_stats.wall_hits > 0);
    }
}

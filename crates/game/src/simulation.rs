//! Fixed-step simulation of kinematic bodies.
//!
//! Each [`Simulation::step`] advances every body by exactly one tick. Given
//! the same level and the same inputs the results are identical run to run.

use boxslide_physics::{BodyState, KinematicController, MovementConfig, PhysicsError, SlideStats};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::MoveInput;
use crate::level::Level;

/// Identifier for a simulated body.
pub type BodyId = u32;

/// Game simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Movement physics configuration.
    pub movement: MovementConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 50,
            movement: MovementConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

/// A body tracked by the simulation.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub state: BodyState,
    /// Solver diagnostics summed over every tick since spawn.
    pub total_stats: SlideStats,
}

impl Body {
    pub fn position(&self) -> Vec2 {
        self.state.position
    }
}

/// The main simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    /// All bodies, in spawn order.
    pub bodies: Vec<Body>,

    controller: KinematicController,

    /// Next body ID to assign.
    next_body_id: BodyId,
}

impl Simulation {
    /// Create a new simulation with the given configuration and level.
    ///
    /// Fails if the configured body shape is invalid.
    pub fn new(config: SimulationConfig, level: Level) -> Result<Self, PhysicsError> {
        let controller = KinematicController::new(config.movement.clone())?;

        Ok(Self {
            frame: 0,
            config,
            level,
            bodies: Vec::new(),
            controller,
            next_body_id: 1,
        })
    }

    /// Create a simulation with default configuration and the test room.
    pub fn test() -> Self {
        Self {
            frame: 0,
            config: SimulationConfig::default(),
            level: Level::test_room(),
            bodies: Vec::new(),
            controller: KinematicController::with_default_config(),
            next_body_id: 1,
        }
    }

    /// Add a body at the next spawn point (cycling), or the origin if the
    /// level has none.
    ///
    /// Returns the body's ID.
    pub fn add_body(&mut self) -> BodyId {
        let spawn_count = self.level.spawn_points.len().max(1);
        let position = self
            .level
            .get_spawn(self.bodies.len() % spawn_count)
            .map(|s| s.position)
            .unwrap_or(Vec2::ZERO);

        self.add_body_at(position)
    }

    /// Add a body at an explicit position.
    pub fn add_body_at(&mut self, position: Vec2) -> BodyId {
        let id = self.next_body_id;
        self.next_body_id += 1;

        let state = self.controller.spawn(&self.level.collision, position);
        log::debug!("body {} spawned at {:?}", id, position);

        self.bodies.push(Body {
            id,
            state,
            total_stats: SlideStats::default(),
        });
        id
    }

    /// Remove a body from the simulation.
    pub fn remove_body(&mut self, id: BodyId) {
        self.bodies.retain(|b| b.id != id);
    }

    /// Get a body by ID.
    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Advance the simulation by one tick.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Inputs indexed by body position in the `bodies` array.
    ///   Bodies without an input stand still.
    pub fn step(&mut self, inputs: &[MoveInput]) {
        let delta_time = self.config.delta_time();

        for (i, body) in self.bodies.iter_mut().enumerate() {
            let input = inputs.get(i).copied().unwrap_or_default();
            body.state.set_input(input.direction(), input.run_factor());

            self.controller
                .update(&mut body.state, &self.level.collision, delta_time);

            let stats = body.state.last_stats;
            body.total_stats.accumulate(&stats);
            if stats.depth_exhausted > 0 || !stats.is_clean() {
                log::debug!("frame {} body {}: {:?}", self.frame, body.id, stats);
            }
        }

        self.frame += 1;
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }

    /// Mutable access to the level, for systems that animate zones between
    /// ticks.
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::test();
        assert_eq!(sim.frame, 0);
        assert!(sim.bodies.is_empty());
        assert!((sim.delta_time() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_movement_config_rejected() {
        let config = SimulationConfig {
            movement: MovementConfig {
                skin_width: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Simulation::new(config, Level::test_room()).is_err());
    }

    #[test]
    fn test_add_body_uses_spawns() {
        let mut sim = Simulation::test();

        let first = sim.add_body();
        let second = sim.add_body();
        assert_ne!(first, second);

        let spawn = sim.level.get_spawn(0).unwrap().position;
        assert_eq!(sim.get_body(first).unwrap().position(), spawn);

        sim.remove_body(first);
        assert!(sim.get_body(first).is_none());
        assert_eq!(sim.bodies.len(), 1);
    }

    #[test]
    fn test_step_advances_frame() {
        let mut sim = Simulation::test();
        sim.add_body();

        sim.step(&[MoveInput::default()]);
        assert_eq!(sim.frame, 1);

        sim.step(&[]);
        assert_eq!(sim.frame, 2);
    }

    #[test]
    fn test_movement_input() {
        let mut sim = Simulation::test();
        let id = sim.add_body_at(Vec2::new(5.0, 5.0));

        let input = MoveInput::toward(Vec2::Y);
        for _ in 0..50 {
            sim.step(&[input]);
        }

        // One second at walk speed
        let moved = sim.get_body(id).unwrap().position() - Vec2::new(5.0, 5.0);
        assert!((moved.y - 1.5).abs() < 1e-3, "moved={moved:?}");
        assert!(moved.x.abs() < 1e-5);
    }

    #[test]
    fn test_total_stats_accumulate_across_ticks() {
        let mut sim = Simulation::test();
        // Within one step of the east wall's inner face at x=19.5
        let id = sim.add_body_at(Vec2::new(18.99, 5.0));

        let input = MoveInput::toward(Vec2::X);
        for _ in 0..10 {
            sim.step(&[input]);
        }

        let body = sim.get_body(id).unwrap();
        assert!(body.total_stats.wall_hits >= 9, "{:?}", body.total_stats);
        assert!(
            body.total_stats.wall_hits >= body.state.last_stats.wall_hits
        );
        assert!(body.position().x <= 19.0 + 1e-3);
    }

    #[test]
    fn test_determinism() {
        let inputs: Vec<_> = (0..200)
            .map(|i| MoveInput {
                right: i % 2 == 0,
                up: i % 3 == 0,
                left: i % 7 == 0,
                down: false,
                run: i % 5 == 0,
            })
            .collect();

        let run = || {
            let mut sim = Simulation::test();
            sim.add_body();
            sim.add_body();
            for input in &inputs {
                sim.step(&[*input, *input]);
            }
            sim.bodies.iter().map(Body::position).collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }
}

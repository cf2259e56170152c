//! Boxslide Game Logic
//!
//! This crate drives kinematic bodies through a level:
//!
//! - Input mapping from directional keys to movement
//! - Level loading from JSON descriptions
//! - A deterministic fixed-step simulation
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Simulation                          │
//! │  ┌─────────┐    ┌──────────────┐    ┌─────────────────┐  │
//! │  │ Move    │───►│ Controller   │───►│ Body states     │  │
//! │  │ inputs  │    │ (zones, walls│    │ (position, zone │  │
//! │  └─────────┘    │  slide solve)│    │  matrix)        │  │
//! │                 └──────────────┘    └─────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod input;
pub mod level;
pub mod simulation;

// Re-export main types
pub use input::MoveInput;
pub use level::{Level, LevelDesc, LevelError, SpawnPoint, WallDesc, ZoneDesc};
pub use simulation::{Body, BodyId, Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use boxslide_physics::{
    BodyState, CollisionLayers, CollisionWorld, KinematicController, Matrix2x2, MovementConfig,
    SlideStats,
};

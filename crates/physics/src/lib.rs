//! Boxslide Physics
//!
//! Kinematic 2D movement for box-shaped bodies. Each physics step a body asks
//! for a desired displacement and gets back a collision-corrected one that
//! stops at walls and slides along them.
//!
//! # Architecture
//!
//! - **Math**: 2x2 matrix algebra used to bend movement, plus speed blending
//! - **Collision**: The world of walls and zones, and the query traits the
//!   solver is written against
//! - **Movement**: The move-and-slide solver and the per-tick controller that
//!   drives it
//!
//! # Zones
//!
//! A zone (ground effector) is a region carrying a [`Matrix2x2`]. Movement that
//! sweeps into a zone is remapped through its matrix, and movement leaving it
//! is mapped back through the inverse. Ramps, conveyors and ladders are all
//! expressed this way.
//!
//! # Determinism
//!
//! The solver is a pure function of its inputs and the query responses. It
//! never mutates the world and keeps no state between calls.

pub mod collision;
pub mod error;
pub mod math;
pub mod movement;

// Re-export commonly used types
pub use collision::{
    CastHit, Collider, ColliderId, CollisionLayers, CollisionWorld, DepthRange, SpatialQuery, Zone,
    ZoneLookup,
};
pub use error::PhysicsError;
pub use math::{blend, Matrix2x2, SpeedRange};
pub use movement::{
    move_and_slide, BodyShape, BodyState, KinematicController, MovementConfig, SlideFilters,
    SlideResult, SlideStats, MAX_SLIDE_DEPTH,
};

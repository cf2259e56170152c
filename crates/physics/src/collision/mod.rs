//! Collision queries for kinematic bodies.
//!
//! This module provides the static world that bodies move through and the
//! query traits the solver depends on.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: Walls and zones, backed by parry2d shapes
//! - [`SpatialQuery`] / [`ZoneLookup`]: The seams the solver is written
//!   against, so any host physics substrate can stand in for the world
//! - [`CastHit`]: Output from a ray or box cast
//! - [`Zone`]: A region carrying a movement transform
//!
//! # Filtering
//!
//! Every query takes a [`CollisionLayers`] mask. The solver uses two
//! independent masks, one for walls and one for zones.

mod flags;
mod query;
mod trace;
mod world;
mod zone;

pub use flags::{CollisionLayers, DepthRange};
pub use query::{SpatialQuery, ZoneLookup};
pub use trace::{CastHit, ColliderId};
pub use world::{Collider, CollisionWorld};
pub use zone::Zone;

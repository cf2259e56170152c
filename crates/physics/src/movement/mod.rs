//! Kinematic body movement.
//!
//! This module implements box-body movement with:
//!
//! - Wall stops with a skin margin
//! - Sliding along walls and into corners
//! - Zone (ground effector) crossings that remap movement through a matrix
//! - Walk/run speed blending
//!
//! # Design
//!
//! [`move_and_slide`] is a pure, bounded recursive solve: one call per body
//! per fixed tick, at most [`MAX_SLIDE_DEPTH`] nested resolutions. The
//! [`KinematicController`] wraps it with the per-tick bookkeeping a body needs
//! (input to world-space conversion, tracking which zone it stands in).

mod config;
mod controller;
mod slide_move;
mod state;

pub use config::MovementConfig;
pub use controller::KinematicController;
pub use slide_move::{
    clip_to_surface, move_and_slide, BodyShape, SlideFilters, SlideResult, SlideStats,
    MAX_SLIDE_DEPTH, MIN_DISPLACEMENT,
};
pub use state::BodyState;

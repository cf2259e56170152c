//! Movement configuration.
//!
//! All movement parameters are grouped here for easy tuning. Units are world
//! units and seconds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionLayers, DepthRange};
use crate::error::PhysicsError;
use crate::math::SpeedRange;

use super::slide_move::{BodyShape, SlideFilters};

/// Configuration for kinematic body movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ========================================================================
    // Speed
    // ========================================================================
    /// Walk (min) and run (max) speed, blended by the body's run factor.
    pub speed: SpeedRange,

    // ========================================================================
    // Body
    // ========================================================================
    /// Full size of the body's box.
    pub body_size: Vec2,

    /// Shrink margin applied on every side of the box during wall casts.
    pub skin_width: f32,

    // ========================================================================
    // Filtering
    // ========================================================================
    /// Layers that block movement.
    pub wall_layers: CollisionLayers,

    /// Layers that carry zone transforms.
    pub zone_layers: CollisionLayers,

    /// Depth band used when sampling which zone the body stands in.
    pub depth_range: DepthRange,

    // ========================================================================
    // Timing
    // ========================================================================
    /// Largest time step a single update will integrate (seconds).
    pub max_delta_time: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: SpeedRange::new(1.5, 3.0),

            body_size: BodyShape::DEFAULT.size(),
            skin_width: BodyShape::DEFAULT.skin_width(),

            wall_layers: CollisionLayers::WALL,
            zone_layers: CollisionLayers::ZONE,
            depth_range: DepthRange::UNBOUNDED,

            max_delta_time: 0.066, // ~15 FPS minimum
        }
    }
}

impl MovementConfig {
    /// Quick, snappy movement for small arcade levels.
    pub fn arcade() -> Self {
        Self {
            speed: SpeedRange::new(3.0, 6.0),
            ..Default::default()
        }
    }

    /// Slow movement with a thin skin, for tight geometry.
    pub fn precise() -> Self {
        Self {
            speed: SpeedRange::new(0.75, 1.5),
            skin_width: 0.002,
            ..Default::default()
        }
    }

    /// Validate and build the body shape.
    pub fn body_shape(&self) -> Result<BodyShape, PhysicsError> {
        BodyShape::new(self.body_size, self.skin_width)
    }

    /// Check every field a controller depends on, returning the body shape.
    pub fn validate(&self) -> Result<BodyShape, PhysicsError> {
        if !self.max_delta_time.is_finite() || self.max_delta_time <= 0.0 {
            return Err(PhysicsError::InvalidTimeStep {
                max_delta_time: self.max_delta_time,
            });
        }

        self.body_shape()
    }

    /// Wall and zone masks for the solver.
    pub fn filters(&self) -> SlideFilters {
        SlideFilters {
            walls: self.wall_layers,
            zones: self.zone_layers,
        }
    }

    /// Speed for a given run factor.
    #[inline]
    pub fn speed_for(&self, run_factor: f32) -> f32 {
        self.speed.blend(run_factor)
    }
}

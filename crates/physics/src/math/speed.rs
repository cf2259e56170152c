//! Walk/run speed blending.

use serde::{Deserialize, Serialize};

/// A (min, max) speed pair, typically walk and run speed in units/second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::new(1.5, 3.0)
    }
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Linear blend: `min` at `t = 0`, `max` at `t = 1`.
    ///
    /// `t` is not clamped. Values outside `[0, 1]` extrapolate past the named
    /// speeds, which callers use on purpose for boosts and crawls.
    #[inline]
    pub fn blend(&self, t: f32) -> f32 {
        self.min * (1.0 - t) + self.max * t
    }
}

/// Free-function form of [`SpeedRange::blend`].
#[inline]
pub fn blend(range: SpeedRange, t: f32) -> f32 {
    range.blend(t)
}

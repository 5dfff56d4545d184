//! Random ranges and the values sampled from them.
//!
//! A range never stores its own sample. The tool keeps `(range, value)`
//! pairs in [`RandomSamples`] and replaces them wholesale on regeneration.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::AlignmentConfig;
use super::rotator::Rotator;

/// A float drawn uniformly between `min` and `max`, optionally with a random sign.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct RandomRange {
    pub min: f32,
    pub max: f32,
    /// Flip the sign of the sampled value with 50% probability.
    /// With `min = max = 30` the outcome is either 30 or -30.
    #[serde(default)]
    pub negate: bool,
}

impl Default for RandomRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            negate: false,
        }
    }
}

impl RandomRange {
    pub const fn new(min: f32, max: f32, negate: bool) -> Self {
        Self { min, max, negate }
    }

    /// Value used before the first regeneration.
    pub fn midpoint(&self) -> f32 {
        (self.min + self.max) * 0.5
    }

    pub fn sample(&self, rng: &mut fastrand::Rng) -> f32 {
        let value = self.min + (self.max - self.min) * rng.f32();
        if self.negate && rng.bool() {
            -value
        } else {
            value
        }
    }
}

/// A range together with the value last drawn from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomSample {
    pub range: RandomRange,
    pub value: f32,
}

impl RandomSample {
    pub fn initial(range: RandomRange) -> Self {
        Self {
            range,
            value: range.midpoint(),
        }
    }

    pub fn draw(range: RandomRange, rng: &mut fastrand::Rng) -> Self {
        Self {
            range,
            value: range.sample(rng),
        }
    }
}

/// The six random values a placement consumes: rotation and scale per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomSamples {
    pub rotation: [RandomSample; 3],
    pub scale: [RandomSample; 3],
}

impl Default for RandomSamples {
    fn default() -> Self {
        Self::from_config(&AlignmentConfig::default())
    }
}

impl RandomSamples {
    /// Midpoint samples for the config's ranges.
    pub fn from_config(config: &AlignmentConfig) -> Self {
        Self {
            rotation: config.random_rotation.map(RandomSample::initial),
            scale: config.random_scale.map(RandomSample::initial),
        }
    }

    /// Draw all six values again from the config's current ranges.
    pub fn regenerate(&mut self, config: &AlignmentConfig, rng: &mut fastrand::Rng) {
        self.rotation = config.random_rotation.map(|range| RandomSample::draw(range, rng));
        self.scale = config.random_scale.map(|range| RandomSample::draw(range, rng));
    }

    /// Rotation offset in degrees. The X, Y and Z samples drive roll, pitch
    /// and yaw respectively.
    pub fn rotation_offset(&self) -> Rotator {
        Rotator {
            roll: self.rotation[0].value,
            pitch: self.rotation[1].value,
            yaw: self.rotation[2].value,
        }
    }

    pub fn scale(&self) -> Vec3 {
        Vec3::new(self.scale[0].value, self.scale[1].value, self.scale[2].value)
    }
}

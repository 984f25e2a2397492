//! Visibility engine configuration.

use carapace_types::constants::VISIBILITY_EPSILON;
use carapace_types::{CarapaceError, CarapaceResult};
use serde::{Deserialize, Serialize};

/// Sampling density per face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precision {
    /// One sample per face: its centroid.
    FaceCenterOnly,
    /// Centroid plus every vertex and every edge midpoint of the face.
    FaceCenterVertsEdges,
}

/// Which faces each camera examines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Test every not-yet-visible face per camera.
    Exhaustive,
    /// Seed a frontier from a random face subset and grow it across
    /// similar-normal neighbors of each confirmed face.
    RandomizedExpansion,
}

/// Configuration for a visibility computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Sampling density per face.
    pub precision: Precision,

    /// Face selection strategy.
    pub strategy: Strategy,

    /// Percentage of faces drawn as expansion seeds (1–100).
    /// Only consulted by `RandomizedExpansion`.
    pub sampling_ratio: u32,

    /// Maximum normal-to-normal angle (degrees, 10–90) for two
    /// adjacent faces to count as one smooth patch during expansion.
    pub flatness_angle_deg: f32,

    /// Seed for the expansion RNG. `None` uses a fixed default so
    /// unseeded runs still reproduce.
    pub seed: Option<u64>,

    /// Max distance between the nearest ray hit and the sample point
    /// for the sample to count as seen (world units).
    pub visibility_epsilon: f32,

    /// Fan the exhaustive per-camera sweep out over a worker pool.
    /// The resulting visible set is identical to the sequential sweep.
    pub parallel: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            precision: Precision::FaceCenterOnly,
            strategy: Strategy::Exhaustive,
            sampling_ratio: 30,
            flatness_angle_deg: 45.0,
            seed: None,
            visibility_epsilon: VISIBILITY_EPSILON,
            parallel: false,
        }
    }
}

impl VisibilityConfig {
    /// Checks parameter ranges, failing fast with `InvalidParameter`.
    pub fn validate(&self) -> CarapaceResult<()> {
        if !(1..=100).contains(&self.sampling_ratio) {
            return Err(CarapaceError::InvalidParameter(format!(
                "sampling_ratio must be in 1–100 (got {})",
                self.sampling_ratio
            )));
        }
        if !(10.0..=90.0).contains(&self.flatness_angle_deg) {
            return Err(CarapaceError::InvalidParameter(format!(
                "flatness_angle_deg must be in 10–90 (got {})",
                self.flatness_angle_deg
            )));
        }
        if !self.visibility_epsilon.is_finite() || self.visibility_epsilon <= 0.0 {
            return Err(CarapaceError::InvalidParameter(format!(
                "visibility_epsilon must be positive and finite (got {})",
                self.visibility_epsilon
            )));
        }
        Ok(())
    }
}

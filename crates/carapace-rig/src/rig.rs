//! Rig parameters and sphere placement.
//!
//! Cameras are arranged in `rows` vertical great-circle rows spaced
//! `360°/rows` apart in azimuth. Within a row the camera count is
//! split in half; elevations step `90°/(half + 1)` from the equator
//! toward each pole, emitting a positive angle and its mirror per
//! step. For typical inputs no camera sits exactly on the equator or
//! at a pole.

use carapace_math::spherical_to_cartesian;
use carapace_types::{CarapaceError, CarapaceResult};
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Projection};

/// Validated parameters for rig generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigParams {
    /// Number of vertical rows around the polar axis. Minimum 2.
    pub rows: u32,
    /// Cameras per row. Must be even, minimum 2.
    pub cameras_per_row: u32,
    /// Sphere radius. Must be positive and should exceed the mesh's
    /// bounding radius.
    pub radius: f32,
    /// Projection applied to every camera.
    #[serde(default)]
    pub projection: Projection,
}

impl Default for RigParams {
    fn default() -> Self {
        Self {
            rows: 4,
            cameras_per_row: 4,
            radius: 10.0,
            projection: Projection::default(),
        }
    }
}

impl RigParams {
    /// Checks the generation contract, failing fast with
    /// `InvalidParameter` before anything is built.
    pub fn validate(&self) -> CarapaceResult<()> {
        if self.rows < 2 {
            return Err(CarapaceError::InvalidParameter(format!(
                "rows must be at least 2 (got {})",
                self.rows
            )));
        }
        if self.cameras_per_row < 2 {
            return Err(CarapaceError::InvalidParameter(format!(
                "cameras_per_row must be at least 2 (got {})",
                self.cameras_per_row
            )));
        }
        if self.cameras_per_row % 2 != 0 {
            return Err(CarapaceError::InvalidParameter(format!(
                "cameras_per_row must be even (got {})",
                self.cameras_per_row
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(CarapaceError::InvalidParameter(format!(
                "radius must be positive and finite (got {})",
                self.radius
            )));
        }
        Ok(())
    }

    /// Host-side convenience: rounds an odd camera count up and clamps
    /// both counts to their minimums, so the result always validates
    /// (given a positive radius).
    pub fn clamped(rows: u32, cameras_per_row: u32, radius: f32) -> Self {
        let rows = rows.max(2);
        let mut cameras_per_row = cameras_per_row.max(2);
        if cameras_per_row % 2 != 0 {
            cameras_per_row += 1;
        }
        Self {
            rows,
            cameras_per_row,
            radius,
            projection: Projection::default(),
        }
    }
}

/// The owned camera collection for one run.
///
/// Dropping the rig tears down every camera; a caller that wants the
/// cameras to outlive the run promotes them with [`into_cameras`].
///
/// [`into_cameras`]: CameraRig::into_cameras
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    cameras: Vec<Camera>,
}

impl CameraRig {
    /// Number of cameras in the rig.
    #[inline]
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    /// True when the rig holds no cameras.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    /// Borrow the cameras in generation order.
    #[inline]
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    /// Iterate the cameras in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &Camera> {
        self.cameras.iter()
    }

    /// Promotes the cameras to caller ownership (the retained-camera
    /// path); the rig itself is consumed.
    pub fn into_cameras(self) -> Vec<Camera> {
        self.cameras
    }
}

/// Generates the camera rig for `params`.
///
/// Deterministic: identical parameters always produce the identical
/// camera list in identical order (row-major; within a row, ascending
/// elevation step with the positive angle before its mirror).
pub fn generate(params: &RigParams) -> CarapaceResult<CameraRig> {
    params.validate()?;

    let rows = params.rows;
    let half = params.cameras_per_row / 2;
    let azimuth_step = std::f32::consts::TAU / rows as f32;
    let elevation_step = std::f32::consts::FRAC_PI_2 / (half + 1) as f32;

    let mut cameras = Vec::with_capacity((rows * params.cameras_per_row) as usize);
    for row in 0..rows {
        let azimuth = row as f32 * azimuth_step;
        for k in 1..=half {
            let elevation = k as f32 * elevation_step;
            for e in [elevation, -elevation] {
                let position = spherical_to_cartesian(params.radius, azimuth, e);
                cameras.push(Camera::looking_at_origin(position, params.projection));
            }
        }
    }

    Ok(CameraRig { cameras })
}

//! Camera and projection types.

use carapace_math::{camera_up, Vec3};
use carapace_types::constants::{DEFAULT_HALF_FOV, WIDE_HALF_FOV};
use serde::{Deserialize, Serialize};

/// Field-of-view model for a rig camera.
///
/// A closed variant: callers match on it instead of inspecting a
/// runtime type tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Perspective cone with an explicit half field-of-view (radians).
    Perspective {
        /// Half field-of-view in radians.
        half_fov: f32,
    },
    /// Wide orthographic-like check with a fixed 90° half-angle.
    WideFixed,
}

impl Projection {
    /// Half field-of-view in radians used by the cone pre-filter.
    #[inline]
    pub fn half_fov(&self) -> f32 {
        match self {
            Projection::Perspective { half_fov } => *half_fov,
            Projection::WideFixed => WIDE_HALF_FOV,
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective {
            half_fov: DEFAULT_HALF_FOV,
        }
    }
}

/// A rig camera: position, unit look direction, and projection.
///
/// Cameras are immutable once generated and owned by their
/// [`CameraRig`](crate::CameraRig).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Position in world space.
    pub position: Vec3,
    /// Unit forward (look) direction.
    pub forward: Vec3,
    /// Field-of-view model.
    pub projection: Projection,
}

impl Camera {
    /// Creates a camera at `position` looking at the world origin.
    pub fn looking_at_origin(position: Vec3, projection: Projection) -> Self {
        Self {
            position,
            forward: (-position).normalize(),
            projection,
        }
    }

    /// Half field-of-view in radians.
    #[inline]
    pub fn half_fov(&self) -> f32 {
        self.projection.half_fov()
    }

    /// Up axis for this camera's orientation (world-Z convention with
    /// a Y fallback when looking along Z).
    #[inline]
    pub fn up(&self) -> Vec3 {
        camera_up(self.forward)
    }
}

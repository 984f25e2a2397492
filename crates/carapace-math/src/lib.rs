//! # carapace-math
//!
//! Linear algebra primitives for the Carapace pipeline.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat3`, etc.)
//! - Spherical-to-Cartesian conversion for camera rig placement
//! - Unit-vector angle helpers used by the cone pre-filter and
//!   the flatness test

pub mod spherical;

// Re-export glam types as the canonical math types for Carapace.
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use spherical::{angle_between_units, camera_up, spherical_to_cartesian, WORLD_UP};

//! Spherical placement math and angular helpers.
//!
//! The camera rig places cameras on a sphere by (azimuth, elevation)
//! pairs. Azimuth sweeps around the world Z axis in the XY plane;
//! elevation rises from the equator toward the poles.

use glam::Vec3;

/// World up axis. The rig's look-at orientation projects against this
/// unless the look direction is parallel to it.
pub const WORLD_UP: Vec3 = Vec3::Z;

/// Converts (radius, azimuth, elevation) to a Cartesian point.
///
/// `azimuth` and `elevation` are in radians. Elevation 0 lies on the
/// equator (XY plane); ±π/2 are the poles.
#[inline]
pub fn spherical_to_cartesian(radius: f32, azimuth: f32, elevation: f32) -> Vec3 {
    let ring_radius = radius * elevation.cos();
    Vec3::new(
        ring_radius * azimuth.cos(),
        ring_radius * azimuth.sin(),
        radius * elevation.sin(),
    )
}

/// Angle in radians between two unit vectors.
///
/// The dot product is clamped so accumulated floating error near
/// parallel vectors cannot produce a NaN from `acos`.
#[inline]
pub fn angle_between_units(a: Vec3, b: Vec3) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Up axis for a camera looking along `forward`.
///
/// Uses [`WORLD_UP`] unless `forward` is (nearly) parallel to it, in
/// which case Y serves as the fallback so the projection stays
/// well-defined at the poles.
#[inline]
pub fn camera_up(forward: Vec3) -> Vec3 {
    if forward.cross(WORLD_UP).length_squared() < 1.0e-8 {
        Vec3::Y
    } else {
        WORLD_UP
    }
}

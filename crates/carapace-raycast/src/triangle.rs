//! Ray-triangle intersection and face triangulation.

use carapace_math::Vec3;
use carapace_mesh::PolyMesh;
use carapace_types::constants::RAY_OFFSET_EPSILON;
use carapace_types::{CarapaceError, CarapaceResult};

use crate::ray::Ray;

/// A triangle carrying the index of the mesh face it came from.
///
/// Polygon faces are fan-triangulated into these before any casting;
/// a hit on any fan triangle is a hit on the owning face.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First corner.
    pub a: Vec3,
    /// Second corner.
    pub b: Vec3,
    /// Third corner.
    pub c: Vec3,
    /// Owning mesh face index.
    pub face: u32,
}

impl Triangle {
    /// Triangle centroid.
    #[inline]
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }
}

/// Ray-triangle intersection (Möller–Trumbore, double-sided).
///
/// Returns the ray parameter of the hit, or `None`. Hits closer than
/// `RAY_OFFSET_EPSILON` are rejected so a ray never reports an
/// intersection with geometry at its own origin.
#[inline]
pub fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let ab = b - a;
    let ac = c - a;

    let pvec = ray.dir.cross(ac);
    let det = ab.dot(pvec);

    // Parallel to the triangle plane (or degenerate triangle).
    if det.abs() < 1.0e-12 {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(ab);
    let v = ray.dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = ac.dot(qvec) * inv_det;
    if t < RAY_OFFSET_EPSILON {
        None
    } else {
        Some(t)
    }
}

/// Fan-triangulates every face of the mesh into a triangle soup.
///
/// Fails with `OracleUnavailable` when the mesh yields no finite
/// triangles to index.
pub fn triangulate(mesh: &PolyMesh) -> CarapaceResult<Vec<Triangle>> {
    let mut triangles = Vec::with_capacity(mesh.face_count() * 2);
    for f in 0..mesh.face_count() {
        let verts = mesh.face(f);
        let root = mesh.position_vec3(verts[0] as usize);
        for i in 1..verts.len() - 1 {
            let tri = Triangle {
                a: root,
                b: mesh.position_vec3(verts[i] as usize),
                c: mesh.position_vec3(verts[i + 1] as usize),
                face: f as u32,
            };
            if tri.a.is_finite() && tri.b.is_finite() && tri.c.is_finite() {
                triangles.push(tri);
            } else {
                return Err(CarapaceError::OracleUnavailable(format!(
                    "face {} has non-finite coordinates",
                    f
                )));
            }
        }
    }

    if triangles.is_empty() {
        return Err(CarapaceError::OracleUnavailable(
            "mesh has no faces to index".into(),
        ));
    }
    Ok(triangles)
}

//! Per-face geometric data: normals, centroids, degeneracy flags.
//!
//! Face normals use Newell's method, which stays robust for polygons
//! whose vertices are slightly non-planar. A face whose Newell normal
//! has (near) zero length is flagged degenerate; the visibility engine
//! never samples degenerate faces.

use carapace_math::Vec3;
use carapace_types::constants::DEGENERATE_AREA_THRESHOLD;
use carapace_types::{CarapaceError, CarapaceResult};

use crate::mesh::PolyMesh;

/// Precomputed per-face geometry for one mesh.
///
/// Built once per run, before any visibility pass. `normals[f]` is
/// unit length whenever `degenerate[f]` is false.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Unit face normals (zero vector where degenerate).
    pub normals: Vec<Vec3>,
    /// Face centroids (vertex mean).
    pub centroids: Vec<Vec3>,
    /// True for faces with a zero-length Newell normal or coincident
    /// vertices.
    pub degenerate: Vec<bool>,
}

impl FaceData {
    /// Number of faces covered.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.normals.len()
    }
}

/// Computes normals, centroids, and degeneracy flags for every face.
pub fn compute_face_data(mesh: &PolyMesh) -> FaceData {
    let face_count = mesh.face_count();
    let mut normals = Vec::with_capacity(face_count);
    let mut centroids = Vec::with_capacity(face_count);
    let mut degenerate = Vec::with_capacity(face_count);

    for f in 0..face_count {
        centroids.push(face_centroid(mesh, f));
        match face_normal(mesh, f) {
            Some(n) => {
                normals.push(n);
                degenerate.push(false);
            }
            None => {
                normals.push(Vec3::ZERO);
                degenerate.push(true);
            }
        }
    }

    FaceData {
        normals,
        centroids,
        degenerate,
    }
}

/// Unit normal of face `f` via Newell's method.
///
/// Returns `None` when the accumulated normal is too short to
/// normalize (collapsed or zero-area face).
pub fn face_normal(mesh: &PolyMesh, f: usize) -> Option<Vec3> {
    let verts = mesh.face(f);
    let n = verts.len();

    let mut normal = Vec3::ZERO;
    for i in 0..n {
        let a = mesh.position_vec3(verts[i] as usize);
        let b = mesh.position_vec3(verts[(i + 1) % n] as usize);
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }

    if normal.length_squared() < DEGENERATE_AREA_THRESHOLD {
        None
    } else {
        Some(normal.normalize())
    }
}

/// Centroid of face `f` (arithmetic mean of its vertices).
pub fn face_centroid(mesh: &PolyMesh, f: usize) -> Vec3 {
    let verts = mesh.face(f);
    let mut sum = Vec3::ZERO;
    for &v in verts {
        sum += mesh.position_vec3(v as usize);
    }
    sum / verts.len() as f32
}

/// Reports the first degenerate face, if any.
///
/// The visibility engine merely skips degenerate faces; this check is
/// for boundaries that want to surface them to a user instead.
pub fn check_degenerate(mesh: &PolyMesh) -> CarapaceResult<()> {
    for f in 0..mesh.face_count() {
        if face_normal(mesh, f).is_none() {
            return Err(CarapaceError::DegenerateFace {
                face: f as u32,
                reason: "zero-length normal".into(),
            });
        }
    }
    Ok(())
}

/// Midpoints of every edge of face `f`, in winding order.
pub fn edge_midpoints(mesh: &PolyMesh, f: usize) -> Vec<Vec3> {
    mesh.face_edges(f)
        .iter()
        .map(|&[a, b]| {
            (mesh.position_vec3(a as usize) + mesh.position_vec3(b as usize)) * 0.5
        })
        .collect()
}

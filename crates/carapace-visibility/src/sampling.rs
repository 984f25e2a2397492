//! Per-face sample point construction.

use carapace_math::Vec3;
use carapace_mesh::normals::edge_midpoints;
use carapace_mesh::{FaceData, PolyMesh};

use crate::config::Precision;

/// Fills `out` with the sample points of `face` for the given
/// precision: always the centroid; high precision adds every vertex
/// and every edge midpoint.
///
/// The buffer is cleared first so callers can reuse one allocation
/// across faces.
pub fn sample_points(
    mesh: &PolyMesh,
    face_data: &FaceData,
    face: usize,
    precision: Precision,
    out: &mut Vec<Vec3>,
) {
    out.clear();
    out.push(face_data.centroids[face]);

    if precision == Precision::FaceCenterVertsEdges {
        for &v in mesh.face(face) {
            out.push(mesh.position_vec3(v as usize));
        }
        out.extend(edge_midpoints(mesh, face));
    }
}

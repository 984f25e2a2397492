//! Mesh merging — the optional pre-merge step for multi-mesh input.

use carapace_types::{CarapaceError, CarapaceResult};

use crate::mesh::PolyMesh;

/// Concatenates several meshes into one, offsetting face indices.
///
/// Vertex positions are kept as-is (no welding); run the weld pass
/// afterwards if coincident boundaries should fuse.
pub fn merge_meshes(meshes: &[PolyMesh]) -> CarapaceResult<PolyMesh> {
    if meshes.is_empty() {
        return Err(CarapaceError::NoTargetGeometry(
            "merge called with no meshes".into(),
        ));
    }

    let vertex_total: usize = meshes.iter().map(|m| m.vertex_count()).sum();
    let face_total: usize = meshes.iter().map(|m| m.face_count()).sum();
    let index_total: usize = meshes.iter().map(|m| m.face_vertices.len()).sum();

    let mut out = PolyMesh::with_capacity(vertex_total, face_total, index_total);
    for mesh in meshes {
        let base = out.vertex_count() as u32;
        for i in 0..mesh.vertex_count() {
            out.push_vertex(mesh.pos_x[i], mesh.pos_y[i], mesh.pos_z[i]);
        }
        for f in 0..mesh.face_count() {
            let mapped: Vec<u32> = mesh.face(f).iter().map(|&v| base + v).collect();
            out.push_face(&mapped);
        }
    }

    out.validate()?;
    Ok(out)
}

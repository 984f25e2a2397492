//! Visibility-driven mesh editing.
//!
//! Deletion removes faces first, then the edges they carried (derived
//! data here), then vertices no longer referenced by any kept face —
//! in that strict order, so no intermediate state holds a dangling
//! reference. The edited mesh is always built fresh from the source:
//! a failed run leaves the input untouched.

use crate::mesh::PolyMesh;

/// Before/after statistics of an edit operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditReport {
    /// Face count before the edit.
    pub faces_before: usize,
    /// Face count after the edit.
    pub faces_after: usize,
    /// Vertex count before the edit.
    pub vertices_before: usize,
    /// Vertex count after the edit.
    pub vertices_after: usize,
    /// Number of vertices merged by a weld pass (0 when weld did not run).
    pub welded_vertices: usize,
}

impl EditReport {
    /// Percentage of faces removed. An empty input counts as 0% removed.
    pub fn removal_percent(&self) -> f32 {
        if self.faces_before == 0 {
            0.0
        } else {
            (self.faces_before - self.faces_after) as f32 / self.faces_before as f32 * 100.0
        }
    }
}

/// Removes every face not flagged in `visible`, then compacts away
/// unreferenced vertices.
///
/// `visible.len()` must equal the mesh's face count — a mismatch is a
/// caller bug, not a recoverable condition.
pub fn delete_unseen_faces(mesh: &PolyMesh, visible: &[bool]) -> (PolyMesh, EditReport) {
    assert_eq!(
        visible.len(),
        mesh.face_count(),
        "visibility flags must cover every face"
    );

    // Faces first.
    let kept: Vec<Vec<u32>> = (0..mesh.face_count())
        .filter(|&f| visible[f])
        .map(|f| mesh.face(f).to_vec())
        .collect();

    // Edges are ranges of the kept faces; dropping a face drops its
    // edges with it. Vertices go last.
    let edited = compact(mesh, &kept);

    let report = EditReport {
        faces_before: mesh.face_count(),
        faces_after: edited.face_count(),
        vertices_before: mesh.vertex_count(),
        vertices_after: edited.vertex_count(),
        welded_vertices: 0,
    };
    (edited, report)
}

/// Builds a mesh from `faces` (indices into `source`'s vertex arrays),
/// keeping only the vertices those faces reference and remapping
/// indices densely.
pub(crate) fn compact(source: &PolyMesh, faces: &[Vec<u32>]) -> PolyMesh {
    const UNUSED: u32 = u32::MAX;
    let mut remap = vec![UNUSED; source.vertex_count()];

    let index_count: usize = faces.iter().map(|f| f.len()).sum();
    let mut out = PolyMesh::with_capacity(source.vertex_count(), faces.len(), index_count);

    for face in faces {
        let mut mapped = Vec::with_capacity(face.len());
        for &v in face {
            let slot = &mut remap[v as usize];
            if *slot == UNUSED {
                *slot = out.push_vertex(
                    source.pos_x[v as usize],
                    source.pos_y[v as usize],
                    source.pos_z[v as usize],
                );
            }
            mapped.push(*slot);
        }
        out.push_face(&mapped);
    }

    out
}

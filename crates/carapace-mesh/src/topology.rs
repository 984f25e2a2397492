//! Mesh topology queries.
//!
//! Builds adjacency data structures from the face index buffer,
//! enabling the neighbor queries the expansion strategy needs
//! (vertex-to-face fans, shared-vertex face neighbors, edges).

use std::collections::HashMap;

use crate::mesh::PolyMesh;

/// Precomputed topology information for a polygon mesh.
///
/// Built once per run. Two faces are *neighbors* iff they share at
/// least one vertex — the adjacency relation visibility expansion
/// propagates along.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each vertex, the list of faces that contain it.
    pub vertex_faces: Vec<Vec<u32>>,

    /// For each face, its shared-vertex neighbors (sorted, deduplicated,
    /// excluding the face itself).
    pub face_neighbors: Vec<Vec<u32>>,

    /// Unique edges as `(v_min, v_max)` pairs, sorted.
    pub edges: Vec<[u32; 2]>,

    /// For each edge, the faces containing it. Boundary edges have
    /// exactly one.
    pub edge_faces: Vec<Vec<u32>>,
}

impl Topology {
    /// Build topology from a polygon mesh.
    pub fn build(mesh: &PolyMesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let face_count = mesh.face_count();

        // Vertex → face adjacency
        let mut vertex_faces: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        for f in 0..face_count {
            for &v in mesh.face(f) {
                vertex_faces[v as usize].push(f as u32);
            }
        }

        // Face → face neighbors through shared vertices
        let mut face_neighbors: Vec<Vec<u32>> = Vec::with_capacity(face_count);
        for f in 0..face_count {
            let mut neighbors: Vec<u32> = mesh
                .face(f)
                .iter()
                .flat_map(|&v| vertex_faces[v as usize].iter().copied())
                .filter(|&other| other != f as u32)
                .collect();
            neighbors.sort_unstable();
            neighbors.dedup();
            face_neighbors.push(neighbors);
        }

        // Edge → face map, keyed on (min, max) to canonicalize direction
        let mut edge_map: HashMap<(u32, u32), Vec<u32>> = HashMap::new();
        for f in 0..face_count {
            for [v0, v1] in mesh.face_edges(f) {
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                edge_map.entry(key).or_default().push(f as u32);
            }
        }

        // Sorted key order keeps edge indices reproducible across runs.
        let mut keys: Vec<(u32, u32)> = edge_map.keys().copied().collect();
        keys.sort_unstable();

        let mut edges: Vec<[u32; 2]> = Vec::with_capacity(keys.len());
        let mut edge_faces: Vec<Vec<u32>> = Vec::with_capacity(keys.len());
        for key in keys {
            edges.push([key.0, key.1]);
            edge_faces.push(edge_map.remove(&key).unwrap_or_default());
        }

        Self {
            vertex_faces,
            face_neighbors,
            edges,
            edge_faces,
        }
    }

    /// Shared-vertex neighbors of face `f`.
    #[inline]
    pub fn neighbors(&self, f: usize) -> &[u32] {
        &self.face_neighbors[f]
    }

    /// Returns the number of boundary edges (edges with one adjacent face).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_faces.iter().filter(|faces| faces.len() == 1).count()
    }

    /// Returns true if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }
}

//! Core polygon mesh type with SoA (Structure of Arrays) layout.
//!
//! Vertex coordinates live in per-channel contiguous arrays:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! Faces are ranges into a flat vertex-index buffer, so quads and
//! larger polygons are first-class alongside triangles:
//! - `face_offsets: [0, 4, 7, ...]` (length = face count + 1)
//! - `face_vertices: [v0, v1, v2, v3, v4, v5, v6, ...]`

use carapace_math::Vec3;
use serde::{Deserialize, Serialize};
use carapace_types::{CarapaceError, CarapaceResult};

/// A polygon mesh stored in Structure-of-Arrays layout.
///
/// Face `f` occupies `face_vertices[face_offsets[f]..face_offsets[f+1]]`,
/// listing its vertex indices in winding order. Every face has at least
/// three vertices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolyMesh {
    // --- Vertex data (SoA) ---
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    // --- Face data ---
    /// Exclusive end offset of each face into `face_vertices`,
    /// preceded by 0. Length = face count + 1.
    pub face_offsets: Vec<u32>,
    /// Vertex indices of all faces, concatenated in winding order.
    pub face_vertices: Vec<u32>,
}

impl PolyMesh {
    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, face_capacity: usize, index_capacity: usize) -> Self {
        let mut face_offsets = Vec::with_capacity(face_capacity + 1);
        face_offsets.push(0);
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            face_offsets,
            face_vertices: Vec::with_capacity(index_capacity),
        }
    }

    /// Builds a mesh from a position list and per-face index lists.
    ///
    /// Validates the result before returning it.
    pub fn from_face_lists(positions: &[[f32; 3]], faces: &[Vec<u32>]) -> CarapaceResult<Self> {
        let index_count: usize = faces.iter().map(|f| f.len()).sum();
        let mut mesh = Self::with_capacity(positions.len(), faces.len(), index_count);
        for p in positions {
            mesh.push_vertex(p[0], p[1], p[2]);
        }
        for face in faces {
            mesh.push_face(face);
        }
        mesh.validate()?;
        Ok(mesh)
    }

    /// Appends a vertex, returning its index.
    #[inline]
    pub fn push_vertex(&mut self, x: f32, y: f32, z: f32) -> u32 {
        let idx = self.pos_x.len() as u32;
        self.pos_x.push(x);
        self.pos_y.push(y);
        self.pos_z.push(z);
        idx
    }

    /// Appends a face given its vertex indices in winding order.
    #[inline]
    pub fn push_face(&mut self, vertices: &[u32]) {
        self.face_vertices.extend_from_slice(vertices);
        self.face_offsets.push(self.face_vertices.len() as u32);
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_offsets.len().saturating_sub(1)
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the position as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the vertex indices of face `f` in winding order.
    #[inline]
    pub fn face(&self, f: usize) -> &[u32] {
        let start = self.face_offsets[f] as usize;
        let end = self.face_offsets[f + 1] as usize;
        &self.face_vertices[start..end]
    }

    /// Returns the cyclic edges of face `f` as `[v_i, v_next]` pairs.
    pub fn face_edges(&self, f: usize) -> Vec<[u32; 2]> {
        let verts = self.face(f);
        let n = verts.len();
        (0..n).map(|i| [verts[i], verts[(i + 1) % n]]).collect()
    }

    /// Largest vertex distance from the origin.
    ///
    /// The camera rig radius should exceed this for the mesh to lie
    /// fully inside the rig sphere.
    pub fn bounding_radius(&self) -> f32 {
        (0..self.vertex_count())
            .map(|i| self.position_vec3(i).length())
            .fold(0.0, f32::max)
    }

    /// Axis-aligned bounds of all vertices as `(min, max)`.
    ///
    /// Returns `(Vec3::ZERO, Vec3::ZERO)` for an empty mesh.
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        if self.vertex_count() == 0 {
            return (Vec3::ZERO, Vec3::ZERO);
        }
        let mut min = self.position_vec3(0);
        let mut max = min;
        for i in 1..self.vertex_count() {
            let p = self.position_vec3(i);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Face offsets start at 0, are monotone, and end at the index
    ///   buffer length
    /// - Every face has at least 3 vertices
    /// - All face indices are within bounds
    /// - No face repeats a vertex index
    pub fn validate(&self) -> CarapaceResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(CarapaceError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        match self.face_offsets.first() {
            Some(0) => {}
            _ => {
                return Err(CarapaceError::InvalidMesh(
                    "Face offsets must start with 0".into(),
                ));
            }
        }
        if let Some(&last) = self.face_offsets.last() {
            if last as usize != self.face_vertices.len() {
                return Err(CarapaceError::InvalidMesh(format!(
                    "Last face offset ({}) != index buffer length ({})",
                    last,
                    self.face_vertices.len()
                )));
            }
        }

        for f in 0..self.face_count() {
            let start = self.face_offsets[f];
            let end = self.face_offsets[f + 1];
            if end < start {
                return Err(CarapaceError::InvalidMesh(format!(
                    "Face {} has decreasing offsets [{}, {}]",
                    f, start, end
                )));
            }
            let arity = (end - start) as usize;
            if arity < 3 {
                return Err(CarapaceError::InvalidMesh(format!(
                    "Face {} has {} vertices (minimum 3)",
                    f, arity
                )));
            }

            let verts = &self.face_vertices[start as usize..end as usize];
            for (i, &idx) in verts.iter().enumerate() {
                if idx as usize >= n {
                    return Err(CarapaceError::InvalidMesh(format!(
                        "Face {} index {} is out of range (vertex count: {})",
                        f, idx, n
                    )));
                }
                // Repeated indices within one face collapse its area.
                for &other in &verts[i + 1..] {
                    if idx == other {
                        return Err(CarapaceError::InvalidMesh(format!(
                            "Face {} repeats vertex index {}",
                            f, idx
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

//! # carapace-mesh
//!
//! Polygon mesh representation with Structure-of-Arrays (SoA) vertex
//! storage and offset-encoded faces of arbitrary arity (≥ 3).
//!
//! ## Key Types
//!
//! - [`PolyMesh`] — The core mesh type. Stores positions in contiguous
//!   SoA buffers and faces as ranges into a flat index buffer.
//! - [`Topology`] — Adjacency queries (vertex-to-face, shared-vertex
//!   face neighbors, canonical edges).
//! - [`FaceData`] — Precomputed per-face normals, centroids, and
//!   degeneracy flags.
//! - Editor operations: visibility-driven face deletion, vertex
//!   welding, and mesh merging. The mesh is mutable only through these
//!   functions — the visibility engine is a pure reader.
//! - Procedural generators for test and benchmark meshes.

pub mod edit;
pub mod generators;
pub mod merge;
pub mod mesh;
pub mod normals;
pub mod topology;
pub mod weld;

pub use edit::{delete_unseen_faces, EditReport};
pub use merge::merge_meshes;
pub use mesh::PolyMesh;
pub use normals::{check_degenerate, compute_face_data, FaceData};
pub use topology::Topology;
pub use weld::weld_vertices;

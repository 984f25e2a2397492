//! # carapace-visibility
//!
//! The visibility engine: which faces can at least one rig camera see?
//!
//! For every camera, sample points derived from each face (centroid,
//! optionally vertices and edge midpoints) are tested with a cheap
//! cone pre-filter followed by a nearest-hit ray cast; a face is
//! visible once any sample of it survives the self-occlusion check
//! from any camera. Marks are monotonic across cameras — a face seen
//! from camera 2 stays seen while camera 3 runs.
//!
//! Two strategies pick which faces each camera examines:
//!
//! - [`Strategy::Exhaustive`] — every not-yet-visible face, the
//!   correctness baseline.
//! - [`Strategy::RandomizedExpansion`] — a seeded random subset of
//!   faces starts a frontier that grows across shared-vertex neighbors
//!   of similar normal. Cheap on smooth meshes; faces unreachable from
//!   any seed stay invisible by design.
//!
//! [`CullingPipeline`] wires the full run: rig generation, oracle
//! build, visibility, mesh editing, and the summary record.

pub mod config;
pub mod engine;
pub mod marks;
pub mod pipeline;
pub mod sampling;

pub use config::{Precision, Strategy, VisibilityConfig};
pub use engine::{
    compute_visibility, CancelToken, ExpansionStats, PassStats, VisibilityEngine, VisibilityReport,
};
pub use marks::VisibilityMarks;
pub use pipeline::{CullMode, CullingPipeline, RunOutput, RunParams, RunSummary};

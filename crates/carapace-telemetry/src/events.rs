//! Culling-run event types.
//!
//! Structured events emitted by the pipeline at each stage of a run.
//! Events are lightweight value types that carry just enough data to
//! be useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// An event emitted during a culling run.
///
/// Events are tagged with a monotonically increasing stage index and
/// carry stage-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    /// Stage number within the run (0-indexed, increasing).
    pub stage: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// Camera rig generated.
    RigGenerated {
        /// Number of cameras in the rig.
        camera_count: usize,
    },

    /// Intersection oracle built.
    OracleBuilt {
        /// Number of mesh faces indexed.
        face_count: usize,
        /// Number of spatial index nodes.
        node_count: usize,
        /// Wall-clock build time (seconds).
        build_time: f64,
    },

    /// A camera's visibility pass completed.
    CameraPassEnd {
        /// Camera index within the rig.
        camera: usize,
        /// Faces first marked visible during this pass.
        newly_visible: usize,
        /// Rays dispatched to the oracle.
        rays_cast: u64,
        /// Sample points rejected by the cone pre-filter.
        samples_rejected: u64,
    },

    /// Frontier statistics for an expansion pass.
    ExpansionStats {
        /// Camera index within the rig.
        camera: usize,
        /// Number of seed faces the frontier started from.
        seeds: usize,
        /// Faces pushed by neighbor propagation.
        expanded: usize,
        /// Largest frontier size observed.
        frontier_peak: usize,
    },

    /// Mesh edit applied.
    EditApplied {
        /// Face count before the edit.
        faces_before: usize,
        /// Face count after the edit.
        faces_after: usize,
        /// Vertices merged by the weld pass.
        welded_vertices: usize,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl RunEvent {
    /// Creates a new event for the given stage.
    pub fn new(stage: u32, kind: EventKind) -> Self {
        Self { stage, kind }
    }
}

//! Run input/output contract types.
//!
//! These types define the I/O boundary of the culling core. They are
//! serializable for CLI configuration and API transport: meshes
//! round-trip through JSON, parameters through TOML.

use serde::{Deserialize, Serialize};

use carapace_mesh::PolyMesh;
use carapace_visibility::RunParams;

/// Complete input specification for a culling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CullInput {
    /// The mesh (or meshes, with `merge_meshes_first`) to cull.
    pub meshes: Vec<PolyMesh>,

    /// Run parameters: rig, visibility, edit mode, weld.
    pub params: RunParams,
}

impl CullInput {
    /// Wraps a single mesh with the given parameters.
    pub fn single(mesh: PolyMesh, params: RunParams) -> Self {
        Self {
            meshes: vec![mesh],
            params,
        }
    }
}

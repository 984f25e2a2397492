//! File loading and saving for meshes and run parameters.
//!
//! Meshes round-trip through JSON, parameters through TOML. Parse
//! failures map onto the error taxonomy (`Serialization` for mesh
//! data, `InvalidConfig` for parameter files); filesystem failures
//! surface as `Io`.

use std::fs;

use carapace_mesh::PolyMesh;
use carapace_types::{CarapaceError, CarapaceResult};
use carapace_visibility::RunParams;

/// Loads a mesh from a JSON file.
pub fn load_mesh_json(path: &str) -> CarapaceResult<PolyMesh> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| CarapaceError::Serialization(format!("{path}: {e}")))
}

/// Writes a mesh to a JSON file.
pub fn save_mesh_json(path: &str, mesh: &PolyMesh) -> CarapaceResult<()> {
    let text = serde_json::to_string(mesh)
        .map_err(|e| CarapaceError::Serialization(e.to_string()))?;
    fs::write(path, text)?;
    Ok(())
}

/// Loads run parameters from a TOML file. Missing fields fall back to
/// their defaults.
pub fn load_params_toml(path: &str) -> CarapaceResult<RunParams> {
    let text = fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| CarapaceError::InvalidConfig(format!("{path}: {e}")))
}

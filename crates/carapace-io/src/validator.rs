//! Input validation.
//!
//! Validates culling inputs before the pipeline receives them,
//! catching data-level errors early with clear diagnostics.

use carapace_types::{CarapaceError, CarapaceResult};

use crate::contract::CullInput;

/// Validates a complete culling input.
///
/// Checks:
/// - At least one mesh with at least one face
/// - Every mesh's integrity (offsets, indices, arity)
/// - Multiple meshes only with the pre-merge flag
/// - Parameter ranges (rig, visibility, weld)
/// - Rig radius against the input's bounding radius
pub fn validate_input(input: &CullInput) -> CarapaceResult<()> {
    if input.meshes.is_empty() {
        return Err(CarapaceError::NoTargetGeometry(
            "input contains no meshes".into(),
        ));
    }

    let mut total_faces = 0usize;
    let mut bounding_radius = 0.0f32;
    for (i, mesh) in input.meshes.iter().enumerate() {
        mesh.validate()
            .map_err(|e| CarapaceError::InvalidMesh(format!("Mesh {}: {}", i, e)))?;
        total_faces += mesh.face_count();
        bounding_radius = bounding_radius.max(mesh.bounding_radius());
    }
    if total_faces == 0 {
        return Err(CarapaceError::NoTargetGeometry(
            "input meshes contain no faces".into(),
        ));
    }

    if input.meshes.len() > 1 && !input.params.merge_meshes_first {
        return Err(CarapaceError::InvalidParameter(
            "multiple input meshes require merge_meshes_first".into(),
        ));
    }

    input.params.validate()?;

    if input.params.rig.radius <= bounding_radius {
        return Err(CarapaceError::InvalidParameter(format!(
            "rig radius {} does not clear the mesh bounding radius {:.4}",
            input.params.rig.radius, bounding_radius
        )));
    }

    Ok(())
}

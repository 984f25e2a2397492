//! Benchmark scenarios — procedural mesh + run parameters for each
//! test case.
//!
//! Three canonical scenarios for regression testing:
//! 1. **Convex cube** — no self-occlusion, nothing may be removed
//! 2. **Nested cube** — a sealed inner box that must disappear
//! 3. **Sphere shell** — a dense mesh for throughput measurement

use serde::{Deserialize, Serialize};

use carapace_mesh::generators::{cube, nested_cube, uv_sphere};
use carapace_mesh::PolyMesh;
use carapace_visibility::{Precision, RunParams, VisibilityConfig};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// 6-face cube; a correct run removes nothing.
    ConvexCube,
    /// Cube with a sealed inner box; the inner half must be removed.
    NestedCube,
    /// Dense UV sphere; throughput measurement.
    SphereShell,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::ConvexCube,
            ScenarioKind::NestedCube,
            ScenarioKind::SphereShell,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::ConvexCube => "convex_cube",
            ScenarioKind::NestedCube => "nested_cube",
            ScenarioKind::SphereShell => "sphere_shell",
        }
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Target mesh.
    pub mesh: PolyMesh,
    /// Run parameters.
    pub params: RunParams,
    /// Exact removal percentage a correct run must report, when the
    /// scenario pins one down.
    pub expected_removal: Option<f32>,
}

impl Scenario {
    /// Create the convex cube scenario.
    ///
    /// A 2 m cube under the default 4×4 rig at radius 10, high
    /// precision: every face is visible, removal must be 0%.
    pub fn convex_cube() -> Self {
        Self {
            kind: ScenarioKind::ConvexCube,
            mesh: cube(2.0),
            params: RunParams {
                visibility: VisibilityConfig {
                    precision: Precision::FaceCenterVertsEdges,
                    ..Default::default()
                },
                ..Default::default()
            },
            expected_removal: Some(0.0),
        }
    }

    /// Create the nested cube scenario.
    ///
    /// The sealed inner box is occluded from every camera: exactly
    /// half the faces must be removed.
    pub fn nested_cube() -> Self {
        Self {
            kind: ScenarioKind::NestedCube,
            mesh: nested_cube(2.0, 1.0),
            params: RunParams {
                visibility: VisibilityConfig {
                    precision: Precision::FaceCenterVertsEdges,
                    ..Default::default()
                },
                ..Default::default()
            },
            expected_removal: Some(50.0),
        }
    }

    /// Create the sphere shell scenario.
    ///
    /// A dense UV sphere under a 4×6 rig; measures ray throughput
    /// rather than a pinned removal figure.
    pub fn sphere_shell() -> Self {
        let mut params = RunParams::default();
        params.rig.cameras_per_row = 6;
        Self {
            kind: ScenarioKind::SphereShell,
            mesh: uv_sphere(1.0, 24, 48),
            params,
            expected_removal: None,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::ConvexCube => Self::convex_cube(),
            ScenarioKind::NestedCube => Self::nested_cube(),
            ScenarioKind::SphereShell => Self::sphere_shell(),
        }
    }
}

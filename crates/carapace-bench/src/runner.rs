//! Benchmark runner — executes scenarios and collects metrics.

use std::time::Instant;

use carapace_mesh::{compute_face_data, delete_unseen_faces, Topology};
use carapace_raycast::BvhCaster;
use carapace_rig::generate;
use carapace_types::CarapaceResult;
use carapace_visibility::{CancelToken, VisibilityEngine};

use crate::metrics::CullMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchRunner;

impl BenchRunner {
    /// Run a single scenario.
    ///
    /// Returns metrics for the completed run.
    pub fn run(scenario: &Scenario) -> CarapaceResult<CullMetrics> {
        let total_start = Instant::now();

        let rig = generate(&scenario.params.rig)?;

        let build_start = Instant::now();
        let caster = BvhCaster::build(&scenario.mesh)?;
        let oracle_build_time = build_start.elapsed().as_secs_f64();

        let topology = Topology::build(&scenario.mesh);
        let face_data = compute_face_data(&scenario.mesh);

        let engine = VisibilityEngine::new(&scenario.mesh, &topology, &face_data, &caster);
        let visibility_start = Instant::now();
        let report = engine.compute(
            rig.cameras(),
            &scenario.params.visibility,
            &CancelToken::new(),
        )?;
        let visibility_time = visibility_start.elapsed().as_secs_f64();

        let (_, edit) = delete_unseen_faces(&scenario.mesh, &report.marks.to_flags());

        let total_wall_time = total_start.elapsed().as_secs_f64();
        let rays_cast: u64 = report.passes.iter().map(|p| p.rays_cast).sum();
        let avg_pass_time = if rig.len() > 0 {
            visibility_time / rig.len() as f64
        } else {
            0.0
        };

        Ok(CullMetrics {
            scenario: scenario.kind.name().to_string(),
            total_faces: edit.faces_before,
            visible_faces: report.marks.count(),
            removal_percent: edit.removal_percent(),
            camera_count: rig.len(),
            total_wall_time,
            oracle_build_time,
            visibility_time,
            avg_pass_time,
            rays_cast,
        })
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> CarapaceResult<Vec<CullMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind);
            let metrics = Self::run(&scenario)?;
            results.push(metrics);
        }
        Ok(results)
    }
}

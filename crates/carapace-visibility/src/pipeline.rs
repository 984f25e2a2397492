//! The end-to-end culling pipeline: rig → oracle → visibility → edit.
//!
//! The pipeline never mutates its input in place. Edits are computed
//! into a fresh mesh and only returned on success, so a failed or
//! cancelled run always leaves the source geometry exactly as it was.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use carapace_mesh::{
    compute_face_data, delete_unseen_faces, merge_meshes, weld_vertices, EditReport, PolyMesh,
    Topology,
};
use carapace_raycast::BvhCaster;
use carapace_rig::{generate, Camera, RigParams};
use carapace_telemetry::{EventBus, EventKind, EventSink, RunEvent};
use carapace_types::constants::WELD_EPSILON;
use carapace_types::{CarapaceError, CarapaceResult};

use crate::config::VisibilityConfig;
use crate::engine::{CancelToken, VisibilityEngine};

/// What to do with the faces no camera sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullMode {
    /// Delete unseen faces, then dangling edges, then orphan vertices.
    Delete,
    /// Leave topology untouched; return the visible set as a selection.
    SelectOuter,
}

/// Complete parameter set for one culling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// Edit mode.
    pub mode: CullMode,
    /// Promote the rig's cameras to the output instead of dropping
    /// them at run end.
    pub keep_cameras: bool,
    /// Merge multiple input meshes before the run.
    pub merge_meshes_first: bool,
    /// Weld near-duplicate vertices after deletion.
    pub weld_after: bool,
    /// Merge-by-distance threshold for the weld pass.
    pub weld_epsilon: f32,
    /// Camera rig parameters.
    pub rig: RigParams,
    /// Visibility engine configuration.
    pub visibility: VisibilityConfig,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            mode: CullMode::Delete,
            keep_cameras: false,
            merge_meshes_first: false,
            weld_after: false,
            weld_epsilon: WELD_EPSILON,
            rig: RigParams::default(),
            visibility: VisibilityConfig::default(),
        }
    }
}

impl RunParams {
    /// Fail-fast validation of every parameter group, before any
    /// geometry is touched.
    pub fn validate(&self) -> CarapaceResult<()> {
        self.rig.validate()?;
        self.visibility.validate()?;
        if !self.weld_epsilon.is_finite() || self.weld_epsilon <= 0.0 {
            return Err(CarapaceError::InvalidParameter(format!(
                "weld_epsilon must be positive and finite (got {})",
                self.weld_epsilon
            )));
        }
        Ok(())
    }
}

/// The run's summary record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunSummary {
    /// Faces in the (merged) input mesh.
    pub total_faces: usize,
    /// Faces at least one camera saw.
    pub visible_faces: usize,
    /// Percentage of faces removed (or removable, in select mode).
    /// An empty input counts as 0%, not a division fault.
    pub removal_percent: f32,
    /// Cameras in the rig.
    pub camera_count: usize,
}

impl RunSummary {
    fn new(total_faces: usize, visible_faces: usize, camera_count: usize) -> Self {
        let removal_percent = if total_faces == 0 {
            0.0
        } else {
            (total_faces - visible_faces) as f32 / total_faces as f32 * 100.0
        };
        Self {
            total_faces,
            visible_faces,
            removal_percent,
            camera_count,
        }
    }
}

/// Everything a run hands back to the caller.
pub struct RunOutput {
    /// The edited mesh (`Delete`) or the untouched input (`SelectOuter`
    /// and cancelled runs).
    pub mesh: PolyMesh,
    /// Per-face visibility flags, present unless deletion consumed them.
    pub selection: Option<Vec<bool>>,
    /// The summary record.
    pub summary: RunSummary,
    /// Deletion/weld statistics (`Delete` only).
    pub edit: Option<EditReport>,
    /// The rig's cameras, promoted to caller ownership when
    /// `keep_cameras` was set.
    pub cameras: Option<Vec<Camera>>,
    /// True when the run stopped at a cancellation point (no edits
    /// were applied).
    pub cancelled: bool,
}

/// Orchestrates one culling run end to end.
pub struct CullingPipeline {
    params: RunParams,
    bus: EventBus,
    cancel: CancelToken,
}

impl CullingPipeline {
    /// Creates a pipeline for the given parameters.
    pub fn new(params: RunParams) -> Self {
        Self {
            params,
            bus: EventBus::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Registers a telemetry sink.
    pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.bus.add_sink(sink);
        self
    }

    /// A handle callers can use to cancel the run between camera
    /// passes.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The run parameters.
    pub fn params(&self) -> &RunParams {
        &self.params
    }

    /// Runs the pipeline over the input meshes.
    ///
    /// Stages: parameter validation → optional pre-merge → rig
    /// generation → oracle build → visibility → edit → summary.
    /// Any error before the edit stage leaves every input unchanged.
    pub fn run(&mut self, mut meshes: Vec<PolyMesh>) -> CarapaceResult<RunOutput> {
        self.params.validate()?;

        let mesh = if meshes.len() > 1 {
            if !self.params.merge_meshes_first {
                return Err(CarapaceError::InvalidParameter(
                    "multiple input meshes require merge_meshes_first".into(),
                ));
            }
            merge_meshes(&meshes)?
        } else {
            match meshes.pop() {
                Some(mesh) => mesh,
                None => {
                    return Err(CarapaceError::NoTargetGeometry("no input meshes".into()));
                }
            }
        };
        mesh.validate()?;
        if mesh.face_count() == 0 {
            return Err(CarapaceError::NoTargetGeometry("mesh has no faces".into()));
        }

        let mut stage = 0u32;

        // Camera rig — owned by this run, dropped at run end unless
        // promoted below.
        let rig = generate(&self.params.rig)?;
        let camera_count = rig.len();
        self.bus.emit(RunEvent::new(
            stage,
            EventKind::RigGenerated { camera_count },
        ));
        stage += 1;

        let bounding = mesh.bounding_radius();
        if self.params.rig.radius <= bounding {
            tracing::warn!(
                radius = self.params.rig.radius,
                bounding_radius = bounding,
                "rig radius does not clear the mesh bounds"
            );
        }

        // Intersection oracle.
        let build_start = Instant::now();
        let caster = BvhCaster::build(&mesh)?;
        self.bus.emit(RunEvent::new(
            stage,
            EventKind::OracleBuilt {
                face_count: mesh.face_count(),
                node_count: caster.node_count(),
                build_time: build_start.elapsed().as_secs_f64(),
            },
        ));
        stage += 1;

        // Derived structures, built once per run.
        let topology = Topology::build(&mesh);
        let face_data = compute_face_data(&mesh);

        // Visibility.
        let engine = VisibilityEngine::new(&mesh, &topology, &face_data, &caster);
        let report = engine.compute(rig.cameras(), &self.params.visibility, &self.cancel)?;
        for stats in &report.passes {
            self.bus.emit(RunEvent::new(
                stage,
                EventKind::CameraPassEnd {
                    camera: stats.camera.index(),
                    newly_visible: stats.newly_visible,
                    rays_cast: stats.rays_cast,
                    samples_rejected: stats.samples_rejected,
                },
            ));
            if let Some(exp) = stats.expansion {
                self.bus.emit(RunEvent::new(
                    stage,
                    EventKind::ExpansionStats {
                        camera: stats.camera.index(),
                        seeds: exp.seeds,
                        expanded: exp.expanded,
                        frontier_peak: exp.frontier_peak,
                    },
                ));
            }
            stage += 1;
        }

        let summary = RunSummary::new(mesh.face_count(), report.marks.count(), camera_count);

        let cameras = if self.params.keep_cameras {
            Some(rig.into_cameras())
        } else {
            None
        };

        // A cancelled run never edits; the selection computed so far is
        // handed back with the input untouched.
        if report.cancelled {
            self.bus.flush();
            return Ok(RunOutput {
                mesh,
                selection: Some(report.marks.to_flags()),
                summary,
                edit: None,
                cameras,
                cancelled: true,
            });
        }

        match self.params.mode {
            CullMode::SelectOuter => {
                self.bus.flush();
                Ok(RunOutput {
                    mesh,
                    selection: Some(report.marks.to_flags()),
                    summary,
                    edit: None,
                    cameras,
                    cancelled: false,
                })
            }
            CullMode::Delete => {
                let flags = report.marks.to_flags();
                let (mut edited, mut edit) = delete_unseen_faces(&mesh, &flags);

                if self.params.weld_after && edited.face_count() > 0 {
                    let (welded, merged) = weld_vertices(&edited, self.params.weld_epsilon);
                    edited = welded;
                    edit.welded_vertices = merged;
                    edit.faces_after = edited.face_count();
                    edit.vertices_after = edited.vertex_count();
                }

                self.bus.emit(RunEvent::new(
                    stage,
                    EventKind::EditApplied {
                        faces_before: edit.faces_before,
                        faces_after: edit.faces_after,
                        welded_vertices: edit.welded_vertices,
                    },
                ));
                self.bus.flush();

                Ok(RunOutput {
                    mesh: edited,
                    selection: None,
                    summary,
                    edit: Some(edit),
                    cameras,
                    cancelled: false,
                })
            }
        }
    }
}

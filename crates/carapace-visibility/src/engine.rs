//! Per-camera visibility passes.
//!
//! The per-sample test is identical for both strategies: a cone
//! pre-filter against the camera's half field-of-view, then a
//! nearest-hit ray cast whose hit must land within the visibility
//! epsilon of the sample point. What differs is which faces a camera
//! examines — all of them, or a seeded frontier grown across
//! similar-normal neighbors.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use carapace_math::{angle_between_units, Vec3};
use carapace_mesh::{FaceData, PolyMesh, Topology};
use carapace_raycast::{Ray, RayCaster};
use carapace_rig::Camera;
use carapace_types::constants::DEFAULT_SEED;
use carapace_types::{CameraId, CarapaceResult};

use crate::config::{Strategy, VisibilityConfig};
use crate::marks::VisibilityMarks;
use crate::sampling::sample_points;

/// Cooperative cancellation flag, checked between camera passes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. The engine finishes the in-flight camera
    /// pass and stops before the next one.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Statistics of one camera's pass.
#[derive(Debug, Clone, Copy)]
pub struct PassStats {
    /// Camera index within the rig.
    pub camera: CameraId,
    /// Faces first marked visible during this pass.
    pub newly_visible: usize,
    /// Rays dispatched to the oracle.
    pub rays_cast: u64,
    /// Sample points rejected by the cone pre-filter.
    pub samples_rejected: u64,
    /// Frontier statistics (expansion strategy only).
    pub expansion: Option<ExpansionStats>,
}

/// Frontier bookkeeping of one expansion pass.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionStats {
    /// Number of seed faces the frontier started from.
    pub seeds: usize,
    /// Faces pushed by neighbor propagation.
    pub expanded: usize,
    /// Largest frontier size observed.
    pub frontier_peak: usize,
}

/// Result of a full visibility computation.
pub struct VisibilityReport {
    /// The accumulated visibility marks.
    pub marks: VisibilityMarks,
    /// Per-camera statistics, in camera order.
    pub passes: Vec<PassStats>,
    /// True when the run stopped early at a cancellation point.
    pub cancelled: bool,
}

/// Pass-local atomic counters; shared with rayon workers in the
/// parallel sweep.
#[derive(Default)]
struct PassCounters {
    rays_cast: AtomicU64,
    samples_rejected: AtomicU64,
    newly_visible: AtomicU64,
}

/// The visibility engine. Borrows the mesh and its derived structures
/// immutably — mesh mutation is the editor's job, after all passes.
pub struct VisibilityEngine<'a> {
    mesh: &'a PolyMesh,
    topology: &'a Topology,
    face_data: &'a FaceData,
    caster: &'a dyn RayCaster,
}

impl<'a> VisibilityEngine<'a> {
    /// Creates an engine over prebuilt derived structures.
    pub fn new(
        mesh: &'a PolyMesh,
        topology: &'a Topology,
        face_data: &'a FaceData,
        caster: &'a dyn RayCaster,
    ) -> Self {
        Self {
            mesh,
            topology,
            face_data,
            caster,
        }
    }

    /// Runs every camera's pass, accumulating monotonic marks.
    ///
    /// The visible set is a union over cameras: camera order cannot
    /// shrink it, and for a fixed seed the result is independent of
    /// that order.
    pub fn compute(
        &self,
        cameras: &[Camera],
        config: &VisibilityConfig,
        cancel: &CancelToken,
    ) -> CarapaceResult<VisibilityReport> {
        config.validate()?;

        let marks = VisibilityMarks::new(self.mesh.face_count());
        let mut passes = Vec::with_capacity(cameras.len());
        let mut cancelled = false;

        // Expansion seeds are drawn once per run; every camera's
        // frontier re-initializes from the same set.
        let seeds = match config.strategy {
            Strategy::RandomizedExpansion => self.draw_seeds(config),
            Strategy::Exhaustive => Vec::new(),
        };

        for (index, camera) in cameras.iter().enumerate() {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            let id = CameraId(index as u16);
            let stats = match config.strategy {
                Strategy::Exhaustive => self.exhaustive_pass(id, camera, config, &marks),
                Strategy::RandomizedExpansion => {
                    self.expansion_pass(id, camera, config, &marks, &seeds)
                }
            };
            passes.push(stats);
        }

        Ok(VisibilityReport {
            marks,
            passes,
            cancelled,
        })
    }

    /// Draws the once-per-run seed face set: `ceil(faces × ratio/100)`
    /// distinct faces, minimum 1, from the caller-seeded RNG. Sorted
    /// ascending so the frontier replays identically for equal seeds.
    fn draw_seeds(&self, config: &VisibilityConfig) -> Vec<u32> {
        let n = self.mesh.face_count();
        if n == 0 {
            return Vec::new();
        }
        let amount = (n * config.sampling_ratio as usize).div_ceil(100).clamp(1, n);
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        let mut seeds: Vec<u32> = rand::seq::index::sample(&mut rng, n, amount)
            .iter()
            .map(|i| i as u32)
            .collect();
        seeds.sort_unstable();
        seeds
    }

    /// Tests every not-yet-visible, non-degenerate face against one
    /// camera.
    fn exhaustive_pass(
        &self,
        index: CameraId,
        camera: &Camera,
        config: &VisibilityConfig,
        marks: &VisibilityMarks,
    ) -> PassStats {
        let counters = PassCounters::default();
        let face_count = self.mesh.face_count();

        if config.parallel {
            (0..face_count).into_par_iter().for_each(|f| {
                if marks.is_visible(f) || self.face_data.degenerate[f] {
                    return;
                }
                let mut samples = Vec::new();
                if self.face_seen_from(camera, f, config, &mut samples, &counters)
                    && marks.mark(f)
                {
                    counters.newly_visible.fetch_add(1, Ordering::Relaxed);
                }
            });
        } else {
            let mut samples = Vec::new();
            for f in 0..face_count {
                if marks.is_visible(f) || self.face_data.degenerate[f] {
                    continue;
                }
                if self.face_seen_from(camera, f, config, &mut samples, &counters)
                    && marks.mark(f)
                {
                    counters.newly_visible.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        pass_stats(index, &counters, None)
    }

    /// Frontier pass: pop, test, and propagate to similar-normal
    /// neighbors of each newly confirmed face.
    ///
    /// Terminates because every pop either discards the face or moves
    /// it to `checked`, and the `queued` guard admits each face to the
    /// frontier at most once.
    fn expansion_pass(
        &self,
        index: CameraId,
        camera: &Camera,
        config: &VisibilityConfig,
        marks: &VisibilityMarks,
        seeds: &[u32],
    ) -> PassStats {
        let counters = PassCounters::default();
        let face_count = self.mesh.face_count();
        let flat_cos = config.flatness_angle_deg.to_radians().cos();

        // LIFO frontier seeded in sorted order; checked/queued are
        // per-camera — only the marks carry over between cameras.
        let mut frontier: Vec<u32> = seeds.to_vec();
        let mut checked = vec![false; face_count];
        let mut queued = vec![false; face_count];
        for &s in seeds {
            queued[s as usize] = true;
        }

        let mut samples = Vec::new();
        let mut expanded = 0usize;
        let mut frontier_peak = frontier.len();

        while let Some(face) = frontier.pop() {
            let f = face as usize;
            if checked[f] {
                continue;
            }
            checked[f] = true;

            // A face another camera already confirmed still counts as
            // checked, but is not re-tested and does not propagate.
            if marks.is_visible(f) || self.face_data.degenerate[f] {
                continue;
            }
            if !self.face_seen_from(camera, f, config, &mut samples, &counters) {
                continue;
            }
            if marks.mark(f) {
                counters.newly_visible.fetch_add(1, Ordering::Relaxed);
            }

            let normal = self.face_data.normals[f];
            for &n in self.topology.neighbors(f) {
                let ni = n as usize;
                if checked[ni] || queued[ni] || marks.is_visible(ni) || self.face_data.degenerate[ni]
                {
                    continue;
                }
                if normal.dot(self.face_data.normals[ni]) >= flat_cos {
                    frontier.push(n);
                    queued[ni] = true;
                    expanded += 1;
                }
            }
            frontier_peak = frontier_peak.max(frontier.len());
        }

        pass_stats(
            index,
            &counters,
            Some(ExpansionStats {
                seeds: seeds.len(),
                expanded,
                frontier_peak,
            }),
        )
    }

    /// The per-sample visibility procedure, short-circuiting on the
    /// first sample the camera can see.
    fn face_seen_from(
        &self,
        camera: &Camera,
        face: usize,
        config: &VisibilityConfig,
        samples: &mut Vec<Vec3>,
        counters: &PassCounters,
    ) -> bool {
        sample_points(self.mesh, self.face_data, face, config.precision, samples);
        let half_fov = camera.half_fov();

        for &point in samples.iter() {
            let to_point = point - camera.position;
            let distance = to_point.length();
            if distance <= config.visibility_epsilon {
                // The sample coincides with the camera itself.
                return true;
            }
            let dir = to_point / distance;

            // Cone pre-filter: outside the field of view, skip the cast.
            if angle_between_units(dir, camera.forward) >= half_fov {
                counters.samples_rejected.fetch_add(1, Ordering::Relaxed);
                continue;
            }

            counters.rays_cast.fetch_add(1, Ordering::Relaxed);
            let ray = Ray {
                origin: camera.position,
                dir,
            };
            if let Some(hit) = self.caster.cast(&ray) {
                // Seen iff the line of sight reaches this exact point:
                // the nearest hit must be the sample, not something
                // closer.
                if hit.point.distance(point) < config.visibility_epsilon {
                    return true;
                }
            }
        }
        false
    }
}

fn pass_stats(index: CameraId, counters: &PassCounters, expansion: Option<ExpansionStats>) -> PassStats {
    PassStats {
        camera: index,
        newly_visible: counters.newly_visible.load(Ordering::Relaxed) as usize,
        rays_cast: counters.rays_cast.load(Ordering::Relaxed),
        samples_rejected: counters.samples_rejected.load(Ordering::Relaxed),
        expansion,
    }
}

/// One-call form of the engine: builds nothing, borrows everything.
///
/// Returns the set of visible faces as marks.
pub fn compute_visibility(
    mesh: &PolyMesh,
    topology: &Topology,
    face_data: &FaceData,
    caster: &dyn RayCaster,
    cameras: &[Camera],
    config: &VisibilityConfig,
) -> CarapaceResult<VisibilityMarks> {
    let engine = VisibilityEngine::new(mesh, topology, face_data, caster);
    let report = engine.compute(cameras, config, &CancelToken::new())?;
    Ok(report.marks)
}

//! The oracle contract and its implementations.

use carapace_mesh::PolyMesh;
use carapace_types::{CarapaceResult, FaceId};

use crate::bvh::MeshBvh;
use crate::ray::{Ray, RayHit};
use crate::triangle::{ray_triangle, triangulate, Triangle};

/// Trait for nearest-hit ray query backends.
///
/// The visibility engine depends only on this contract. A caster is an
/// immutable snapshot of the mesh taken at build time, shareable
/// across worker threads.
///
/// # Implementations
/// - [`BvhCaster`] — spatial index, sublinear queries
/// - [`LinearCaster`] — brute-force scan, the correctness baseline
pub trait RayCaster: Send + Sync {
    /// Nearest intersection of `ray` with the scene, or `None`.
    fn cast(&self, ray: &Ray) -> Option<RayHit>;

    /// Returns the caster strategy name.
    fn name(&self) -> &str;
}

/// BVH-backed oracle.
pub struct BvhCaster {
    bvh: MeshBvh,
}

impl BvhCaster {
    /// Builds the spatial index for `mesh`.
    pub fn build(mesh: &PolyMesh) -> CarapaceResult<Self> {
        Ok(Self {
            bvh: MeshBvh::build(mesh)?,
        })
    }

    /// Number of BVH nodes (telemetry).
    pub fn node_count(&self) -> usize {
        self.bvh.node_count()
    }

    /// Number of indexed triangles (telemetry).
    pub fn triangle_count(&self) -> usize {
        self.bvh.triangle_count()
    }
}

impl RayCaster for BvhCaster {
    fn cast(&self, ray: &Ray) -> Option<RayHit> {
        self.bvh.cast(ray)
    }

    fn name(&self) -> &str {
        "bvh"
    }
}

/// Brute-force oracle scanning every triangle per query.
pub struct LinearCaster {
    triangles: Vec<Triangle>,
}

impl LinearCaster {
    /// Collects the triangle soup for `mesh`.
    pub fn build(mesh: &PolyMesh) -> CarapaceResult<Self> {
        Ok(Self {
            triangles: triangulate(mesh)?,
        })
    }
}

impl RayCaster for LinearCaster {
    fn cast(&self, ray: &Ray) -> Option<RayHit> {
        let mut best: Option<(f32, u32)> = None;
        for tri in &self.triangles {
            if let Some(t) = ray_triangle(ray, tri.a, tri.b, tri.c) {
                if best.map_or(true, |(bt, _)| t < bt) {
                    best = Some((t, tri.face));
                }
            }
        }
        best.map(|(t, face)| RayHit {
            point: ray.point_at(t),
            distance: t,
            face: FaceId(face),
        })
    }

    fn name(&self) -> &str {
        "linear"
    }
}

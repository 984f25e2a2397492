//! Bounding-volume hierarchy over the mesh's triangle soup.
//!
//! Binary BVH, longest-axis median split over triangle centroids,
//! flat node array. Built once per run; traversal answers nearest-hit
//! queries with a stack walk ordered by child entry distance and
//! pruned against the best hit so far.

use std::cmp::Ordering;

use carapace_mesh::PolyMesh;
use carapace_types::{CarapaceResult, FaceId};

use crate::aabb::Aabb;
use crate::ray::{Ray, RayHit};
use crate::triangle::{ray_triangle, triangulate, Triangle};

/// Triangles per leaf below which a range stops splitting.
const LEAF_TRIANGLES: usize = 4;

/// One BVH node. A leaf covers `start..start + count` of the triangle
/// array; an internal node has `count == 0` and two children.
#[derive(Debug, Clone, Copy)]
struct BvhNode {
    aabb: Aabb,
    left: u32,
    right: u32,
    start: u32,
    count: u32,
}

/// A BVH built over the fan-triangulated faces of one mesh.
#[derive(Debug, Clone)]
pub struct MeshBvh {
    nodes: Vec<BvhNode>,
    triangles: Vec<Triangle>,
}

impl MeshBvh {
    /// Builds the hierarchy for `mesh`.
    ///
    /// Fails with `OracleUnavailable` when the mesh yields nothing to
    /// index (no faces, non-finite coordinates).
    pub fn build(mesh: &PolyMesh) -> CarapaceResult<Self> {
        let mut triangles = triangulate(mesh)?;
        let count = triangles.len();
        let mut nodes = Vec::with_capacity(2 * count);
        build_range(&mut nodes, &mut triangles, 0, count);
        Ok(Self { nodes, triangles })
    }

    /// Number of nodes in the hierarchy.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of indexed triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Nearest intersection of `ray` with the indexed mesh.
    pub fn cast(&self, ray: &Ray) -> Option<RayHit> {
        let inv_dir = ray.dir.recip();
        let mut best_t = f32::INFINITY;
        let mut best_face = 0u32;

        let mut stack: Vec<u32> = Vec::with_capacity(64);
        stack.push(0);

        while let Some(idx) = stack.pop() {
            let node = self.nodes[idx as usize];
            // The best hit may have tightened since this node was pushed.
            if node.aabb.ray_entry(ray, inv_dir, best_t).is_none() {
                continue;
            }

            if node.count > 0 {
                let start = node.start as usize;
                for tri in &self.triangles[start..start + node.count as usize] {
                    if let Some(t) = ray_triangle(ray, tri.a, tri.b, tri.c) {
                        if t < best_t {
                            best_t = t;
                            best_face = tri.face;
                        }
                    }
                }
            } else {
                let left_entry = self.nodes[node.left as usize]
                    .aabb
                    .ray_entry(ray, inv_dir, best_t);
                let right_entry = self.nodes[node.right as usize]
                    .aabb
                    .ray_entry(ray, inv_dir, best_t);

                // Push the farther child first so the nearer pops first.
                match (left_entry, right_entry) {
                    (Some(lt), Some(rt)) => {
                        if lt <= rt {
                            stack.push(node.right);
                            stack.push(node.left);
                        } else {
                            stack.push(node.left);
                            stack.push(node.right);
                        }
                    }
                    (Some(_), None) => stack.push(node.left),
                    (None, Some(_)) => stack.push(node.right),
                    (None, None) => {}
                }
            }
        }

        if best_t.is_finite() {
            Some(RayHit {
                point: ray.point_at(best_t),
                distance: best_t,
                face: FaceId(best_face),
            })
        } else {
            None
        }
    }
}

/// Builds the node for `triangles[start..start + count]`, recursing on
/// a longest-axis median split. Returns the node index.
fn build_range(
    nodes: &mut Vec<BvhNode>,
    triangles: &mut [Triangle],
    start: usize,
    count: usize,
) -> u32 {
    let mut aabb = Aabb::EMPTY;
    let mut centroid_bounds = Aabb::EMPTY;
    for tri in &triangles[start..start + count] {
        aabb.union(&Aabb::of_triangle(tri));
        centroid_bounds.grow(tri.centroid());
    }

    let idx = nodes.len() as u32;
    nodes.push(BvhNode {
        aabb,
        left: 0,
        right: 0,
        start: start as u32,
        count: count as u32,
    });

    // Stop on small ranges or when all centroids coincide.
    let axis = centroid_bounds.longest_axis();
    if count <= LEAF_TRIANGLES || centroid_bounds.extent()[axis] <= 0.0 {
        return idx;
    }

    let mid = count / 2;
    triangles[start..start + count].select_nth_unstable_by(mid, |a, b| {
        a.centroid()[axis]
            .partial_cmp(&b.centroid()[axis])
            .unwrap_or(Ordering::Equal)
    });

    let left = build_range(nodes, triangles, start, mid);
    let right = build_range(nodes, triangles, start + mid, count - mid);

    let node = &mut nodes[idx as usize];
    node.left = left;
    node.right = right;
    node.count = 0;
    idx
}

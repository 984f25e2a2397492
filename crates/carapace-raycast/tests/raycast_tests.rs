//! Integration tests for carapace-raycast.

use carapace_math::Vec3;
use carapace_mesh::generators::{cube, nested_cube, uv_sphere};
use carapace_mesh::PolyMesh;
use carapace_raycast::{ray_triangle, BvhCaster, LinearCaster, MeshBvh, Ray, RayCaster};
use carapace_types::FaceId;

// ─── Triangle Tests ───────────────────────────────────────────

#[test]
fn ray_hits_triangle_center() {
    let ray = Ray::new(Vec3::new(0.3, 0.3, 5.0), -Vec3::Z);
    let t = ray_triangle(
        &ray,
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    );
    assert!(t.is_some());
    assert!((t.unwrap() - 5.0).abs() < 1e-4);
}

#[test]
fn ray_misses_outside_triangle() {
    let ray = Ray::new(Vec3::new(0.9, 0.9, 5.0), -Vec3::Z);
    let t = ray_triangle(
        &ray,
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    );
    assert!(t.is_none());
}

#[test]
fn intersection_is_double_sided() {
    let a = Vec3::ZERO;
    let b = Vec3::new(1.0, 0.0, 0.0);
    let c = Vec3::new(0.0, 1.0, 0.0);
    let from_above = Ray::new(Vec3::new(0.2, 0.2, 1.0), -Vec3::Z);
    let from_below = Ray::new(Vec3::new(0.2, 0.2, -1.0), Vec3::Z);
    assert!(ray_triangle(&from_above, a, b, c).is_some());
    assert!(ray_triangle(&from_below, a, b, c).is_some());
}

#[test]
fn origin_on_surface_does_not_self_hit() {
    // Origin exactly on the triangle, looking away: the minimum-t rule
    // rejects the zero-distance intersection.
    let ray = Ray::new(Vec3::new(0.2, 0.2, 0.0), Vec3::Z);
    let t = ray_triangle(
        &ray,
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    );
    assert!(t.is_none());
}

#[test]
fn parallel_ray_misses() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
    let t = ray_triangle(
        &ray,
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    );
    assert!(t.is_none());
}

// ─── Caster Tests ─────────────────────────────────────────────

#[test]
fn cube_hit_from_outside() {
    let mesh = cube(2.0);
    let caster = BvhCaster::build(&mesh).unwrap();

    let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
    let hit = caster.cast(&ray).expect("ray aimed at the cube must hit");
    // Nearest face is the top at z = 1.
    assert!((hit.distance - 9.0).abs() < 1e-3);
    assert!((hit.point.z - 1.0).abs() < 1e-3);
    assert_eq!(hit.face, FaceId(1)); // generator order: bottom, top, ...
}

#[test]
fn miss_returns_none() {
    let mesh = cube(2.0);
    let caster = BvhCaster::build(&mesh).unwrap();
    let ray = Ray::new(Vec3::new(10.0, 10.0, 10.0), Vec3::Z);
    assert!(caster.cast(&ray).is_none());
}

#[test]
fn nearest_hit_wins() {
    // Nested cube: a ray through both shells reports the outer one.
    let mesh = nested_cube(2.0, 1.0);
    let caster = BvhCaster::build(&mesh).unwrap();
    let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
    let hit = caster.cast(&ray).unwrap();
    assert!((hit.point.z - 1.0).abs() < 1e-3);
    assert!(
        hit.face.index() < 6,
        "hit face {:?} is not on the outer shell",
        hit.face
    );
}

#[test]
fn quad_faces_are_hit_across_the_fan_seam() {
    // Both fan triangles of a quad report the same face.
    let mesh = cube(2.0);
    let caster = LinearCaster::build(&mesh).unwrap();
    for target in [Vec3::new(0.5, -0.5, 1.0), Vec3::new(-0.5, 0.5, 1.0)] {
        let origin = Vec3::new(target.x, target.y, 10.0);
        let hit = caster.cast(&Ray::new(origin, -Vec3::Z)).unwrap();
        assert_eq!(hit.face, FaceId(1), "target {:?}", target);
    }
}

#[test]
fn bvh_matches_linear_baseline() {
    let mesh = uv_sphere(1.0, 12, 24);
    let bvh = BvhCaster::build(&mesh).unwrap();
    let linear = LinearCaster::build(&mesh).unwrap();

    // Deterministic fan of rays from points around the sphere.
    for i in 0..64 {
        let angle = i as f32 * 0.37;
        let origin = Vec3::new(4.0 * angle.cos(), 4.0 * angle.sin(), (i % 7) as f32 - 3.0);
        let target = Vec3::new(
            0.3 * (angle * 1.7).sin(),
            0.3 * (angle * 2.3).cos(),
            0.2 * (angle * 0.9).sin(),
        );
        let ray = Ray::new(origin, target - origin);

        let a = bvh.cast(&ray);
        let b = linear.cast(&ray);
        match (a, b) {
            (Some(ha), Some(hb)) => {
                // Distances must agree; the face may differ only where
                // two triangles tie exactly on a shared edge.
                assert!(
                    (ha.distance - hb.distance).abs() < 1e-4,
                    "ray {} distances diverge: {} vs {}",
                    i,
                    ha.distance,
                    hb.distance
                );
            }
            (None, None) => {}
            other => panic!("ray {} disagreement: {:?}", i, other),
        }
    }
}

#[test]
fn build_on_empty_mesh_is_oracle_unavailable() {
    let mesh = PolyMesh::with_capacity(0, 0, 0);
    assert!(BvhCaster::build(&mesh).is_err());
    assert!(LinearCaster::build(&mesh).is_err());
}

#[test]
fn bvh_indexes_all_triangles() {
    let mesh = uv_sphere(1.0, 8, 16);
    let bvh = MeshBvh::build(&mesh).unwrap();
    assert_eq!(bvh.triangle_count(), mesh.face_count());
    assert!(bvh.node_count() >= 1);
}

#[test]
fn caster_names() {
    let mesh = cube(1.0);
    assert_eq!(BvhCaster::build(&mesh).unwrap().name(), "bvh");
    assert_eq!(LinearCaster::build(&mesh).unwrap().name(), "linear");
}

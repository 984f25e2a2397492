//! Integration tests for carapace-mesh.

use carapace_mesh::generators::{cube, nested_cube, quad_grid, uv_sphere};
use carapace_mesh::normals::{
    check_degenerate, compute_face_data, edge_midpoints, face_centroid, face_normal,
};
use carapace_mesh::{delete_unseen_faces, merge_meshes, weld_vertices, PolyMesh, Topology};
use carapace_math::Vec3;

// ─── PolyMesh Tests ───────────────────────────────────────────

fn make_single_triangle() -> PolyMesh {
    PolyMesh::from_face_lists(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        &[vec![0, 1, 2]],
    )
    .unwrap()
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.face_count(), 1);
}

#[test]
fn position_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.position(1), [1.0, 0.0, 0.0]);
}

#[test]
fn face_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.face(0), &[0, 1, 2]);
}

#[test]
fn face_edges_are_cyclic() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.face_edges(0), vec![[0, 1], [1, 2], [2, 0]]);
}

#[test]
fn validate_ok() {
    let mesh = make_single_triangle();
    assert!(mesh.validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = make_single_triangle();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.face_vertices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_repeated_index() {
    let mesh = PolyMesh::from_face_lists(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        &[vec![0, 0, 1]],
    );
    assert!(mesh.is_err());
}

#[test]
fn validate_catches_tiny_face() {
    let mesh = PolyMesh::from_face_lists(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        &[vec![0, 1]],
    );
    assert!(mesh.is_err());
}

#[test]
fn bounding_radius_of_cube() {
    let mesh = cube(2.0);
    let expected = (3.0f32).sqrt(); // corner at (1,1,1)
    assert!((mesh.bounding_radius() - expected).abs() < 1e-5);
}

#[test]
fn bounding_box_of_cube() {
    let (min, max) = cube(2.0).bounding_box();
    assert!((min - Vec3::splat(-1.0)).length() < 1e-6);
    assert!((max - Vec3::splat(1.0)).length() < 1e-6);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn cube_counts() {
    let mesh = cube(1.0);
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.face_count(), 6);
    assert!(mesh.validate().is_ok());
}

#[test]
fn cube_normals_point_outward() {
    let mesh = cube(2.0);
    for f in 0..mesh.face_count() {
        let n = face_normal(&mesh, f).expect("cube faces are planar");
        let c = face_centroid(&mesh, f);
        // For a centered cube, each face normal aligns with its centroid.
        assert!(n.dot(c.normalize()) > 0.99, "face {} normal {:?} centroid {:?}", f, n, c);
    }
}

#[test]
fn nested_cube_counts() {
    let mesh = nested_cube(2.0, 1.0);
    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.face_count(), 12);
    assert!(mesh.validate().is_ok());
}

#[test]
fn quad_grid_2x2() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.face_count(), 4);
    assert!(mesh.validate().is_ok());
}

#[test]
fn quad_grid_faces_are_quads() {
    let mesh = quad_grid(3, 2, 1.0, 1.0);
    for f in 0..mesh.face_count() {
        assert_eq!(mesh.face(f).len(), 4);
    }
}

#[test]
fn uv_sphere_basic() {
    let mesh = uv_sphere(1.0, 8, 16);
    assert!(mesh.vertex_count() > 0);
    assert!(mesh.face_count() > 0);
    assert!(mesh.validate().is_ok());
}

#[test]
fn uv_sphere_radius() {
    let mesh = uv_sphere(2.5, 8, 16);
    for i in 0..mesh.vertex_count() {
        let dist = mesh.position_vec3(i).length();
        assert!((dist - 2.5).abs() < 1e-4, "Vertex {} at distance {}", i, dist);
    }
}

// ─── Face Data Tests ──────────────────────────────────────────

#[test]
fn triangle_normal_and_centroid() {
    let mesh = make_single_triangle();
    let n = face_normal(&mesh, 0).unwrap();
    assert!((n - Vec3::Z).length() < 1e-6);

    let c = face_centroid(&mesh, 0);
    assert!((c - Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).length() < 1e-6);
}

#[test]
fn edge_midpoints_of_triangle() {
    let mesh = make_single_triangle();
    let mids = edge_midpoints(&mesh, 0);
    assert_eq!(mids.len(), 3);
    assert!((mids[0] - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    assert!((mids[1] - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-6);
    assert!((mids[2] - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-6);
}

#[test]
fn degenerate_face_is_flagged() {
    // Three collinear points: zero-length Newell normal.
    let mesh = PolyMesh::from_face_lists(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
        &[vec![0, 1, 2]],
    )
    .unwrap();
    let data = compute_face_data(&mesh);
    assert!(data.degenerate[0]);
    assert_eq!(data.normals[0], Vec3::ZERO);
}

#[test]
fn check_degenerate_names_the_face() {
    let mesh = cube(1.0);
    assert!(check_degenerate(&mesh).is_ok());

    let mut mesh = cube(1.0);
    let a = mesh.push_vertex(3.0, 0.0, 0.0);
    let b = mesh.push_vertex(4.0, 0.0, 0.0);
    let c = mesh.push_vertex(5.0, 0.0, 0.0);
    mesh.push_face(&[a, b, c]);
    let err = check_degenerate(&mesh).unwrap_err();
    assert!(err.to_string().contains("face 6"), "got: {err}");
}

#[test]
fn face_data_covers_all_faces() {
    let mesh = cube(1.0);
    let data = compute_face_data(&mesh);
    assert_eq!(data.face_count(), 6);
    assert!(data.degenerate.iter().all(|&d| !d));
    for n in &data.normals {
        assert!((n.length() - 1.0).abs() < 1e-5);
    }
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn cube_is_closed() {
    let topo = Topology::build(&cube(1.0));
    assert_eq!(topo.edges.len(), 12);
    assert_eq!(topo.boundary_edge_count(), 0);
    assert!(topo.is_closed());
}

#[test]
fn grid_has_boundary() {
    let topo = Topology::build(&quad_grid(2, 2, 1.0, 1.0));
    assert!(topo.boundary_edge_count() > 0);
    assert!(!topo.is_closed());
}

#[test]
fn cube_face_neighbors() {
    // Each cube face touches the four side faces but not its opposite.
    let topo = Topology::build(&cube(1.0));
    for f in 0..6 {
        assert_eq!(topo.neighbors(f).len(), 4, "face {}", f);
    }
}

#[test]
fn nested_cube_components_are_disjoint() {
    // Inner cube faces never neighbor outer cube faces.
    let topo = Topology::build(&nested_cube(2.0, 1.0));
    for f in 0..6 {
        assert!(topo.neighbors(f).iter().all(|&n| n < 6));
    }
    for f in 6..12 {
        assert!(topo.neighbors(f).iter().all(|&n| n >= 6));
    }
}

#[test]
fn neighbors_are_sorted_and_unique() {
    let topo = Topology::build(&quad_grid(3, 3, 1.0, 1.0));
    for f in 0..9 {
        let n = topo.neighbors(f);
        for w in n.windows(2) {
            assert!(w[0] < w[1]);
        }
    }
}

// ─── Editor Tests ─────────────────────────────────────────────

#[test]
fn delete_keeps_visible_faces() {
    let mesh = cube(1.0);
    let visible = vec![true, true, false, false, true, false];
    let (edited, report) = delete_unseen_faces(&mesh, &visible);

    assert_eq!(report.faces_before, 6);
    assert_eq!(report.faces_after, 3);
    assert_eq!(edited.face_count(), 3);
    assert!(edited.validate().is_ok());
    assert!((report.removal_percent() - 50.0).abs() < 1e-5);
}

#[test]
fn delete_drops_orphan_vertices() {
    let mesh = nested_cube(2.0, 1.0);
    // Keep only the outer shell; all 8 inner vertices must go.
    let visible: Vec<bool> = (0..12).map(|f| f < 6).collect();
    let (edited, report) = delete_unseen_faces(&mesh, &visible);

    assert_eq!(edited.face_count(), 6);
    assert_eq!(edited.vertex_count(), 8);
    assert_eq!(report.vertices_before, 16);
    assert_eq!(report.vertices_after, 8);
    assert!(edited.validate().is_ok());
}

#[test]
fn delete_no_orphans_invariant() {
    let mesh = uv_sphere(1.0, 6, 8);
    let visible: Vec<bool> = (0..mesh.face_count()).map(|f| f % 3 != 0).collect();
    let (edited, _) = delete_unseen_faces(&mesh, &visible);

    // Every vertex in the output is referenced by at least one face.
    let mut referenced = vec![false; edited.vertex_count()];
    for f in 0..edited.face_count() {
        for &v in edited.face(f) {
            referenced[v as usize] = true;
        }
    }
    assert!(referenced.iter().all(|&r| r));
    assert!(edited.validate().is_ok());
}

#[test]
fn delete_everything_yields_empty_mesh() {
    let mesh = cube(1.0);
    let (edited, report) = delete_unseen_faces(&mesh, &[false; 6]);
    assert_eq!(edited.face_count(), 0);
    assert_eq!(edited.vertex_count(), 0);
    assert!((report.removal_percent() - 100.0).abs() < 1e-5);
}

#[test]
fn empty_mesh_removal_percent_is_zero() {
    let report = carapace_mesh::EditReport {
        faces_before: 0,
        faces_after: 0,
        vertices_before: 0,
        vertices_after: 0,
        welded_vertices: 0,
    };
    assert_eq!(report.removal_percent(), 0.0);
}

// ─── Weld Tests ───────────────────────────────────────────────

#[test]
fn weld_merges_coincident_seam() {
    // Two triangles sharing an edge geometrically but not topologically.
    let mesh = PolyMesh::from_face_lists(
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0], // duplicate of 1
            [0.0, 1.0, 0.0], // duplicate of 2
            [1.0, 1.0, 0.0],
        ],
        &[vec![0, 1, 2], vec![3, 5, 4]],
    )
    .unwrap();

    let (welded, merged) = weld_vertices(&mesh, 1e-4);
    assert_eq!(merged, 2);
    assert_eq!(welded.vertex_count(), 4);
    assert_eq!(welded.face_count(), 2);
    assert!(welded.validate().is_ok());
}

#[test]
fn weld_leaves_distinct_vertices_alone() {
    let mesh = cube(1.0);
    let (welded, merged) = weld_vertices(&mesh, 1e-4);
    assert_eq!(merged, 0);
    assert_eq!(welded.vertex_count(), 8);
    assert_eq!(welded.face_count(), 6);
}

#[test]
fn weld_drops_collapsed_faces() {
    // A sliver triangle whose vertices all weld together disappears.
    let mesh = PolyMesh::from_face_lists(
        &[
            [0.0, 0.0, 0.0],
            [1e-6, 0.0, 0.0],
            [0.0, 1e-6, 0.0],
            [5.0, 0.0, 0.0],
            [6.0, 0.0, 0.0],
            [5.0, 1.0, 0.0],
        ],
        &[vec![0, 1, 2], vec![3, 4, 5]],
    )
    .unwrap();

    let (welded, merged) = weld_vertices(&mesh, 1e-4);
    assert_eq!(merged, 2);
    assert_eq!(welded.face_count(), 1);
    assert!(welded.validate().is_ok());
}

// ─── Merge Tests ──────────────────────────────────────────────

#[test]
fn merge_offsets_indices() {
    let merged = merge_meshes(&[cube(1.0), cube(2.0)]).unwrap();
    assert_eq!(merged.vertex_count(), 16);
    assert_eq!(merged.face_count(), 12);
    assert!(merged.validate().is_ok());
    // Second mesh's faces reference the offset vertex block.
    assert!(merged.face(6).iter().all(|&v| v >= 8));
}

#[test]
fn merge_empty_input_is_error() {
    assert!(merge_meshes(&[]).is_err());
}

#[test]
fn merge_single_mesh_roundtrips() {
    let mesh = cube(1.0);
    let merged = merge_meshes(std::slice::from_ref(&mesh)).unwrap();
    assert_eq!(merged.vertex_count(), mesh.vertex_count());
    assert_eq!(merged.face_count(), mesh.face_count());
}

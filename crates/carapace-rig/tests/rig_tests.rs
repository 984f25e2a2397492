//! Integration tests for carapace-rig.

use carapace_rig::{generate, Camera, CameraRig, Projection, RigParams};

fn rig(rows: u32, cameras_per_row: u32, radius: f32) -> CameraRig {
    generate(&RigParams {
        rows,
        cameras_per_row,
        radius,
        projection: Projection::default(),
    })
    .unwrap()
}

// ─── Count & Placement ────────────────────────────────────────

#[test]
fn camera_count_is_rows_times_per_row() {
    for &(rows, per_row) in &[(2u32, 2u32), (4, 4), (3, 6), (8, 10)] {
        let r = rig(rows, per_row, 10.0);
        assert_eq!(r.len(), (rows * per_row) as usize, "{rows}×{per_row}");
    }
}

#[test]
fn cameras_sit_on_the_sphere() {
    let r = rig(4, 4, 10.0);
    for cam in r.iter() {
        assert!((cam.position.length() - 10.0).abs() < 1e-3);
    }
}

#[test]
fn forward_points_at_origin() {
    let r = rig(4, 6, 5.0);
    for cam in r.iter() {
        assert!((cam.forward.length() - 1.0).abs() < 1e-5);
        // Walking the forward direction for one radius lands at the origin.
        let end = cam.position + cam.forward * 5.0;
        assert!(end.length() < 1e-3, "camera at {:?} ends at {:?}", cam.position, end);
    }
}

#[test]
fn no_camera_on_equator_or_pole() {
    let r = rig(4, 4, 10.0);
    for cam in r.iter() {
        let z = cam.position.z.abs();
        assert!(z > 1e-3, "camera on the equator: {:?}", cam.position);
        assert!(z < 10.0 - 1e-3, "camera at a pole: {:?}", cam.position);
    }
}

#[test]
fn elevations_come_in_mirrored_pairs() {
    let r = rig(2, 6, 10.0);
    let cams = r.cameras();
    // Generation order pairs each positive elevation with its mirror.
    for pair in cams.chunks(2) {
        assert!((pair[0].position.z + pair[1].position.z).abs() < 1e-4);
        assert!(pair[0].position.z > 0.0);
    }
}

#[test]
fn determinism_across_calls() {
    let a = rig(6, 8, 12.5);
    let b = rig(6, 8, 12.5);
    assert_eq!(a, b);
}

// ─── Projection ───────────────────────────────────────────────

#[test]
fn wide_projection_has_fixed_half_angle() {
    assert!((Projection::WideFixed.half_fov() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn default_projection_is_perspective() {
    let p = Projection::default();
    match p {
        Projection::Perspective { half_fov } => assert!(half_fov > 0.0 && half_fov < 1.0),
        Projection::WideFixed => panic!("default should be perspective"),
    }
}

#[test]
fn camera_up_is_well_defined_everywhere() {
    let r = rig(4, 4, 10.0);
    for cam in r.iter() {
        let up = cam.up();
        assert!((up.length() - 1.0).abs() < 1e-6);
        // Up is never parallel to the look direction.
        assert!(up.cross(cam.forward).length() > 1e-3);
    }
}

// ─── Validation ───────────────────────────────────────────────

#[test]
fn odd_cameras_per_row_is_rejected() {
    let params = RigParams {
        cameras_per_row: 5,
        ..Default::default()
    };
    assert!(generate(&params).is_err());
}

#[test]
fn too_few_rows_is_rejected() {
    let params = RigParams {
        rows: 1,
        ..Default::default()
    };
    assert!(generate(&params).is_err());
}

#[test]
fn non_positive_radius_is_rejected() {
    for radius in [0.0, -2.0, f32::NAN] {
        let params = RigParams {
            radius,
            ..Default::default()
        };
        assert!(generate(&params).is_err(), "radius {radius} accepted");
    }
}

#[test]
fn clamped_rounds_odd_count_up() {
    let params = RigParams::clamped(1, 5, 10.0);
    assert_eq!(params.rows, 2);
    assert_eq!(params.cameras_per_row, 6);
    assert!(params.validate().is_ok());
}

#[test]
fn clamped_enforces_minimums() {
    let params = RigParams::clamped(0, 0, 10.0);
    assert_eq!(params.rows, 2);
    assert_eq!(params.cameras_per_row, 2);
    assert!(params.validate().is_ok());
}

// ─── Ownership ────────────────────────────────────────────────

#[test]
fn into_cameras_promotes_ownership() {
    let r = rig(2, 2, 10.0);
    let count = r.len();
    let cameras: Vec<Camera> = r.into_cameras();
    assert_eq!(cameras.len(), count);
}

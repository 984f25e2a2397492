//! CLI command implementations.

use std::fs;

use carapace_bench::{BenchRunner, CullMetrics, Scenario, ScenarioKind};
use carapace_io::{load_mesh_json, load_params_toml, save_mesh_json, validate_input, CullInput};
use carapace_mesh::Topology;
use carapace_telemetry::TracingSink;
use carapace_visibility::{CullMode, CullingPipeline, Precision, RunParams, Strategy};

use crate::CullArgs;

/// Run a culling pass over the input meshes.
pub fn cull(args: &CullArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut params: RunParams = match &args.config {
        Some(path) => load_params_toml(path)?,
        None => RunParams::default(),
    };

    // Explicit flags win over the config file.
    if let Some(rows) = args.rows {
        params.rig.rows = rows;
    }
    if let Some(per_row) = args.cameras_per_row {
        params.rig.cameras_per_row = per_row;
    }
    if let Some(radius) = args.radius {
        params.rig.radius = radius;
    }
    if let Some(precision) = &args.precision {
        params.visibility.precision = match precision.as_str() {
            "center" => Precision::FaceCenterOnly,
            "center-verts-edges" => Precision::FaceCenterVertsEdges,
            other => {
                eprintln!("Unknown precision: {other}");
                eprintln!("Available: center, center-verts-edges");
                return Err("Unknown precision".into());
            }
        };
    }
    if let Some(mode) = &args.mode {
        params.mode = match mode.as_str() {
            "delete" => CullMode::Delete,
            "select-outer" => CullMode::SelectOuter,
            other => {
                eprintln!("Unknown mode: {other}");
                eprintln!("Available: delete, select-outer");
                return Err("Unknown mode".into());
            }
        };
    }
    if args.experimental {
        params.visibility.strategy = Strategy::RandomizedExpansion;
    }
    if let Some(ratio) = args.sampling_ratio {
        params.visibility.sampling_ratio = ratio;
    }
    if let Some(angle) = args.flatness_angle {
        params.visibility.flatness_angle_deg = angle;
    }
    if let Some(seed) = args.seed {
        params.visibility.seed = Some(seed);
    }
    if let Some(epsilon) = args.weld_epsilon {
        params.weld_epsilon = epsilon;
    }
    if args.merge {
        params.merge_meshes_first = true;
    }
    if args.weld {
        params.weld_after = true;
    }
    if args.parallel {
        params.visibility.parallel = true;
    }
    if args.keep_cameras.is_some() {
        params.keep_cameras = true;
    }

    let mut meshes = Vec::new();
    for path in &args.input {
        meshes.push(load_mesh_json(path)?);
    }

    let input = CullInput { meshes, params };
    validate_input(&input)?;

    println!("Carapace Cull");
    println!("─────────────");
    println!("Meshes:    {}", input.meshes.len());
    println!("Strategy:  {:?}", input.params.visibility.strategy);
    println!("Mode:      {:?}", input.params.mode);
    println!();

    let mut pipeline = CullingPipeline::new(input.params)
        .with_sink(Box::new(TracingSink::new(tracing::Level::INFO)));
    let output = pipeline.run(input.meshes)?;

    let summary = output.summary;
    println!("Cameras:        {}", summary.camera_count);
    println!("Total faces:    {}", summary.total_faces);
    println!("Visible faces:  {}", summary.visible_faces);
    println!("Removed:        {:.1}%", summary.removal_percent);
    if let Some(edit) = &output.edit {
        println!("Vertices:       {} → {}", edit.vertices_before, edit.vertices_after);
        if edit.welded_vertices > 0 {
            println!("Welded verts:   {}", edit.welded_vertices);
        }
    }

    if let Some(path) = &args.output {
        save_mesh_json(path, &output.mesh)?;
        println!("Mesh written to: {path}");
    }
    if let Some(path) = &args.keep_cameras {
        if let Some(cameras) = &output.cameras {
            fs::write(path, serde_json::to_string(cameras)?)?;
            println!("Cameras written to: {path}");
        }
    }
    if let Some(path) = &args.summary {
        fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        println!("Summary written to: {path}");
    }

    Ok(())
}

/// Run benchmark suite.
pub fn bench(
    scenario_name: &str,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Carapace Benchmark Suite");
    println!("════════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        let kind = match scenario_name {
            "convex_cube" => ScenarioKind::ConvexCube,
            "nested_cube" => ScenarioKind::NestedCube,
            "sphere_shell" => ScenarioKind::SphereShell,
            other => {
                eprintln!("Unknown scenario: {other}");
                eprintln!("Available: convex_cube, nested_cube, sphere_shell, all");
                return Err("Unknown scenario".into());
            }
        };
        vec![kind]
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);
        println!(
            "Running: {} ({} faces, {} cameras)",
            kind.name(),
            scenario.mesh.face_count(),
            scenario.params.rig.rows * scenario.params.rig.cameras_per_row,
        );

        let metrics = BenchRunner::run(&scenario)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:    {:.3}s", metrics.total_wall_time);
        println!("  Oracle build: {:.3}ms", metrics.oracle_build_time * 1000.0);
        println!("  Avg pass:     {:.3}ms", metrics.avg_pass_time * 1000.0);
        println!("  Rays cast:    {}", metrics.rays_cast);
        println!("  Removed:      {:.1}%", metrics.removal_percent);
        if let Some(expected) = scenario.expected_removal {
            let ok = (metrics.removal_percent - expected).abs() < 1e-3;
            println!("  Expected:     {:.1}% {}", expected, if ok { "✅" } else { "❌" });
        }
        println!();

        all_metrics.push(metrics);
    }

    if let Some(path) = output_path {
        let csv = CullMetrics::to_csv(&all_metrics);
        fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", CullMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// Validate a mesh or run-parameter file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Carapace Validator");
    println!("──────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating run parameters: {path}");
        let params = load_params_toml(path)?;
        match params.validate() {
            Ok(()) => println!("✅ Parameters are valid."),
            Err(e) => println!("❌ Parameter validation failed: {e}"),
        }
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let mesh = load_mesh_json(path)?;
        match mesh.validate() {
            Ok(()) => {
                println!(
                    "✅ Mesh is valid ({} verts, {} faces).",
                    mesh.vertex_count(),
                    mesh.face_count()
                );
                if let Err(e) = carapace_mesh::check_degenerate(&mesh) {
                    println!("⚠️  {e} — such faces are treated as never visible.");
                }
            }
            Err(e) => println!("❌ Mesh validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (parameters) or .json (mesh).");
    }

    Ok(())
}

/// Print statistics for a mesh file.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Carapace Mesh Inspector");
    println!("───────────────────────");
    println!();

    let mesh = load_mesh_json(path)?;
    mesh.validate()?;

    let (min, max) = mesh.bounding_box();
    let topology = Topology::build(&mesh);

    println!("Vertices:        {}", mesh.vertex_count());
    println!("Faces:           {}", mesh.face_count());
    println!("Edges:           {}", topology.edges.len());
    println!("Boundary edges:  {}", topology.boundary_edge_count());
    println!("Closed:          {}", topology.is_closed());
    println!("Bounds min:      [{:.4}, {:.4}, {:.4}]", min.x, min.y, min.z);
    println!("Bounds max:      [{:.4}, {:.4}, {:.4}]", max.x, max.y, max.z);
    println!("Bounding radius: {:.4}", mesh.bounding_radius());

    Ok(())
}

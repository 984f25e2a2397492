//! Carapace CLI — outer-shell extraction, benchmarking, validation.

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "carapace")]
#[command(version, about = "Carapace — camera-based hidden geometry removal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove (or select) the faces no rig camera can see.
    Cull(CullArgs),

    /// Run benchmark scenarios.
    Bench {
        /// Which scenario to run (convex_cube, nested_cube, sphere_shell, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a mesh (.json) or run-parameter (.toml) file.
    Validate {
        /// Path to mesh or parameter file.
        path: String,
    },

    /// Print statistics for a mesh file.
    Inspect {
        /// Path to mesh file.
        path: String,
    },
}

/// Arguments of the `cull` subcommand.
#[derive(Args)]
struct CullArgs {
    /// Input mesh file (JSON). Repeat for multiple meshes.
    #[arg(short, long, required = true)]
    input: Vec<String>,

    /// Output mesh file (JSON).
    #[arg(short, long)]
    output: Option<String>,

    /// Run parameter file (TOML); explicit flags override it.
    #[arg(short, long)]
    config: Option<String>,

    /// Camera rows around the mesh (≥ 2).
    #[arg(long)]
    rows: Option<u32>,

    /// Cameras per row (even, ≥ 2).
    #[arg(long)]
    cameras_per_row: Option<u32>,

    /// Rig sphere radius; should exceed the mesh bounds.
    #[arg(long)]
    radius: Option<f32>,

    /// Sampling density: center | center-verts-edges.
    #[arg(long)]
    precision: Option<String>,

    /// Edit mode: delete | select-outer.
    #[arg(long)]
    mode: Option<String>,

    /// Use the randomized expansion strategy.
    #[arg(long)]
    experimental: bool,

    /// Seed-face percentage for expansion (1-100).
    #[arg(long)]
    sampling_ratio: Option<u32>,

    /// Flatness angle in degrees for expansion (10-90).
    #[arg(long)]
    flatness_angle: Option<f32>,

    /// RNG seed for reproducible expansion runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the rig's cameras to this JSON file after the run.
    #[arg(long)]
    keep_cameras: Option<String>,

    /// Merge multiple input meshes before the run.
    #[arg(long)]
    merge: bool,

    /// Weld near-duplicate vertices after deletion.
    #[arg(long)]
    weld: bool,

    /// Weld distance threshold.
    #[arg(long)]
    weld_epsilon: Option<f32>,

    /// Write the run summary to this JSON file.
    #[arg(long)]
    summary: Option<String>,

    /// Fan the exhaustive sweep out over a worker pool.
    #[arg(long)]
    parallel: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Cull(args) => commands::cull(&args),
        Commands::Bench { scenario, output } => commands::bench(&scenario, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Inspect { path } => commands::inspect(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

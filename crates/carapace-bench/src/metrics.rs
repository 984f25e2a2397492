//! Benchmark metrics — data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CullMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Face count of the input mesh.
    pub total_faces: usize,
    /// Faces at least one camera saw.
    pub visible_faces: usize,
    /// Percentage of faces removed.
    pub removal_percent: f32,
    /// Cameras in the rig.
    pub camera_count: usize,
    /// Total wall-clock time for the run (seconds).
    pub total_wall_time: f64,
    /// Time spent building the intersection oracle (seconds).
    pub oracle_build_time: f64,
    /// Time spent in visibility passes (seconds).
    pub visibility_time: f64,
    /// Average wall-clock time per camera pass (seconds).
    pub avg_pass_time: f64,
    /// Total rays dispatched to the oracle.
    pub rays_cast: u64,
}

impl CullMetrics {
    /// Format as a CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,total_faces,visible_faces,removal_percent,camera_count,total_wall_time_s,oracle_build_ms,visibility_s,avg_pass_ms,rays_cast".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{:.2},{},{:.6},{:.4},{:.6},{:.4},{}",
            self.scenario,
            self.total_faces,
            self.visible_faces,
            self.removal_percent,
            self.camera_count,
            self.total_wall_time,
            self.oracle_build_time * 1000.0,
            self.visibility_time,
            self.avg_pass_time * 1000.0,
            self.rays_cast,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[CullMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}

//! # carapace-bench
//!
//! Canonical culling scenarios, a timing runner, and CSV metrics for
//! regression and throughput measurement.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::CullMetrics;
pub use runner::BenchRunner;
pub use scenarios::{Scenario, ScenarioKind};

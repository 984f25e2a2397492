//! # carapace-telemetry
//!
//! Event bus for culling-run telemetry. Emits structured events
//! (rig generation, oracle build, camera passes, edits) that can be
//! consumed by pluggable sinks (test buffers, `tracing` output, etc.).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, RunEvent};
pub use sinks::{EventSink, TracingSink, VecSink};

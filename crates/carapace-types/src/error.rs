//! Error types for the Carapace pipeline.
//!
//! All crates return `CarapaceResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Carapace pipeline.
#[derive(Debug, Error)]
pub enum CarapaceError {
    /// Rig or engine parameter is malformed (odd camera count,
    /// non-positive radius, out-of-range ratio). Raised before any
    /// mesh mutation; the caller can re-supply valid input.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invocation without usable geometry (no mesh, zero faces).
    /// Non-fatal; nothing has been mutated.
    #[error("No target geometry: {0}")]
    NoTargetGeometry(String),

    /// A face with a zero-length normal or coincident vertices.
    ///
    /// The visibility engine skips such faces (treated never-visible)
    /// instead of aborting; this variant is for validators and
    /// diagnostics that want to report them.
    #[error("Degenerate face {face}: {reason}")]
    DegenerateFace {
        face: u32,
        reason: String,
    },

    /// The ray-cast backing service could not be built or queried.
    /// Fatal for the current run; the source mesh is left unchanged.
    #[error("Intersection oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, CarapaceError>`.
pub type CarapaceResult<T> = Result<T, CarapaceError>;

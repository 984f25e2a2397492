//! # carapace-types
//!
//! Shared types, identifiers, error types, and numeric constants
//! for the Carapace outer-shell extraction pipeline.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Carapace crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{CarapaceError, CarapaceResult};
pub use ids::{CameraId, EdgeId, FaceId, VertexId};
pub use scalar::Scalar;

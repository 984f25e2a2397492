//! Scalar type alias for the pipeline.
//!
//! All geometry runs on `f32`; the visibility test only needs epsilon
//! resolution far above single-precision noise. This alias makes it
//! easy to experiment with `f64` precision if needed.

/// The floating-point type used throughout the pipeline.
pub type Scalar = f32;

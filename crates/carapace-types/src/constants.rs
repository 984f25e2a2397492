//! Numeric constants and pipeline defaults.

/// Max distance between a ray's nearest hit and the sample point for
/// the sample to count as seen (world units).
pub const VISIBILITY_EPSILON: f32 = 1.0e-3;

/// Default merge-by-distance threshold for post-delete welding (world units).
pub const WELD_EPSILON: f32 = 1.0e-4;

/// Minimum ray parameter. Rejects hits at distance ≈ 0 so a ray never
/// reports an intersection with geometry at its own origin.
pub const RAY_OFFSET_EPSILON: f32 = 1.0e-6;

/// Default perspective half field-of-view (radians). Half of the 39.6°
/// full angle of a stock 50 mm lens.
pub const DEFAULT_HALF_FOV: f32 = 0.345_575;

/// Fixed half field-of-view of the wide (orthographic-like) projection.
pub const WIDE_HALF_FOV: f32 = std::f32::consts::FRAC_PI_2;

/// Epsilon for degenerate face detection (squared normal length threshold).
pub const DEGENERATE_AREA_THRESHOLD: f32 = 1.0e-10;

/// Seed used by the expansion strategy when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0x5EED_CA7A;

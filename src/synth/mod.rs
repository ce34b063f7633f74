//! Pure gradient math shared by the preview and raster paths.

/// Per-pixel color sampling.
pub mod field;
/// Pattern-to-layer lowering.
pub mod layer;
/// Grain: per-pixel offsets and the preview tile.
pub mod noise;
/// Color ramp interpolation.
pub mod ramp;

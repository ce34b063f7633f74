//! Parameter values supplied by the host: gradient, grain, raster target.

/// Parameter types and their validation.
pub mod model;
/// Named color pairs, export resolutions and color randomization.
pub mod presets;

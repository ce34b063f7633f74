//! Preview descriptors and CPU rasterization.

/// RGBA8 pixel buffer.
pub mod buffer;
/// Straight-alpha compositing helpers.
pub mod composite;
/// Declarative CSS preview.
pub mod preview;
/// Row-parallel rasterizer.
pub mod raster;

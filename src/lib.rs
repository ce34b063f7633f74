//! Procedural gradient synthesis.
//!
//! A gradient is a small set of parameter values: 2 to 5 colors, an angle and a pattern
//! (linear, radial, conic or wave), plus optional grain. From those values the crate produces
//!
//! - a layered CSS preview ([`StyleDescriptor`])
//! - an opaque RGBA8 raster at any resolution ([`PixelBuffer`])
//! - PNG/JPEG bytes handed to an [`ExportSurface`]
//!
//! Every call is pure: the same inputs (including the grain seed) produce the same bytes,
//! whether rows are rendered serially or in parallel.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Image encoding and export surfaces.
pub mod encode;
/// Primitives and errors.
pub mod foundation;
/// Preview and raster rendering.
pub mod render;
/// Gradient, grain and target parameters.
pub mod spec;
/// Gradient field math.
pub mod synth;
/// Rendering facade.
pub mod synthesizer;

pub use crate::encode::surface::{CapturedExport, DirectorySurface, ExportSurface, InMemorySurface};
pub use crate::foundation::core::Rgb8;
pub use crate::foundation::error::{GradientError, GradientResult};
pub use crate::render::buffer::PixelBuffer;
pub use crate::render::preview::StyleDescriptor;
pub use crate::render::raster::RasterOpts;
pub use crate::spec::model::{
    ColorStop, GradientDocument, GradientSpec, ImageFormat, NoiseKind, NoiseRange, NoiseSpec,
    Pattern, RasterTarget,
};
pub use crate::spec::presets::{GRADIENT_PRESETS, GradientPreset, Resolution, TEXTURE_SIZE};
pub use crate::synthesizer::GradientSynthesizer;

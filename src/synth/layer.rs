use serde::Serialize;

use crate::{
    foundation::{core::Rgb8, error::GradientResult, math::wrap_degrees},
    spec::model::{ColorStop, GradientSpec, Pattern},
};

/// Width of one hatching band in pixels. A full stripe period is two bands.
pub const STRIPE_BAND_PX: f64 = 10.0;
/// Opacity of the white hatching band.
pub const STRIPE_ALPHA: f64 = 0.1;
/// Offset of the hatching axis from the base gradient angle.
pub const STRIPE_ANGLE_OFFSET_DEG: f64 = 45.0;

/// How the gradient parameter is laid out over the surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Geometry {
    /// Parameter runs along a line at `angle_degrees`, clockwise from left-to-right.
    Linear {
        /// Normalized direction in `[0, 360)`.
        angle_degrees: f64,
    },
    /// Parameter grows from the center to the farthest corner.
    Radial,
    /// Parameter sweeps clockwise around the center, starting at `from_degrees`.
    Conic {
        /// Normalized start angle in `[0, 360)`.
        from_degrees: f64,
    },
}

/// Base gradient layer: geometry plus evenly spaced stops.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BaseLayer {
    /// Parameter layout.
    pub geometry: Geometry,
    /// Stops in ascending position.
    pub stops: Vec<ColorStop>,
}

/// Repeating hatching drawn on top of a Wave gradient.
///
/// Along its axis the layer is transparent for one band, then `color` at `alpha` for the next.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StripeLayer {
    /// Axis direction, normalized to `[0, 360)`.
    pub angle_degrees: f64,
    /// Band width in pixels.
    pub band_px: f64,
    /// Overlay color.
    pub color: Rgb8,
    /// Overlay opacity.
    pub alpha: f64,
}

impl StripeLayer {
    /// Hatching for a Wave gradient at `base_angle`.
    pub fn for_wave(base_angle: f64) -> Self {
        Self {
            angle_degrees: wrap_degrees(base_angle + STRIPE_ANGLE_OFFSET_DEG),
            band_px: STRIPE_BAND_PX,
            color: Rgb8::WHITE,
            alpha: STRIPE_ALPHA,
        }
    }
}

/// Layers shared by the preview and raster paths, derived from a validated spec.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GradientLayers {
    /// Base gradient.
    pub base: BaseLayer,
    /// Hatching, present only for [`Pattern::Wave`].
    pub stripes: Option<StripeLayer>,
}

impl GradientLayers {
    /// Validate `spec` and lay out its layers.
    pub fn from_spec(spec: &GradientSpec) -> GradientResult<Self> {
        spec.validate()?;
        let angle = spec.normalized_angle();
        let geometry = match spec.pattern {
            Pattern::Linear | Pattern::Wave => Geometry::Linear {
                angle_degrees: angle,
            },
            Pattern::Radial => Geometry::Radial,
            Pattern::Conic => Geometry::Conic {
                from_degrees: angle,
            },
        };
        let stripes = match spec.pattern {
            Pattern::Wave => Some(StripeLayer::for_wave(angle)),
            _ => None,
        };
        Ok(Self {
            base: BaseLayer {
                geometry,
                stops: spec.stops(),
            },
            stripes,
        })
    }
}

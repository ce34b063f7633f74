use serde::Serialize;

use crate::{
    foundation::{
        error::GradientResult,
        math::{fmt_trimmed, wrap_degrees},
    },
    spec::model::{ColorStop, GradientSpec, NoiseSpec, Pattern},
    synth::{
        layer::{BaseLayer, Geometry, GradientLayers, StripeLayer},
        noise::NoiseTile,
    },
};

/// Layered description of a gradient for on-screen compositing.
///
/// Built from the same [`GradientLayers`] the raster renderer samples, so both paths agree on
/// stop placement and geometry. No pixels are materialized.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyleDescriptor {
    /// Pattern the layers were derived from.
    pub pattern: Pattern,
    /// Base gradient.
    pub base: BaseLayer,
    /// Wave hatching, drawn over the base.
    pub stripes: Option<StripeLayer>,
    /// Tiled grain texture, drawn on top of everything.
    pub overlay: Option<NoiseTile>,
}

impl StyleDescriptor {
    /// Describe `spec` with optional grain overlay.
    pub fn new(spec: &GradientSpec, noise: &NoiseSpec) -> GradientResult<Self> {
        noise.validate()?;
        let layers = GradientLayers::from_spec(spec)?;
        Ok(Self {
            pattern: spec.pattern,
            base: layers.base,
            stripes: layers.stripes,
            overlay: NoiseTile::from_spec(noise),
        })
    }

    /// Layers shared with the raster path.
    pub fn layers(&self) -> GradientLayers {
        GradientLayers {
            base: self.base.clone(),
            stripes: self.stripes,
        }
    }

    /// CSS `background` value: layers top-first, comma-separated.
    pub fn to_css(&self) -> String {
        let mut layers = Vec::with_capacity(3);
        if let Some(tile) = &self.overlay {
            layers.push(format!("url(\"{}\")", tile.data_uri()));
        }
        if let Some(stripes) = &self.stripes {
            layers.push(stripes_css(stripes));
        }
        layers.push(base_css(&self.base));
        layers.join(", ")
    }

    /// Text copied to the clipboard: `background: <css>;`.
    pub fn to_css_declaration(&self) -> String {
        format!("background: {};", self.to_css())
    }
}

/// Convert a clockwise-from-left-to-right angle into CSS's clockwise-from-up convention.
pub fn css_angle(angle_degrees: f64) -> f64 {
    wrap_degrees(angle_degrees + 90.0)
}

fn base_css(base: &BaseLayer) -> String {
    let stops = stops_css(&base.stops);
    match base.geometry {
        Geometry::Linear { angle_degrees } => format!(
            "linear-gradient({}deg, {stops})",
            fmt_trimmed(css_angle(angle_degrees), 2)
        ),
        Geometry::Radial => format!("radial-gradient(circle at center, {stops})"),
        Geometry::Conic { from_degrees } => format!(
            "conic-gradient(from {}deg at center, {stops})",
            fmt_trimmed(css_angle(from_degrees), 2)
        ),
    }
}

fn stops_css(stops: &[ColorStop]) -> String {
    stops
        .iter()
        .map(|s| format!("{} {}%", s.color, fmt_trimmed(s.position * 100.0, 2)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn stripes_css(stripes: &StripeLayer) -> String {
    let band = fmt_trimmed(stripes.band_px, 2);
    let period = fmt_trimmed(stripes.band_px * 2.0, 2);
    let c = stripes.color;
    let paint = format!(
        "rgba({},{},{},{})",
        c.r,
        c.g,
        c.b,
        fmt_trimmed(stripes.alpha, 3)
    );
    format!(
        "repeating-linear-gradient({}deg, transparent 0px, transparent {band}px, {paint} {band}px, {paint} {period}px)",
        fmt_trimmed(css_angle(stripes.angle_degrees), 2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Rgb8;

    fn midnight(pattern: Pattern, angle: f64) -> GradientSpec {
        GradientSpec::new(
            vec![Rgb8::from_u24(0x1F2937), Rgb8::from_u24(0x9CA3AF)],
            angle,
            pattern,
        )
    }

    #[test]
    fn linear_css_uses_css_angle_convention() {
        let d = StyleDescriptor::new(&midnight(Pattern::Linear, 0.0), &NoiseSpec::disabled())
            .unwrap();
        assert_eq!(
            d.to_css(),
            "linear-gradient(90deg, #1f2937 0%, #9ca3af 100%)"
        );
    }

    #[test]
    fn radial_css_ignores_angle() {
        let d = StyleDescriptor::new(&midnight(Pattern::Radial, 200.0), &NoiseSpec::disabled())
            .unwrap();
        assert_eq!(
            d.to_css(),
            "radial-gradient(circle at center, #1f2937 0%, #9ca3af 100%)"
        );
    }

    #[test]
    fn conic_css_starts_from_angle() {
        let d = StyleDescriptor::new(&midnight(Pattern::Conic, 300.0), &NoiseSpec::disabled())
            .unwrap();
        assert_eq!(
            d.to_css(),
            "conic-gradient(from 30deg at center, #1f2937 0%, #9ca3af 100%)"
        );
    }

    #[test]
    fn wave_css_stacks_stripes_over_linear() {
        let d = StyleDescriptor::new(&midnight(Pattern::Wave, 45.0), &NoiseSpec::disabled())
            .unwrap();
        assert_eq!(
            d.to_css(),
            concat!(
                "repeating-linear-gradient(180deg, transparent 0px, transparent 10px, ",
                "rgba(255,255,255,0.1) 10px, rgba(255,255,255,0.1) 20px), ",
                "linear-gradient(135deg, #1f2937 0%, #9ca3af 100%)"
            )
        );
    }

    #[test]
    fn stops_are_spread_evenly_in_css() {
        let spec = GradientSpec::new(vec![Rgb8::BLACK; 4], 0.0, Pattern::Linear);
        let d = StyleDescriptor::new(&spec, &NoiseSpec::disabled()).unwrap();
        assert!(d.to_css().contains("#000000 33.33%, #000000 66.67%, #000000 100%"));
    }

    #[test]
    fn noise_overlay_is_the_top_layer() {
        let d = StyleDescriptor::new(&midnight(Pattern::Linear, 0.0), &NoiseSpec::enabled(0.3))
            .unwrap();
        let css = d.to_css();
        assert!(css.starts_with("url(\"data:image/svg+xml,"));
        assert!(css.ends_with("linear-gradient(90deg, #1f2937 0%, #9ca3af 100%)"));
        assert_eq!(d.overlay.unwrap().size, 50);
    }

    #[test]
    fn declaration_wraps_value() {
        let d = StyleDescriptor::new(&midnight(Pattern::Radial, 0.0), &NoiseSpec::disabled())
            .unwrap();
        let text = d.to_css_declaration();
        assert!(text.starts_with("background: radial-gradient("));
        assert!(text.ends_with(");"));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let spec = GradientSpec::new(vec![Rgb8::BLACK; 6], 0.0, Pattern::Linear);
        assert!(StyleDescriptor::new(&spec, &NoiseSpec::disabled()).is_err());
        let mut noise = NoiseSpec::enabled(0.5);
        noise.scale = 5;
        assert!(StyleDescriptor::new(&midnight(Pattern::Linear, 0.0), &noise).is_err());
    }
}

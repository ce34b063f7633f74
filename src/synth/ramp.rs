use crate::{
    foundation::{
        core::Rgb8,
        error::{GradientError, GradientResult},
        math::lerp_u8,
    },
    spec::model::{GradientSpec, MAX_STOPS, MIN_STOPS},
};

/// Evenly spaced color stops, resolved by linear interpolation in sRGB.
///
/// Stop `i` of `N` sits at `i / (N - 1)`, so lookups index directly instead of searching.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    colors: Vec<Rgb8>,
}

impl ColorRamp {
    /// Build a ramp from a validated stop count.
    pub fn new(colors: &[Rgb8]) -> GradientResult<Self> {
        if !(MIN_STOPS..=MAX_STOPS).contains(&colors.len()) {
            return Err(GradientError::invalid_spec(format!(
                "color ramp needs {MIN_STOPS}..={MAX_STOPS} colors, got {}",
                colors.len()
            )));
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Ramp for a gradient spec.
    pub fn from_spec(spec: &GradientSpec) -> GradientResult<Self> {
        Self::new(&spec.colors)
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; a ramp holds at least two stops.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `t`, clamped into `[0, 1]`.
    pub fn sample(&self, t: f64) -> Rgb8 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let segments = self.colors.len() - 1;
        let scaled = t * segments as f64;
        // t == 1.0 lands on the last segment with weight 1.
        let k = (scaled.floor() as usize).min(segments - 1);
        let w = scaled - k as f64;

        let a = self.colors[k];
        let b = self.colors[k + 1];
        Rgb8::new(lerp_u8(a.r, b.r, w), lerp_u8(a.g, b.g, w), lerp_u8(a.b, b.b, w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(hex: &[&str]) -> ColorRamp {
        let colors: Vec<Rgb8> = hex.iter().map(|h| h.parse().unwrap()).collect();
        ColorRamp::new(&colors).unwrap()
    }

    #[test]
    fn endpoints_are_exact() {
        let r = ramp(&["#1F2937", "#F43F5E", "#9CA3AF"]);
        assert_eq!(r.sample(0.0), Rgb8::new(31, 41, 55));
        assert_eq!(r.sample(1.0), Rgb8::new(156, 163, 175));
    }

    #[test]
    fn interior_stops_are_hit_exactly() {
        let r = ramp(&["#000000", "#ff0000", "#00ff00", "#0000ff", "#ffffff"]);
        assert_eq!(r.sample(0.25), Rgb8::new(255, 0, 0));
        assert_eq!(r.sample(0.5), Rgb8::new(0, 255, 0));
        assert_eq!(r.sample(0.75), Rgb8::new(0, 0, 255));
    }

    #[test]
    fn midpoint_interpolates_per_channel() {
        let r = ramp(&["#000000", "#ff6400"]);
        assert_eq!(r.sample(0.5), Rgb8::new(128, 50, 0));
    }

    #[test]
    fn out_of_range_t_clamps() {
        let r = ramp(&["#102030", "#405060"]);
        assert_eq!(r.sample(-3.0), r.sample(0.0));
        assert_eq!(r.sample(7.0), r.sample(1.0));
        assert_eq!(r.sample(f64::NAN), r.sample(0.0));
    }

    #[test]
    fn rejects_bad_stop_counts() {
        assert!(ColorRamp::new(&[Rgb8::BLACK]).is_err());
        assert!(ColorRamp::new(&[Rgb8::BLACK; 6]).is_err());
        assert_eq!(ColorRamp::new(&[Rgb8::BLACK; 5]).unwrap().len(), 5);
    }
}

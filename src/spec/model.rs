use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Rgb8,
    error::{GradientError, GradientResult},
    math::wrap_degrees,
};

/// Minimum number of colors in a gradient.
pub const MIN_STOPS: usize = 2;
/// Maximum number of colors in a gradient.
pub const MAX_STOPS: usize = 5;

/// Allowed noise intensity range.
pub const NOISE_INTENSITY_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1.0;
/// Allowed noise tile size range, in pixels.
pub const NOISE_SCALE_RANGE: std::ops::RangeInclusive<u32> = 10..=100;

/// A color pinned to a position along the gradient's parameter axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position in `[0, 1]`.
    pub position: f64,
    /// Stop color.
    pub color: Rgb8,
}

/// Geometric pattern mapping pixel coordinates onto the gradient axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// Straight line rotated by the angle; 0° runs left to right.
    #[default]
    Linear,
    /// Center outward to the corners; ignores the angle.
    Radial,
    /// Clockwise sweep starting at the angle.
    Conic,
    /// Linear with a diagonal hatching overlay at `angle + 45°`.
    Wave,
}

impl Pattern {
    /// All patterns in editor order.
    pub const ALL: [Pattern; 4] = [
        Pattern::Linear,
        Pattern::Radial,
        Pattern::Conic,
        Pattern::Wave,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Pattern::Linear => "Linear",
            Pattern::Radial => "Radial",
            Pattern::Conic => "Conic",
            Pattern::Wave => "Wave",
        }
    }

    /// Whether `angle_degrees` affects this pattern.
    pub fn uses_angle(self) -> bool {
        !matches!(self, Pattern::Radial)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GradientError::invalid_spec(format!("unknown pattern \"{s}\"")))
    }
}

/// Gradient colors and geometry.
///
/// Colors are evenly spaced: color `i` of `N` sits at `i / (N - 1)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientSpec {
    /// Ordered colors, 2 to 5 entries.
    pub colors: Vec<Rgb8>,
    /// Rotation in degrees, clockwise from left-to-right.
    #[serde(default)]
    pub angle_degrees: f64,
    /// Pattern kind.
    #[serde(default)]
    pub pattern: Pattern,
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self {
            colors: vec![Rgb8::from_u24(0x1F2937), Rgb8::from_u24(0x9CA3AF)],
            angle_degrees: 45.0,
            pattern: Pattern::Linear,
        }
    }
}

impl GradientSpec {
    /// Build a spec from colors, angle and pattern.
    pub fn new(colors: Vec<Rgb8>, angle_degrees: f64, pattern: Pattern) -> Self {
        Self {
            colors,
            angle_degrees,
            pattern,
        }
    }

    /// Check stop count and angle.
    pub fn validate(&self) -> GradientResult<()> {
        let n = self.colors.len();
        if !(MIN_STOPS..=MAX_STOPS).contains(&n) {
            return Err(GradientError::invalid_spec(format!(
                "gradient needs {MIN_STOPS}..={MAX_STOPS} colors, got {n}"
            )));
        }
        if !self.angle_degrees.is_finite() {
            return Err(GradientError::invalid_spec("angle must be finite"));
        }
        Ok(())
    }

    /// Angle normalized into `[0, 360)`.
    pub fn normalized_angle(&self) -> f64 {
        wrap_degrees(self.angle_degrees)
    }

    /// Evenly spaced stops derived from `colors`.
    pub fn stops(&self) -> Vec<ColorStop> {
        let last = self.colors.len().saturating_sub(1).max(1) as f64;
        self.colors
            .iter()
            .enumerate()
            .map(|(i, &color)| ColorStop {
                position: i as f64 / last,
                color,
            })
            .collect()
    }

    /// Append a black stop. Fails once the gradient already has the maximum number of colors.
    pub fn add_color(&mut self) -> GradientResult<()> {
        if self.colors.len() >= MAX_STOPS {
            return Err(GradientError::invalid_spec(format!(
                "gradient already has {MAX_STOPS} colors"
            )));
        }
        self.colors.push(Rgb8::BLACK);
        Ok(())
    }

    /// Remove the color at `index`. Fails if that would leave fewer than two colors.
    pub fn remove_color(&mut self, index: usize) -> GradientResult<()> {
        if self.colors.len() <= MIN_STOPS {
            return Err(GradientError::invalid_spec(format!(
                "gradient needs at least {MIN_STOPS} colors"
            )));
        }
        if index >= self.colors.len() {
            return Err(GradientError::invalid_spec(format!(
                "color index {index} out of range"
            )));
        }
        self.colors.remove(index);
        Ok(())
    }

    /// Replace the color at `index`.
    pub fn set_color(&mut self, index: usize, color: Rgb8) -> GradientResult<()> {
        let slot = self.colors.get_mut(index).ok_or_else(|| {
            GradientError::invalid_spec(format!("color index {index} out of range"))
        })?;
        *slot = color;
        Ok(())
    }
}

/// Noise flavour shown to the user.
///
/// Only a label: every kind drives the same uniform per-pixel perturbation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    /// Perlin label.
    #[default]
    Perlin,
    /// Simplex label.
    Simplex,
    /// Worley label.
    Worley,
}

impl NoiseKind {
    /// All kinds in editor order.
    pub const ALL: [NoiseKind; 3] = [NoiseKind::Perlin, NoiseKind::Simplex, NoiseKind::Worley];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Perlin => "Perlin",
            NoiseKind::Simplex => "Simplex",
            NoiseKind::Worley => "Worley",
        }
    }
}

impl FromStr for NoiseKind {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoiseKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GradientError::invalid_spec(format!("unknown noise kind \"{s}\"")))
    }
}

/// Amplitude preset for raster noise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseRange {
    /// `±intensity × 50`, used for file export.
    #[default]
    Subtle,
    /// `±intensity × 255`, used for the 3D texture.
    Strong,
}

impl NoiseRange {
    /// Channel amplitude at intensity 1.0.
    pub fn amplitude(self) -> f64 {
        match self {
            NoiseRange::Subtle => 50.0,
            NoiseRange::Strong => 255.0,
        }
    }
}

impl FromStr for NoiseRange {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subtle" => Ok(NoiseRange::Subtle),
            "strong" => Ok(NoiseRange::Strong),
            _ => Err(GradientError::invalid_spec(format!(
                "unknown noise range \"{s}\""
            ))),
        }
    }
}

/// Grain parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSpec {
    /// Whether any noise is applied.
    pub enabled: bool,
    /// Label only; see [`NoiseKind`].
    pub kind: NoiseKind,
    /// Strength in `[0, 1]`.
    pub intensity: f64,
    /// Preview tile side in pixels, `[10, 100]`.
    pub scale: u32,
    /// Raster amplitude preset.
    pub range: NoiseRange,
    /// Seed for the raster perturbation.
    pub seed: u64,
}

impl Default for NoiseSpec {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: NoiseKind::Perlin,
            intensity: 0.3,
            scale: 50,
            range: NoiseRange::Subtle,
            seed: 0,
        }
    }
}

impl NoiseSpec {
    /// Noise switched off.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enabled noise at `intensity` with defaults for everything else.
    pub fn enabled(intensity: f64) -> Self {
        Self {
            enabled: true,
            intensity,
            ..Self::default()
        }
    }

    /// Check intensity and scale. Disabled noise is never rejected.
    pub fn validate(&self) -> GradientResult<()> {
        if !self.enabled {
            return Ok(());
        }
        if !self.intensity.is_finite() || !NOISE_INTENSITY_RANGE.contains(&self.intensity) {
            return Err(GradientError::invalid_spec(format!(
                "noise intensity must be in [0, 1], got {}",
                self.intensity
            )));
        }
        if !NOISE_SCALE_RANGE.contains(&self.scale) {
            return Err(GradientError::invalid_spec(format!(
                "noise scale must be in [10, 100], got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

/// Encoded output container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless.
    #[default]
    Png,
    /// Lossy, encoder default quality.
    Jpeg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    /// Export file name, `gradient.<ext>`.
    pub fn file_name(self) -> String {
        format!("gradient.{}", self.extension())
    }

    /// MIME type of the encoded bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpeg" | "jpg" => Ok(ImageFormat::Jpeg),
            _ => Err(GradientError::invalid_target(format!(
                "unknown image format \"{s}\""
            ))),
        }
    }
}

/// Raster output size and container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterTarget {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoded container for export.
    #[serde(default)]
    pub format: ImageFormat,
}

impl RasterTarget {
    /// Build a target.
    pub fn new(width: u32, height: u32, format: ImageFormat) -> Self {
        Self {
            width,
            height,
            format,
        }
    }

    /// Reject empty targets and sizes whose RGBA8 byte length overflows `usize`.
    pub fn validate(&self) -> GradientResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GradientError::invalid_target(format!(
                "target must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        self.byte_len()?;
        Ok(())
    }

    pub(crate) fn byte_len(&self) -> GradientResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GradientError::invalid_target("target buffer size overflow"))
    }
}

/// Everything needed for one render, as loaded from a JSON document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientDocument {
    /// Colors and geometry.
    pub gradient: GradientSpec,
    /// Grain; disabled when omitted.
    #[serde(default)]
    pub noise: NoiseSpec,
    /// Output size and format.
    pub target: RasterTarget,
}

impl GradientDocument {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> GradientResult<Self> {
        let doc: Self = serde_json::from_str(s)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Validate every part.
    pub fn validate(&self) -> GradientResult<()> {
        self.gradient.validate()?;
        self.noise.validate()?;
        self.target.validate()
    }
}

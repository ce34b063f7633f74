use serde::Serialize;

use crate::{
    foundation::{
        error::{GradientError, GradientResult},
        math::{fmt_trimmed, unit_f64},
    },
    render::buffer::PixelBuffer,
    spec::model::{NoiseRange, NoiseSpec},
};

/// Octave count of the preview turbulence filter.
pub const TILE_OCTAVES: u32 = 4;

/// Per-pixel grain applied on the raster path.
///
/// One uniform offset `δ ∈ [-intensity·A, +intensity·A)` is drawn per pixel and added to R, G and
/// B. `A` comes from the [`NoiseRange`] preset. Draws are keyed by `(seed, x, y)` rather than by a
/// sequential generator, so output does not depend on how rows are split between workers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grain {
    seed: u64,
    amplitude: f64,
}

impl Grain {
    /// Grain for `noise`, or `None` when noise is off or has zero amplitude.
    pub fn from_spec(noise: &NoiseSpec) -> Option<Self> {
        Self::with_range(noise, noise.range)
    }

    /// Like [`Grain::from_spec`] but with an explicit amplitude preset.
    pub fn with_range(noise: &NoiseSpec, range: NoiseRange) -> Option<Self> {
        if !noise.enabled {
            return None;
        }
        let amplitude = noise.intensity * range.amplitude();
        if amplitude <= 0.0 {
            return None;
        }
        Some(Self {
            seed: noise.seed,
            amplitude,
        })
    }

    /// Maximum absolute channel offset.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Offset drawn for pixel `(x, y)`.
    pub fn delta_at(&self, x: u32, y: u32) -> f64 {
        (unit_f64(self.seed, x, y) * 2.0 - 1.0) * self.amplitude
    }

    /// Perturb one RGBA8 pixel in place. Alpha is untouched.
    pub fn apply(&self, px: &mut [u8], x: u32, y: u32) {
        let delta = self.delta_at(x, y);
        for c in &mut px[..3] {
            *c = (f64::from(*c) + delta).round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Square, tileable fractal-noise texture drawn over the preview.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NoiseTile {
    /// Tile side in pixels.
    pub size: u32,
    /// Turbulence base frequency, `intensity / 100`.
    pub base_frequency: f64,
    /// Turbulence octaves.
    pub octaves: u32,
}

impl NoiseTile {
    /// Overlay tile for `noise`, or `None` when noise is disabled.
    pub fn from_spec(noise: &NoiseSpec) -> Option<Self> {
        noise.enabled.then(|| Self {
            size: noise.scale,
            base_frequency: noise.intensity / 100.0,
            octaves: TILE_OCTAVES,
        })
    }

    /// Standalone SVG document with an `feTurbulence` filter.
    pub fn to_svg(&self) -> String {
        let n = self.size;
        format!(
            concat!(
                r#"<svg width="{n}" height="{n}" viewBox="0 0 {n} {n}" xmlns="http://www.w3.org/2000/svg">"#,
                r#"<filter id="noise"><feTurbulence type="fractalNoise" baseFrequency="{f}" numOctaves="{o}"/></filter>"#,
                r#"<rect width="100%" height="100%" filter="url(#noise)"/>"#,
                "</svg>"
            ),
            n = n,
            f = fmt_trimmed(self.base_frequency, 6),
            o = self.octaves,
        )
    }

    /// `data:` URI embedding [`NoiseTile::to_svg`], percent-encoded like `encodeURIComponent`.
    pub fn data_uri(&self) -> String {
        format!("data:image/svg+xml,{}", percent_encode(&self.to_svg()))
    }

    /// Rasterize the tile into straight-alpha RGBA8.
    #[tracing::instrument(skip(self), fields(size = self.size))]
    pub fn rasterize(&self) -> GradientResult<PixelBuffer> {
        let svg = self.to_svg();
        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())
            .map_err(|e| GradientError::Other(anyhow::anyhow!("parse noise tile svg: {e}")))?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(self.size, self.size).ok_or_else(|| {
            GradientError::invalid_target(format!("cannot allocate {0}x{0} noise tile", self.size))
        })?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        let mut data = pixmap.take();
        unpremultiply_in_place(&mut data);
        PixelBuffer::from_raw(self.size, self.size, data)
    }
}

fn unpremultiply_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

fn percent_encode(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(s.len() * 3);
    for &b in s.as_bytes() {
        let unreserved = b.is_ascii_alphanumeric()
            || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')');
        if unreserved {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[usize::from(b >> 4)] as char);
            out.push(HEX[usize::from(b & 0x0F)] as char);
        }
    }
    out
}

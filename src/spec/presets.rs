use serde::Serialize;

use crate::{
    foundation::{
        core::Rgb8,
        error::{GradientError, GradientResult},
        math::hash_u64,
    },
    spec::model::{GradientSpec, ImageFormat, RasterTarget},
};

/// Side of the square texture used by the 3D plane preview.
pub const TEXTURE_SIZE: u32 = 512;

/// A named two-color palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GradientPreset {
    /// Display name.
    pub name: &'static str,
    /// Palette colors.
    pub colors: [Rgb8; 2],
}

/// Built-in palettes in editor order.
pub const GRADIENT_PRESETS: [GradientPreset; 5] = [
    GradientPreset {
        name: "Midnight",
        colors: [Rgb8::from_u24(0x1F2937), Rgb8::from_u24(0x9CA3AF)],
    },
    GradientPreset {
        name: "Ocean",
        colors: [Rgb8::from_u24(0x0EA5E9), Rgb8::from_u24(0x2563EB)],
    },
    GradientPreset {
        name: "Sunset",
        colors: [Rgb8::from_u24(0xF43F5E), Rgb8::from_u24(0x7C3AED)],
    },
    GradientPreset {
        name: "Forest",
        colors: [Rgb8::from_u24(0x059669), Rgb8::from_u24(0x10B981)],
    },
    GradientPreset {
        name: "Dawn",
        colors: [Rgb8::from_u24(0xD946EF), Rgb8::from_u24(0xEC4899)],
    },
];

impl GradientPreset {
    /// Look up a preset by case-insensitive name.
    pub fn find(name: &str) -> GradientResult<Self> {
        GRADIENT_PRESETS
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| GradientError::invalid_spec(format!("unknown gradient preset \"{name}\"")))
    }

    /// Replace the colors of `spec` with this palette, keeping angle and pattern.
    pub fn apply_to(&self, spec: &mut GradientSpec) {
        spec.colors = self.colors.to_vec();
    }
}

/// Export resolutions offered by the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Resolution {
    /// 1920×1080.
    #[default]
    Hd1080,
    /// 2560×1440.
    Qhd2k,
    /// 3840×2160.
    Uhd4k,
    /// 5120×2880.
    Uhd5k,
}

impl Resolution {
    /// All resolutions, smallest first.
    pub const ALL: [Resolution; 4] = [
        Resolution::Hd1080,
        Resolution::Qhd2k,
        Resolution::Uhd4k,
        Resolution::Uhd5k,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Resolution::Hd1080 => "1080p",
            Resolution::Qhd2k => "2K",
            Resolution::Uhd4k => "4K",
            Resolution::Uhd5k => "5K",
        }
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Resolution::Hd1080 => (1920, 1080),
            Resolution::Qhd2k => (2560, 1440),
            Resolution::Uhd4k => (3840, 2160),
            Resolution::Uhd5k => (5120, 2880),
        }
    }

    /// Raster target at this resolution.
    pub fn target(self, format: ImageFormat) -> RasterTarget {
        let (width, height) = self.dimensions();
        RasterTarget::new(width, height, format)
    }
}

impl std::str::FromStr for Resolution {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GradientError::invalid_target(format!("unknown resolution \"{s}\"")))
    }
}

impl GradientSpec {
    /// Copy of `self` with every color replaced by a seeded random 24-bit color.
    pub fn randomized_colors(&self, seed: u64) -> Self {
        let colors = (0..self.colors.len())
            .map(|i| Rgb8::from_u24((hash_u64(seed, i as u32, 0) & 0x00FF_FFFF) as u32))
            .collect();
        Self {
            colors,
            ..self.clone()
        }
    }
}

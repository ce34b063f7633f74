use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{GradientError, GradientResult};

pub use kurbo::{Point, Vec2};

/// Opaque sRGB color, 8 bits per channel.
///
/// Serializes as `#rrggbb`. Deserializes from `#RRGGBB`, `RRGGBB`, `#RGB` or an `[r, g, b]`
/// integer array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Black, the color the editor appends when a stop is added.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Construct from a packed `0xRRGGBB` value; the top byte is ignored.
    pub const fn from_u24(v: u32) -> Self {
        Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Parse a hex color (`#RRGGBB`, `RRGGBB`, `#RGB`), case-insensitive.
    pub fn parse_hex(s: &str) -> GradientResult<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GradientError::invalid_spec(format!(
                "invalid hex color \"{s}\""
            )));
        }

        fn hex_byte(pair: &str) -> GradientResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| GradientError::invalid_spec(format!("invalid hex byte \"{pair}\"")))
        }

        match digits.len() {
            6 => Ok(Self::new(
                hex_byte(&digits[0..2])?,
                hex_byte(&digits[2..4])?,
                hex_byte(&digits[4..6])?,
            )),
            3 => {
                let nib = |i: usize| -> GradientResult<u8> {
                    let v = hex_byte(&digits[i..i + 1])?;
                    Ok(v * 17)
                };
                Ok(Self::new(nib(0)?, nib(1)?, nib(2)?))
            }
            _ => Err(GradientError::invalid_spec(format!(
                "hex color must be #RRGGBB or #RGB, got \"{s}\""
            ))),
        }
    }

    /// Channels as an opaque RGBA8 pixel.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b)),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have len 3 ([r,g,b])",
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb8::parse_hex("#1F2937").unwrap(), Rgb8::new(31, 41, 55));
        assert_eq!(Rgb8::parse_hex("9ca3af").unwrap(), Rgb8::new(156, 163, 175));
        assert_eq!(Rgb8::parse_hex("#fa0").unwrap(), Rgb8::new(255, 170, 0));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#12345", "#gg0000", "#1234567", "#ééé"] {
            assert!(
                matches!(Rgb8::parse_hex(bad), Err(GradientError::InvalidSpec(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Rgb8::new(0x1F, 0x29, 0x37).to_string(), "#1f2937");
    }

    #[test]
    fn serde_accepts_hex_and_arrays() {
        let c: Rgb8 = serde_json::from_value(json!("#0EA5E9")).unwrap();
        assert_eq!(c, Rgb8::new(14, 165, 233));

        let c: Rgb8 = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(c, Rgb8::new(1, 2, 3));

        assert!(serde_json::from_value::<Rgb8>(json!([1, 2])).is_err());
        assert_eq!(serde_json::to_value(c).unwrap(), json!("#010203"));
    }

    #[test]
    fn from_u24_unpacks_channels() {
        assert_eq!(Rgb8::from_u24(0x00_12_34_56), Rgb8::new(0x12, 0x34, 0x56));
    }
}

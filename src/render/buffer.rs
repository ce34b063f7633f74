use crate::foundation::error::{GradientError, GradientResult};

/// An RGBA8 image, tightly packed, row-major, straight (non-premultiplied) alpha.
///
/// Each render call allocates a fresh buffer owned by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Opaque black buffer of the given size.
    pub fn opaque(width: u32, height: u32) -> GradientResult<Self> {
        let len = rgba_len(width, height)?;
        let mut data = vec![0u8; len];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap existing bytes, checking the length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> GradientResult<Self> {
        let len = rgba_len(width, height)?;
        if data.len() != len {
            return Err(GradientError::invalid_target(format!(
                "pixel data length {} does not match {width}x{height} rgba8",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.stride() + x as usize * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Whether every pixel has alpha 255.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 255)
    }

    /// Drop alpha, yielding tightly packed RGB8.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / 4 * 3);
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&px[..3]);
        }
        out
    }
}

fn rgba_len(width: u32, height: u32) -> GradientResult<usize> {
    if width == 0 || height == 0 {
        return Err(GradientError::invalid_target(format!(
            "buffer must be non-empty, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| GradientError::invalid_target("buffer size overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_buffer_has_full_alpha() {
        let b = PixelBuffer::opaque(3, 2).unwrap();
        assert_eq!(b.data.len(), 24);
        assert!(b.is_opaque());
        assert_eq!(b.pixel(2, 1), Some([0, 0, 0, 255]));
        assert_eq!(b.pixel(3, 0), None);
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_err());
        let b = PixelBuffer::from_raw(1, 1, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(b.to_rgb8(), vec![1, 2, 3]);
        assert!(!b.is_opaque());
    }

    #[test]
    fn empty_buffer_is_rejected() {
        assert!(matches!(
            PixelBuffer::opaque(0, 1),
            Err(GradientError::InvalidTarget(_))
        ));
    }
}

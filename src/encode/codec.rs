use image::ImageEncoder as _;

use crate::{
    foundation::error::{GradientError, GradientResult},
    render::buffer::PixelBuffer,
    spec::model::ImageFormat,
};

/// Encode `buffer` as PNG (lossless) or JPEG (encoder default quality).
///
/// JPEG is written from RGB; rendered buffers are always opaque so nothing is lost by
/// dropping alpha.
#[tracing::instrument(skip(buffer), fields(width = buffer.width, height = buffer.height))]
pub fn encode(buffer: &PixelBuffer, format: ImageFormat) -> GradientResult<Vec<u8>> {
    let expected = (buffer.width as usize)
        .checked_mul(buffer.height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| GradientError::encoding("buffer size overflow"))?;
    if buffer.width == 0 || buffer.height == 0 || buffer.data.len() != expected {
        return Err(GradientError::encoding(format!(
            "buffer of {} bytes is not a {}x{} rgba8 image",
            buffer.data.len(),
            buffer.width,
            buffer.height
        )));
    }

    let mut out = Vec::new();
    match format {
        ImageFormat::Png => {
            image::codecs::png::PngEncoder::new(&mut out).write_image(
                &buffer.data,
                buffer.width,
                buffer.height,
                image::ExtendedColorType::Rgba8,
            )?;
        }
        ImageFormat::Jpeg => {
            let rgb = buffer.to_rgb8();
            image::codecs::jpeg::JpegEncoder::new(&mut out).write_image(
                &rgb,
                buffer.width,
                buffer.height,
                image::ExtendedColorType::Rgb8,
            )?;
        }
    }
    tracing::debug!(bytes = out.len(), ?format, "encoded gradient");
    Ok(out)
}

/// Decode PNG or JPEG bytes into an RGBA8 buffer.
pub fn decode(bytes: &[u8], format: ImageFormat) -> GradientResult<PixelBuffer> {
    let img = image::load_from_memory_with_format(bytes, format.to_image_format())?.to_rgba8();
    let (width, height) = img.dimensions();
    PixelBuffer::from_raw(width, height, img.into_raw())
}

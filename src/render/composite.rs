use crate::{
    foundation::error::{GradientError, GradientResult},
    render::buffer::PixelBuffer,
};

/// Source-over for straight-alpha RGBA8 onto an opaque destination pixel.
///
/// The result stays opaque; only color channels change.
pub fn over_opaque(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return [src[0], src[1], src[2], dst[3]];
    }
    let inv = 255 - sa;
    let mut out = dst;
    for i in 0..3 {
        out[i] = add_sat_u8(
            mul_div255(u16::from(src[i]), sa),
            mul_div255(u16::from(dst[i]), inv),
        );
    }
    out
}

/// Repeat `tile` across `dst` from the top-left corner and composite it with normal blending.
pub fn overlay_tiled(dst: &mut PixelBuffer, tile: &PixelBuffer) -> GradientResult<()> {
    if tile.width == 0 || tile.height == 0 || tile.data.len() != tile.stride() * tile.height as usize
    {
        return Err(GradientError::invalid_target(
            "overlay_tiled expects a non-empty rgba8 tile",
        ));
    }
    let stride = dst.stride();
    for (y, row) in dst.data.chunks_exact_mut(stride).enumerate() {
        let ty = y % tile.height as usize;
        let tile_row = &tile.data[ty * tile.stride()..(ty + 1) * tile.stride()];
        for (x, d) in row.chunks_exact_mut(4).enumerate() {
            let tx = (x % tile.width as usize) * 4;
            let s = &tile_row[tx..tx + 4];
            let out = over_opaque([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_src_is_noop() {
        let dst = [10, 20, 30, 255];
        assert_eq!(over_opaque(dst, [255, 255, 255, 0]), dst);
    }

    #[test]
    fn opaque_src_replaces_color() {
        assert_eq!(
            over_opaque([0, 0, 0, 255], [200, 100, 50, 255]),
            [200, 100, 50, 255]
        );
    }

    #[test]
    fn half_alpha_mixes() {
        let out = over_opaque([0, 0, 0, 255], [255, 255, 255, 128]);
        assert_eq!(out, [128, 128, 128, 255]);
    }

    #[test]
    fn tile_repeats_across_destination() {
        let mut dst = PixelBuffer::opaque(5, 3).unwrap();
        let tile = PixelBuffer::from_raw(
            2,
            1,
            vec![255, 255, 255, 255, 0, 0, 0, 0],
        )
        .unwrap();
        overlay_tiled(&mut dst, &tile).unwrap();
        for y in 0..3 {
            for x in 0..5 {
                let expect = if x % 2 == 0 {
                    [255, 255, 255, 255]
                } else {
                    [0, 0, 0, 255]
                };
                assert_eq!(dst.pixel(x, y), Some(expect));
            }
        }
    }
}

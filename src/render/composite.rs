use crate::foundation::core::RasterAsset;
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Composite `src` over a `dst_w x dst_h` buffer with its top-left pixel at `origin`.
///
/// Pixels of `src` that land outside the destination are dropped.
pub fn over_at(dst: &mut [u8], dst_w: u32, dst_h: u32, src: &RasterAsset, origin: (i32, i32)) {
    let (ox, oy) = (i64::from(origin.0), i64::from(origin.1));
    let x0 = ox.max(0);
    let y0 = oy.max(0);
    let x1 = (ox + i64::from(src.width())).min(i64::from(dst_w));
    let y1 = (oy + i64::from(src.height())).min(i64::from(dst_h));
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src_w = src.width() as usize;
    let data = src.data();
    let span = ((x1 - x0) as usize) * 4;
    for y in y0..y1 {
        let sy = (y - oy) as usize;
        let sx = (x0 - ox) as usize;
        let s_start = (sy * src_w + sx) * 4;
        let d_start = ((y as usize) * (dst_w as usize) + (x0 as usize)) * 4;
        let s_row = &data[s_start..s_start + span];
        let d_row = &mut dst[d_start..d_start + span];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

/// Flatten premultiplied RGBA8 onto an opaque matte, producing packed RGB8.
pub fn flatten_to_rgb8(src: &[u8], matte: [u8; 3]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() / 4 * 3);
    for px in src.chunks_exact(4) {
        let inv = 255u16 - u16::from(px[3]);
        for c in 0..3 {
            out.push(px[c].saturating_add(mul_div255_u8(u16::from(matte[c]), inv)));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_black_darkens_white() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 128]);
    assert_eq!(out, [127, 127, 127, 255]);
}

#[test]
fn over_at_respects_origin_and_clipping() {
    let (w, h) = (3u32, 2u32);
    let mut dst = vec![0u8; (w * h * 4) as usize];
    let src = RasterAsset::from_premul(2, 2, [9u8, 8, 7, 255].repeat(4)).unwrap();

    over_at(&mut dst, w, h, &src, (2, 1));
    let touched: Vec<usize> = dst
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, px)| px[3] != 0)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(touched, vec![5]);

    over_at(&mut dst, w, h, &src, (10, 10));
    over_at(&mut dst, w, h, &src, (-2, -2));
    assert_eq!(dst.chunks_exact(4).filter(|px| px[3] != 0).count(), 1);
}

#[test]
fn flatten_transparent_becomes_matte() {
    let src = [0u8, 0, 0, 0, 255, 0, 0, 255, 0, 0, 0, 128];
    let out = flatten_to_rgb8(&src, [255, 255, 255]);
    assert_eq!(out, vec![255, 255, 255, 255, 0, 0, 127, 127, 127]);
}

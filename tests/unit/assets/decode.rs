use std::io::Cursor;

use super::*;

fn encode(img: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let buf = encode(image::DynamicImage::ImageRgba8(img), image::ImageFormat::Png);

    let raster = decode_image(&buf, AssetRole::Logo).unwrap();
    assert_eq!((raster.width(), raster.height()), (1, 1));
    assert_eq!(
        raster.data(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rgb_adds_opaque_alpha() {
    let img = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
    let buf = encode(image::DynamicImage::ImageRgb8(img), image::ImageFormat::Png);

    let raster = decode_image(&buf, AssetRole::Background).unwrap();
    assert_eq!((raster.width(), raster.height()), (3, 2));
    assert!(raster.data().chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
}

#[test]
fn decode_garbage_names_the_asset() {
    let err = decode_image(b"definitely not an image", AssetRole::Background).unwrap_err();
    match err {
        PostError::Decode { asset, .. } => assert_eq!(asset, AssetRole::Background),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        decode_image(&[], AssetRole::Logo),
        Err(PostError::Decode {
            asset: AssetRole::Logo,
            ..
        })
    ));
}

#[test]
fn decode_logo_sniffs_svg() {
    let svg = br#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect width="40" height="20" fill="red"/></svg>"#;
    match decode_logo(svg).unwrap() {
        LogoSource::Vector(tree) => {
            assert_eq!(tree.size().width(), 40.0);
            assert_eq!(tree.size().height(), 20.0);
        }
        LogoSource::Raster(_) => panic!("svg decoded as raster"),
    }

    let bad = br#"<svg"#;
    assert!(decode_logo(bad).is_err());
}

#[test]
fn decode_logo_accepts_raster() {
    let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([0, 0, 255, 255]));
    let buf = encode(image::DynamicImage::ImageRgba8(img), image::ImageFormat::Png);
    let logo = decode_logo(&buf).unwrap();
    assert_eq!(logo.intrinsic_size(), (4.0, 2.0));
}

use std::sync::Arc;

use super::*;

fn square_logo() -> LogoSource {
    LogoSource::Raster(RasterAsset::solid(400, 400, Rgba8::rgb(0, 0, 255)).unwrap())
}

#[test]
fn square_logo_on_1080_canvas_is_162px() {
    let style = DesignStyle::default();
    let placed = place(square_logo(), Size::new(1080, 1080), &style).unwrap();
    assert_eq!(placed.logo_rect, Rect::new(30, 30, 162, 162));
    assert_eq!(placed.logo.origin, (30, 30));
    assert_eq!(placed.logo.image.size(), Size::new(162, 162));
}

#[test]
fn shadow_is_offset_and_padded_by_blur_radius() {
    let style = DesignStyle::default();
    let placed = place(square_logo(), Size::new(1080, 1080), &style).unwrap();
    assert_eq!(placed.shadow_rect, Rect::new(35, 35, 162, 162));

    let pad = radius_for_sigma(style.logo_shadow_sigma) as i32;
    assert_eq!(placed.shadow.origin, (35 - pad, 35 - pad));
    assert_eq!(placed.shadow.image.width(), 162 + 2 * pad as u32);

    // Soft edge: center keeps the fill alpha, the outer corner fades to nothing.
    let c = placed.shadow.image.width() / 2;
    assert_eq!(placed.shadow.image.pixel(c, c)[3], style.logo_shadow_alpha);
    assert_eq!(placed.shadow.image.pixel(0, 0)[3], 0);
}

#[test]
fn aspect_ratio_is_preserved() {
    let style = DesignStyle::default();
    let size = logo_size((800.0, 200.0), Size::new(1200, 628), &style).unwrap();
    // round(628 * 0.15) = 94, width = 94 * 4
    assert_eq!(size, Size::new(376, 94));
}

#[test]
fn degenerate_intrinsic_size_is_rejected() {
    let style = DesignStyle::default();
    assert!(logo_size((0.0, 10.0), Size::new(100, 100), &style).is_err());
}

#[test]
fn vector_logo_is_rasterized_at_placement_size() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="white"/></svg>"#;
    let tree = usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default()).unwrap();
    let style = DesignStyle::default();
    let placed = place(
        LogoSource::Vector(Arc::new(tree)),
        Size::new(1000, 1000),
        &style,
    )
    .unwrap();
    assert_eq!(placed.logo.image.size(), Size::new(300, 150));
}

#[test]
fn extreme_aspect_is_bounded_by_canvas_width() {
    let style = DesignStyle::default();
    let canvas = Size::new(1080, 1080);

    // 162 * 4000 would be 648000 wide; the box stops at the canvas edge instead.
    let size = logo_size((4000.0, 1.0), canvas, &style).unwrap();
    assert_eq!(size, Size::new(1050, 1));

    let size = logo_size((1e7, 1.0), canvas, &style).unwrap();
    assert_eq!(size.width, 1050);
    assert!(size.height >= 1);

    // Wide but fitting logos keep the full height.
    let size = logo_size((6.0, 1.0), canvas, &style).unwrap();
    assert_eq!(size, Size::new(972, 162));

    let size = logo_size((8.0, 1.0), canvas, &style).unwrap();
    assert_eq!(size, Size::new(1050, 131));
}

#[test]
fn wide_raster_logo_places_within_canvas() {
    let style = DesignStyle::default();
    let wide = LogoSource::Raster(RasterAsset::solid(4000, 1, Rgba8::rgb(0, 0, 255)).unwrap());
    let placed = place(wide, Size::new(1080, 1080), &style).unwrap();
    assert_eq!(placed.logo_rect, Rect::new(30, 30, 1050, 1));
    assert!(placed.logo_rect.right() <= 1080);

    let pad = radius_for_sigma(style.logo_shadow_sigma);
    assert_eq!(placed.shadow.image.width(), 1050 + 2 * pad);
}

#[test]
fn inset_past_canvas_edge_is_a_geometry_error() {
    let style = DesignStyle {
        logo_inset: (2000, 30),
        ..DesignStyle::default()
    };
    let err = logo_size((1.0, 1.0), Size::new(1080, 1080), &style).unwrap_err();
    assert!(matches!(err, PostError::Geometry(_)));
}

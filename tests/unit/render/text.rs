use super::*;
use crate::assets::font::FontHandle;
use crate::foundation::core::{Rect, Size};
use crate::layout::text::{TextContent, TextLayoutEngine, layout};

const CANVAS: Size = Size {
    width: 1080,
    height: 1080,
};

fn laid_out(primary: &str, secondary: Option<&str>) -> TextLayout {
    let f = FontHandle::embedded_default().unwrap();
    let mut engine = TextLayoutEngine::new();
    layout(
        &mut engine,
        Rect::new(50, 800, 980, 200),
        TextContent { primary, secondary },
        &f,
        &f,
        &DesignStyle::default(),
    )
    .unwrap()
}

fn max_alpha(layer: &Layer) -> u8 {
    layer
        .image
        .data()
        .chunks_exact(4)
        .map(|px| px[3])
        .max()
        .unwrap_or(0)
}

#[test]
fn each_block_gets_four_shadows_and_one_fill() {
    let t = laid_out("Sale!", Some("Black Friday"));
    let layers = rasterize(&t, CANVAS, &DesignStyle::default()).unwrap();
    assert_eq!(layers.shadows.len(), 8);
    assert_eq!(layers.glyphs.len(), 2);
}

#[test]
fn glyph_layer_is_positioned_with_bleed() {
    let t = laid_out("Sale!", None);
    let layers = rasterize(&t, CANVAS, &DesignStyle::default()).unwrap();
    let r = t.primary.rect;
    let b = TEXT_BLEED as i32;
    assert_eq!(layers.glyphs[0].origin, (r.x - b, r.y - b));
    assert_eq!(layers.glyphs[0].image.width(), r.width + 2 * TEXT_BLEED);
}

#[test]
fn glyphs_draw_ink_and_shadows_stay_translucent() {
    let t = laid_out("Sale!", None);
    let layers = rasterize(&t, CANVAS, &DesignStyle::default()).unwrap();

    assert!(max_alpha(&layers.glyphs[0]) >= 200);
    let shadow_max = max_alpha(&layers.shadows[0]);
    assert!(shadow_max > 0 && shadow_max <= 128);

    // Shadow pixels are black.
    assert!(
        layers.shadows[0]
            .image
            .data()
            .chunks_exact(4)
            .all(|px| px[0] == 0 && px[1] == 0 && px[2] == 0)
    );
}

#[test]
fn empty_text_produces_no_layers() {
    let t = laid_out("", None);
    let layers = rasterize(&t, CANVAS, &DesignStyle::default()).unwrap();
    assert!(layers.shadows.is_empty());
    assert!(layers.glyphs.is_empty());
}

#[test]
fn very_long_text_is_clipped_to_the_canvas() {
    let long = "Sale! ".repeat(25_000);
    let t = laid_out(&long, None);
    assert!(t.primary.rect.height > u32::from(u16::MAX));

    let layers = rasterize(&t, CANVAS, &DesignStyle::default()).unwrap();
    let glyphs = &layers.glyphs[0];
    let d = DesignStyle::default().text_shadow_offset;
    assert!(glyphs.image.height() <= CANVAS.height + 2 * d as u32);
    assert!(glyphs.image.width() <= CANVAS.width + 2 * d as u32);
    assert_eq!(glyphs.origin.0, t.primary.rect.x - TEXT_BLEED as i32);
    assert_eq!(glyphs.origin.1, -d);
    assert!(max_alpha(glyphs) >= 200);

    // Shadows keep their offsets relative to the clipped fill.
    assert_eq!(layers.shadows[0].origin, (glyphs.origin.0 - d, glyphs.origin.1 - d));
}

#[test]
fn block_entirely_off_canvas_is_skipped() {
    let t = laid_out("Sale!", None);
    let tiny = Size::new(10, 10);
    let layers = rasterize(&t, tiny, &DesignStyle::default()).unwrap();
    assert!(layers.glyphs.is_empty());
    assert!(layers.shadows.is_empty());
}

use super::*;
use crate::assets::decode::LogoSource;
use crate::config::DesignStyle;
use crate::foundation::core::{Rgba8, Size};
use crate::layout::logo::place;
use crate::render::overlay::compose;

const BG: Rgba8 = Rgba8::rgb(200, 200, 200);
const LOGO: Rgba8 = Rgba8::rgb(0, 0, 255);

fn parts() -> (RasterAsset, OverlayLayers, LogoLayers) {
    let style = DesignStyle::default();
    let size = Size::new(1080, 1080);
    let bg = RasterAsset::solid(1080, 1080, BG).unwrap();
    let overlays = compose(size, Rgba8::rgb(255, 0, 0), Rgba8::rgb(0, 0, 0), &style).unwrap();
    let logo = place(
        LogoSource::Raster(RasterAsset::solid(400, 400, LOGO).unwrap()),
        size,
        &style,
    )
    .unwrap();
    (bg, overlays, logo)
}

#[test]
fn stack_order_is_fixed() {
    let (bg, overlays, logo) = parts();
    let bg = Layer::new(bg, 0, 0);
    let text = TextLayers {
        shadows: vec![bg.clone(), bg.clone()],
        glyphs: vec![bg.clone()],
    };
    let kinds: Vec<LayerKind> = stack(&bg, &overlays, Some(&logo), &text)
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(
        kinds,
        vec![
            LayerKind::Background,
            LayerKind::Band,
            LayerKind::Plate,
            LayerKind::LogoShadow,
            LayerKind::Logo,
            LayerKind::TextShadow,
            LayerKind::TextShadow,
            LayerKind::Text,
        ]
    );
    assert!(kinds.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn stack_without_logo_skips_logo_layers() {
    let (bg, overlays, _) = parts();
    let bg = Layer::new(bg, 0, 0);
    let kinds: Vec<LayerKind> = stack(&bg, &overlays, None, &TextLayers::empty())
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(
        kinds,
        vec![LayerKind::Background, LayerKind::Band, LayerKind::Plate]
    );
}

#[test]
fn logo_covers_its_shadow_and_shadow_darkens_background() {
    let (bg, overlays, logo) = parts();
    let canvas = render(bg, &overlays, Some(&logo), &TextLayers::empty()).unwrap();
    assert_eq!(canvas.size(), Size::new(1080, 1080));

    assert_eq!(canvas.pixel(100, 100), LOGO.to_premul());
    let under_shadow = canvas.pixel(195, 195);
    assert!(under_shadow[0] < BG.r);
    assert_eq!(canvas.pixel(600, 300), BG.to_premul());
}

#[test]
fn plate_is_drawn_over_band() {
    let (bg, overlays, _) = parts();
    let canvas = render(bg, &overlays, None, &TextLayers::empty()).unwrap();
    assert_eq!(canvas.pixel(540, 918), Rgba8::rgb(255, 0, 0).to_premul());
    assert_eq!(canvas.pixel(2, 1078), Rgba8::rgb(0, 0, 0).to_premul());
}

#[test]
fn mismatched_overlays_are_rejected() {
    let (_, overlays, _) = parts();
    let bg = RasterAsset::solid(1200, 628, BG).unwrap();
    assert!(render(bg, &overlays, None, &TextLayers::empty()).is_err());
}

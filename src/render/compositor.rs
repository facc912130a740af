use crate::foundation::core::{Canvas, Layer, RasterAsset};
use crate::foundation::error::{PostError, PostResult};
use crate::layout::logo::LogoLayers;
use crate::render::overlay::OverlayLayers;
use crate::render::text::TextLayers;

/// Kind of each layer in the composition stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Background,
    Band,
    Plate,
    LogoShadow,
    Logo,
    TextShadow,
    Text,
}

/// Every layer in compositing order. Decorations never cover the logo or text, and each
/// shadow sits directly beneath its owner.
pub fn stack<'a>(
    background: &'a Layer,
    overlays: &'a OverlayLayers,
    logo: Option<&'a LogoLayers>,
    text: &'a TextLayers,
) -> Vec<(LayerKind, &'a Layer)> {
    let mut out = Vec::with_capacity(5 + text.shadows.len() + text.glyphs.len());
    out.push((LayerKind::Background, background));
    out.push((LayerKind::Band, &overlays.band));
    out.push((LayerKind::Plate, &overlays.plate));
    if let Some(l) = logo {
        out.push((LayerKind::LogoShadow, &l.shadow));
        out.push((LayerKind::Logo, &l.logo));
    }
    out.extend(text.shadows.iter().map(|s| (LayerKind::TextShadow, s)));
    out.extend(text.glyphs.iter().map(|g| (LayerKind::Text, g)));
    out
}

/// Composite all layers onto a new canvas the size of `background`.
pub fn render(
    background: RasterAsset,
    overlays: &OverlayLayers,
    logo: Option<&LogoLayers>,
    text: &TextLayers,
) -> PostResult<Canvas> {
    let mut canvas = Canvas::new(background.size())?;
    if overlays.band_rect.width != canvas.width() {
        return Err(PostError::validation(
            "overlay layers were built for a different canvas size",
        ));
    }

    let background = Layer::new(background, 0, 0);
    let layers = stack(&background, overlays, logo, text);
    tracing::debug!(layers = layers.len(), "compositing");
    for (_, layer) in layers {
        canvas.composite(layer);
    }
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;

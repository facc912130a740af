use crate::config::DesignStyle;
use crate::foundation::core::{Layer, RasterAsset, Rect, Rgba8, Size};
use crate::foundation::error::PostResult;
use crate::layout::text::{TextBlock, TextLayout};
use crate::render::{cpu_context, finish_raster, paint};

/// Transparent margin around each text raster so glyph ink outside the line box survives.
pub const TEXT_BLEED: u32 = 8;

/// Rasterized text: every shadow copy, then every main block.
#[derive(Clone, Debug, Default)]
pub struct TextLayers {
    pub shadows: Vec<Layer>,
    pub glyphs: Vec<Layer>,
}

impl TextLayers {
    /// No text at all.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Rasterize each block once in its fill color and once in the shadow color; the shadow
/// raster is reused for all four offsets.
///
/// Each raster covers only the part of its block that can reach `canvas`, so text far
/// longer than the plate never needs a raster larger than the canvas itself.
pub fn rasterize(text: &TextLayout, canvas: Size, style: &DesignStyle) -> PostResult<TextLayers> {
    let shadow_color = Rgba8::BLACK.with_alpha(style.text_shadow_alpha);
    let mut out = TextLayers::empty();

    for block in text.blocks() {
        if block.rect.width == 0 || block.rect.height == 0 {
            tracing::debug!(role = ?block.role, "skipping empty text block");
            continue;
        }
        let Some(window) = visible_window(block, canvas) else {
            tracing::debug!(role = ?block.role, rect = ?block.rect, "text block is off canvas");
            continue;
        };

        let shadow = rasterize_block(block, window, Some(shadow_color))?;
        for (dx, dy) in block.shadow_offsets {
            out.shadows
                .push(Layer::new(shadow.clone(), window.x + dx, window.y + dy));
        }

        let glyphs = rasterize_block(block, window, None)?;
        out.glyphs.push(Layer::new(glyphs, window.x, window.y));
    }

    Ok(out)
}

// The block plus its bleed, cut down to the canvas grown by the largest shadow offset.
fn visible_window(block: &TextBlock, canvas: Size) -> Option<Rect> {
    let bleed = TEXT_BLEED as i32;
    let full = Rect::new(
        block.rect.x - bleed,
        block.rect.y - bleed,
        block.rect.width + 2 * TEXT_BLEED,
        block.rect.height + 2 * TEXT_BLEED,
    );
    let reach = block
        .shadow_offsets
        .iter()
        .map(|&(dx, dy)| dx.unsigned_abs().max(dy.unsigned_abs()))
        .max()
        .unwrap_or(0);
    let reach_i = reach as i32;
    let stage = Rect::new(
        -reach_i,
        -reach_i,
        canvas.width + 2 * reach,
        canvas.height + 2 * reach,
    );
    full.intersect(stage)
}

/// Draw the part of a block's glyphs that falls inside `window` (canvas coordinates).
/// `fill` overrides the brush stored in the layout.
fn rasterize_block(block: &TextBlock, window: Rect, fill: Option<Rgba8>) -> PostResult<RasterAsset> {
    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(block.font.bytes().to_vec()),
        0,
    );

    let mut ctx = cpu_context(window.width, window.height)?;
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(block.rect.x - window.x),
        f64::from(block.rect.y - window.y),
    )));

    let top = (window.y - block.rect.y) as f32;
    let bottom = top + window.height as f32;
    let slack = TEXT_BLEED as f32;

    for line in block.layout.lines() {
        let m = line.metrics();
        if m.baseline + m.descent + slack < top || m.baseline - m.ascent - slack > bottom {
            continue;
        }
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let color = fill.unwrap_or_else(|| {
                let b = run.style().brush;
                Rgba8::rgba(b.r, b.g, b.b, b.a)
            });
            ctx.set_paint(paint(color));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }

    finish_raster(&mut ctx, window.width, window.height)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;

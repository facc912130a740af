use std::collections::HashMap;

use crate::assets::font::FontHandle;
use crate::config::DesignStyle;
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{PostError, PostResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
///
/// Fonts are registered once per engine, keyed by a hash of their bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<u64, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, font: &FontHandle) -> PostResult<String> {
        let key = xxhash_rust::xxh3::xxh3_64(font.bytes());
        if let Some(name) = self.families.get(&key) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes().to_vec()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| PostError::font_load("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PostError::font_load("registered font family has no name"))?
            .to_string();

        self.families.insert(key, name.clone());
        Ok(name)
    }

    /// Shape and lay out plain text using the given font and styling.
    pub fn layout_plain(
        &mut self,
        text: &str,
        font: &FontHandle,
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> PostResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PostError::validation("text size_px must be finite and > 0"));
        }

        let family_name = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        if let Some(w) = max_width_px {
            layout.break_all_lines(Some(w));
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        } else {
            layout.break_all_lines(None);
        }

        Ok(layout)
    }
}

/// Which content string a block renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Primary,
    Secondary,
}

/// A shaped text block with its placement on the canvas.
pub struct TextBlock {
    /// Which string this block shows.
    pub role: TextRole,
    /// Bounding box of the block on the canvas.
    pub rect: Rect,
    /// Offsets of the shadow copies relative to `rect`'s origin.
    pub shadow_offsets: [(i32, i32); 4],
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: FontHandle,
}

impl std::fmt::Debug for TextBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBlock")
            .field("role", &self.role)
            .field("rect", &self.rect)
            .field("lines", &self.line_count())
            .finish()
    }
}

impl TextBlock {
    /// Number of laid out lines.
    pub fn line_count(&self) -> usize {
        self.layout.len()
    }

    /// Top-left corners of the four shadow copies.
    pub fn shadow_origins(&self) -> [(i32, i32); 4] {
        self.shadow_offsets
            .map(|(dx, dy)| (self.rect.x + dx, self.rect.y + dy))
    }
}

/// Placement of the primary block and the optional secondary block.
#[derive(Debug)]
pub struct TextLayout {
    /// Main description, always present (possibly zero-sized).
    pub primary: TextBlock,
    /// Occasion line below the primary block.
    pub secondary: Option<TextBlock>,
}

impl TextLayout {
    /// Blocks in drawing order.
    pub fn blocks(&self) -> impl Iterator<Item = &TextBlock> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }
}

/// Text strings laid out by [`layout`].
#[derive(Clone, Copy, Debug)]
pub struct TextContent<'a> {
    /// Main description.
    pub primary: &'a str,
    /// Occasion line; blank strings count as absent.
    pub secondary: Option<&'a str>,
}

/// Measured extent of shaped text, rounded up to whole pixels.
pub fn measure(layout: &parley::Layout<TextBrushRgba8>) -> (u32, u32) {
    let w = layout.width();
    let h = layout.height();
    let px = |v: f32| {
        if v.is_finite() && v > 0.0 {
            v.ceil() as u32
        } else {
            0
        }
    };
    (px(w), px(h))
}

// floor((outer - inner) / 2) so an odd remainder biases toward the left.
fn centered(start: i32, outer: u32, inner: u32) -> i32 {
    let diff = i64::from(outer) - i64::from(inner);
    (i64::from(start) + diff.div_euclid(2)) as i32
}

fn shadow_offsets(d: i32) -> [(i32, i32); 4] {
    [(-d, -d), (d, -d), (-d, d), (d, d)]
}

/// Measure both text blocks and center them, stacked, within `plate`.
pub fn layout(
    engine: &mut TextLayoutEngine,
    plate: Rect,
    content: TextContent<'_>,
    primary_font: &FontHandle,
    secondary_font: &FontHandle,
    style: &DesignStyle,
) -> PostResult<TextLayout> {
    let brush = TextBrushRgba8::from(style.text_color);
    let max_w = style.wrap_text.then_some(plate.width as f32);

    let primary_layout = engine.layout_plain(
        content.primary,
        primary_font,
        style.primary_font_px,
        brush,
        max_w,
    )?;
    let (pw, ph) = measure(&primary_layout);

    let secondary = match content.secondary.filter(|s| !s.trim().is_empty()) {
        Some(text) => {
            let l = engine.layout_plain(
                text,
                secondary_font,
                style.secondary_font_px,
                brush,
                max_w,
            )?;
            let dims = measure(&l);
            Some((l, dims))
        }
        None => None,
    };

    let lift = secondary.as_ref().map_or(0, |(_, (_, sh))| (*sh / 2) as i32);
    let px = centered(plate.x, plate.width, pw);
    let py = centered(plate.y, plate.height, ph) - style.text_vertical_bias - lift;
    let offsets = shadow_offsets(style.text_shadow_offset);

    tracing::debug!(pw, ph, px, py, "primary text block");

    let primary = TextBlock {
        role: TextRole::Primary,
        rect: Rect::new(px, py, pw, ph),
        shadow_offsets: offsets,
        layout: primary_layout,
        font: primary_font.clone(),
    };

    let secondary = secondary.map(|(l, (sw, sh))| {
        let sx = centered(plate.x, plate.width, sw);
        let sy = py + ph as i32 + style.text_line_gap;
        tracing::debug!(sw, sh, sx, sy, "secondary text block");
        TextBlock {
            role: TextRole::Secondary,
            rect: Rect::new(sx, sy, sw, sh),
            shadow_offsets: offsets,
            layout: l,
            font: secondary_font.clone(),
        }
    });

    Ok(TextLayout { primary, secondary })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;

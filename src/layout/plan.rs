use serde::Serialize;

use crate::foundation::core::{Rect, Size};
use crate::foundation::error::PostResult;
use crate::layout::fit::FitPlan;
use crate::layout::logo::LogoLayers;
use crate::layout::text::{TextBlock, TextLayout, TextRole};
use crate::render::overlay::OverlayLayers;

/// Placement of one text block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextPlan {
    pub role: TextRole,
    /// Measured text box on the canvas.
    pub rect: Rect,
    /// Top-left corners of the four shadow copies.
    pub shadow_origins: [(i32, i32); 4],
    /// Laid out line count after wrapping.
    pub lines: usize,
}

impl From<&TextBlock> for TextPlan {
    fn from(b: &TextBlock) -> Self {
        Self {
            role: b.role,
            rect: b.rect,
            shadow_origins: b.shadow_origins(),
            lines: b.line_count(),
        }
    }
}

/// Every rectangle computed for one render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    /// Output size.
    pub canvas: Size,
    /// How the background was scaled and offset.
    pub background: FitPlan,
    /// Secondary-color band along the bottom.
    pub band: Rect,
    /// Primary-color plate the text is centered in.
    pub plate: Rect,
    /// Logo bounds; `None` when no logo was drawn.
    pub logo: Option<Rect>,
    /// Shadow silhouette before blurring.
    pub logo_shadow: Option<Rect>,
    pub primary: TextPlan,
    /// Present only for a non-blank occasion line.
    pub secondary: Option<TextPlan>,
}

impl LayoutPlan {
    pub(crate) fn collect(
        canvas: Size,
        background: FitPlan,
        overlays: &OverlayLayers,
        logo: Option<&LogoLayers>,
        text: &TextLayout,
    ) -> Self {
        Self {
            canvas,
            background,
            band: overlays.band_rect,
            plate: overlays.plate_rect,
            logo: logo.map(|l| l.logo_rect),
            logo_shadow: logo.map(|l| l.shadow_rect),
            primary: TextPlan::from(&text.primary),
            secondary: text.secondary.as_ref().map(TextPlan::from),
        }
    }

    /// Pretty JSON for inspection and `--dump-layout`.
    pub fn to_json(&self) -> PostResult<String> {
        Ok(serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?)
    }
}

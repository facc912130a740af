//! Brandpost composes finished social-media post images.
//!
//! A render takes a background image, a brand identity (logo, colors, fonts) and one or two
//! lines of text, and produces a fixed-size JPEG:
//!
//! - the background is fitted to a preset canvas without distortion
//! - a curved band and a rounded text plate are drawn in the brand colors
//! - the logo is placed top-left over a soft drop shadow
//! - text is centered on the plate with diagonal shadows for legibility
//!
//! Cosmetic inputs that fail to load (fonts, colors, logo) fall back to defaults and are
//! reported as [`Notice`]s; required inputs (background, preset) fail the render with a
//! [`PostError`].
#![forbid(unsafe_code)]

mod assets;
mod foundation;

/// Target presets and design constants.
pub mod config;
pub(crate) mod encode;
/// JSON job files.
pub mod job;
pub(crate) mod layout;
/// End-to-end render entry points.
pub mod pipeline;
pub(crate) mod render;

pub use crate::foundation::core::{Canvas, Layer, RasterAsset, Rect, Rgba8, Size};
pub use crate::foundation::error::{
    AssetRole, Notice, NoticeKind, PostError, PostResult, Recovered,
};

pub use crate::assets::color::{
    DEFAULT_PRIMARY, DEFAULT_SECONDARY, parse_hex, resolve_color, to_hex,
};
pub use crate::assets::decode::{LogoSource, decode_image, decode_logo};
pub use crate::assets::font::{DEFAULT_FONT_BYTES, FontHandle, resolve_font};
pub use crate::assets::svg::rasterize_svg;
pub use crate::config::{DesignStyle, PresetEntry, PresetTable, TargetGeometry};
pub use crate::encode::jpeg::{
    DEFAULT_QUALITY, MATTE_WHITE, encode as encode_jpeg, flatten_on,
};
pub use crate::job::{LoadedJob, PostJob};
pub use crate::layout::fit::{FitPlan, fit, fit_plan};
pub use crate::layout::logo::{LogoLayers, logo_size, place as place_logo};
pub use crate::layout::plan::{LayoutPlan, TextPlan};
pub use crate::layout::text::{
    TextBlock, TextBrushRgba8, TextContent, TextLayout, TextLayoutEngine, TextRole,
    layout as layout_text, measure as measure_text,
};
pub use crate::pipeline::{
    BrandAssets, BrandInput, PostContent, RenderOutput, RenderRequest, render_post,
    render_presets,
};
pub use crate::render::blur::gaussian_blur;
pub use crate::render::compositor::{LayerKind, render as render_canvas, stack as layer_stack};
pub use crate::render::overlay::{OverlayLayers, compose as compose_overlays, overlay_rects};
pub use crate::render::text::{TEXT_BLEED, TextLayers, rasterize as rasterize_text};

use rayon::prelude::*;

use crate::assets::color::{DEFAULT_PRIMARY, DEFAULT_SECONDARY, resolve_color};
use crate::assets::decode::{LogoSource, decode_image, decode_logo};
use crate::assets::font::{FontHandle, resolve_font};
use crate::config::{DesignStyle, TargetGeometry};
use crate::encode::jpeg;
use crate::foundation::core::{Canvas, RasterAsset, Rgba8};
use crate::foundation::error::{AssetRole, Notice, NoticeKind, PostError, PostResult};
use crate::layout::fit::{fit, fit_plan};
use crate::layout::logo;
use crate::layout::plan::LayoutPlan;
use crate::layout::text::{self, TextContent, TextLayoutEngine};
use crate::render::{compositor, overlay};

/// Raw brand inputs as handed over by a caller.
#[derive(Clone, Debug, Default)]
pub struct BrandInput {
    /// Encoded logo (PNG or other raster, or SVG).
    pub logo: Option<Vec<u8>>,
    /// Hex color for the text plate.
    pub primary_color: String,
    /// Hex color for the band.
    pub secondary_color: String,
    /// TrueType/OpenType bytes for the description.
    pub primary_font: Option<Vec<u8>>,
    /// Font for the occasion line; falls back to `primary_font` when absent.
    pub secondary_font: Option<Vec<u8>>,
}

/// Brand identity with every optional input resolved to a usable value.
#[derive(Clone, Debug)]
pub struct BrandAssets {
    /// Decoded logo; `None` when missing or undecodable.
    pub logo: Option<LogoSource>,
    /// Plate color.
    pub primary: Rgba8,
    /// Band color.
    pub secondary: Rgba8,
    pub primary_font: FontHandle,
    pub secondary_font: FontHandle,
}

impl BrandAssets {
    /// Resolve brand inputs, recording a notice for every substituted default.
    ///
    /// A missing secondary font reuses the primary one.
    pub fn resolve(input: &BrandInput, notices: &mut Vec<Notice>) -> PostResult<Self> {
        let primary = resolve_color("primary", &input.primary_color, DEFAULT_PRIMARY).take(notices);
        let secondary =
            resolve_color("secondary", &input.secondary_color, DEFAULT_SECONDARY).take(notices);

        let primary_font = resolve_font("primary", input.primary_font.clone())?.take(notices);
        let secondary_font = match &input.secondary_font {
            Some(bytes) => resolve_font("secondary", Some(bytes.clone()))?.take(notices),
            None => primary_font.clone(),
        };

        let logo = match input.logo.as_deref() {
            None => None,
            Some(bytes) => match decode_logo(bytes) {
                Ok(l) => Some(l),
                Err(e) => {
                    notices.push(Notice::emit(
                        NoticeKind::LogoSkipped,
                        format!("{e}; rendering without logo"),
                    ));
                    None
                }
            },
        };

        Ok(Self {
            logo,
            primary,
            secondary,
            primary_font,
            secondary_font,
        })
    }
}

/// Text shown on the post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostContent {
    /// Main description; may be empty.
    pub primary: String,
    /// Occasion line under the description.
    pub secondary: Option<String>,
}

/// Everything needed for one render.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    /// Encoded background. `None` renders over a placeholder in the primary color.
    pub background: Option<Vec<u8>>,
    pub brand: BrandInput,
    pub content: PostContent,
    /// Output canvas size.
    pub geometry: TargetGeometry,
    /// Layout constants; defaults reproduce the stock design.
    pub style: DesignStyle,
    /// JPEG quality, 1 to 100.
    pub quality: u8,
}

impl RenderRequest {
    /// A request with default style and quality.
    pub fn new(
        background: Option<Vec<u8>>,
        brand: BrandInput,
        content: PostContent,
        geometry: TargetGeometry,
    ) -> Self {
        Self {
            background,
            brand,
            content,
            geometry,
            style: DesignStyle::default(),
            quality: jpeg::DEFAULT_QUALITY,
        }
    }
}

/// Result of a successful render.
#[derive(Debug)]
pub struct RenderOutput {
    /// Encoded JPEG.
    pub bytes: Vec<u8>,
    /// Composited canvas before flattening.
    pub canvas: Canvas,
    /// Every rect computed for this render.
    pub plan: LayoutPlan,
    /// Non-fatal fallbacks taken along the way.
    pub notices: Vec<Notice>,
    /// xxh3 of the canvas.
    pub fingerprint: u64,
}

/// Decoded inputs shared by every geometry rendered from one request.
struct PreparedPost {
    background: Option<RasterAsset>,
    brand: BrandAssets,
    notices: Vec<Notice>,
}

impl PreparedPost {
    fn prepare(req: &RenderRequest) -> PostResult<Self> {
        req.style.validate()?;
        if !(1..=100).contains(&req.quality) {
            return Err(PostError::validation(format!(
                "jpeg quality must be in 1..=100, got {}",
                req.quality
            )));
        }

        let background = req
            .background
            .as_deref()
            .map(|b| decode_image(b, AssetRole::Background))
            .transpose()?;

        let mut notices = Vec::new();
        let brand = BrandAssets::resolve(&req.brand, &mut notices)?;
        Ok(Self {
            background,
            brand,
            notices,
        })
    }

    fn render(
        &self,
        engine: &mut TextLayoutEngine,
        req: &RenderRequest,
        geometry: TargetGeometry,
    ) -> PostResult<RenderOutput> {
        let size = geometry.size();
        let style = &req.style;
        let mut notices = self.notices.clone();

        let background = match &self.background {
            Some(bg) => bg.clone(),
            None => {
                notices.push(Notice::emit(
                    NoticeKind::BackgroundPlaceholder,
                    "no background image; using a solid primary color placeholder",
                ));
                RasterAsset::solid(size.width, size.height, self.brand.primary)?
            }
        };
        let fit_info = fit_plan(background.size(), size)?;
        let background = fit(background, geometry)?;

        let overlays = overlay::compose(size, self.brand.primary, self.brand.secondary, style)?;
        let logo = self
            .brand
            .logo
            .clone()
            .and_then(|l| match logo::place(l, size, style) {
                Ok(placed) => Some(placed),
                Err(e) => {
                    notices.push(Notice::emit(
                        NoticeKind::LogoSkipped,
                        format!("{e}; rendering without logo"),
                    ));
                    None
                }
            });

        let text = text::layout(
            engine,
            overlays.plate_rect,
            TextContent {
                primary: &req.content.primary,
                secondary: req.content.secondary.as_deref(),
            },
            &self.brand.primary_font,
            &self.brand.secondary_font,
            style,
        )?;
        let text_layers = crate::render::text::rasterize(&text, size, style)?;

        let plan = LayoutPlan::collect(size, fit_info, &overlays, logo.as_ref(), &text);
        let canvas = compositor::render(background, &overlays, logo.as_ref(), &text_layers)?;
        let bytes = jpeg::encode(&canvas, req.quality)?;
        let fingerprint = canvas.fingerprint();

        tracing::info!(
            width = size.width,
            height = size.height,
            bytes = bytes.len(),
            notices = notices.len(),
            fingerprint,
            "rendered post"
        );

        Ok(RenderOutput {
            bytes,
            canvas,
            plan,
            notices,
            fingerprint,
        })
    }
}

/// Render one post at the request's geometry.
#[tracing::instrument(skip_all, fields(w = req.geometry.width(), h = req.geometry.height()))]
pub fn render_post(req: &RenderRequest) -> PostResult<RenderOutput> {
    let prepared = PreparedPost::prepare(req)?;
    let mut engine = TextLayoutEngine::new();
    prepared.render(&mut engine, req, req.geometry)
}

/// Render the same request at several geometries in parallel.
///
/// Inputs are decoded once; each worker owns its own text engine. Per-geometry failures are
/// reported in place so one bad geometry does not hide the others.
#[tracing::instrument(skip_all, fields(targets = targets.len()))]
pub fn render_presets(
    req: &RenderRequest,
    targets: &[TargetGeometry],
    threads: Option<usize>,
) -> PostResult<Vec<(TargetGeometry, PostResult<RenderOutput>)>> {
    let prepared = PreparedPost::prepare(req)?;
    let pool = build_thread_pool(threads)?;

    let rendered = pool.install(|| {
        targets
            .par_iter()
            .map_init(TextLayoutEngine::new, |engine, target| {
                (*target, prepared.render(engine, req, *target))
            })
            .collect::<Vec<_>>()
    });
    Ok(rendered)
}

fn build_thread_pool(threads: Option<usize>) -> PostResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PostError::validation("threads must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PostError::validation(format!("failed to build rayon thread pool: {e}")))
}

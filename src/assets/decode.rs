use std::sync::Arc;

use crate::foundation::core::RasterAsset;
use crate::foundation::error::{AssetRole, PostError, PostResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// A brand logo: either decoded pixels or a vector tree rasterized at placement size.
#[derive(Clone, Debug)]
pub enum LogoSource {
    /// Decoded raster logo.
    Raster(RasterAsset),
    /// Parsed SVG logo.
    Vector(Arc<usvg::Tree>),
}

impl LogoSource {
    /// Intrinsic `(width, height)` used to derive the logo aspect ratio.
    pub fn intrinsic_size(&self) -> (f64, f64) {
        match self {
            Self::Raster(r) => (f64::from(r.width()), f64::from(r.height())),
            Self::Vector(t) => (
                f64::from(t.size().width()),
                f64::from(t.size().height()),
            ),
        }
    }
}

/// Decode encoded image bytes to premultiplied RGBA8, adding opaque alpha where missing.
pub fn decode_image(bytes: &[u8], role: AssetRole) -> PostResult<RasterAsset> {
    if bytes.is_empty() {
        return Err(PostError::decode(role, "no image bytes"));
    }
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| PostError::decode(role, e.to_string()))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    RasterAsset::from_premul(width, height, rgba8_premul)
        .map_err(|e| PostError::decode(role, e.to_string()))
}

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8], role: AssetRole) -> PostResult<Arc<usvg::Tree>> {
    let opts = usvg::Options::default();
    let tree =
        usvg::Tree::from_data(bytes, &opts).map_err(|e| PostError::decode(role, e.to_string()))?;
    let size = tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(PostError::decode(role, "svg has an empty viewport"));
    }
    Ok(Arc::new(tree))
}

/// Decode logo bytes, accepting SVG markup as well as any raster format.
pub fn decode_logo(bytes: &[u8]) -> PostResult<LogoSource> {
    if looks_like_svg(bytes) {
        return parse_svg(bytes, AssetRole::Logo).map(LogoSource::Vector);
    }
    decode_image(bytes, AssetRole::Logo).map(LogoSource::Raster)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

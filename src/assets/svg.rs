use crate::foundation::core::RasterAsset;
use crate::foundation::error::{PostError, PostResult};

/// Rasterize an SVG tree into exactly `width x height` premultiplied pixels.
///
/// The tree is scaled non-uniformly to the box; callers pass a box with the tree's aspect.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> PostResult<RasterAsset> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PostError::validation("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    RasterAsset::from_premul(width, height, pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg.rs"]
mod tests;

pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod overlay;
pub(crate) mod text;

use crate::foundation::core::RasterAsset;
use crate::foundation::error::{PostError, PostResult};

/// A CPU render context sized for a `width x height` raster.
pub(crate) fn cpu_context(width: u32, height: u32) -> PostResult<vello_cpu::RenderContext> {
    let (w, h) = pixmap_dims(width, height)?;
    Ok(vello_cpu::RenderContext::new(w, h))
}

/// Flush `ctx` into a fresh pixmap and take its premultiplied bytes.
pub(crate) fn finish_raster(
    ctx: &mut vello_cpu::RenderContext,
    width: u32,
    height: u32,
) -> PostResult<RasterAsset> {
    let (w, h) = pixmap_dims(width, height)?;
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    RasterAsset::from_premul(width, height, pixmap.data_as_u8_slice().to_vec())
}

fn pixmap_dims(width: u32, height: u32) -> PostResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(PostError::geometry("raster dimensions must be non-zero"));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| PostError::geometry("raster width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PostError::geometry("raster height exceeds u16"))?;
    Ok((w, h))
}

pub(crate) fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn paint(c: crate::foundation::core::Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

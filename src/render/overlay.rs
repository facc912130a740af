use crate::config::DesignStyle;
use crate::foundation::core::{Layer, Rect, Rgba8, Size};
use crate::foundation::error::{PostError, PostResult};
use crate::render::{bezpath_to_cpu, cpu_context, finish_raster, paint};

/// Decorative shapes behind the text, plus the region text is centered in.
#[derive(Clone, Debug)]
pub struct OverlayLayers {
    /// Curved band along the bottom edge, in the secondary color.
    pub band: Layer,
    /// Rounded plate inside the band, in the primary color.
    pub plate: Layer,
    /// Band bounds on the canvas.
    pub band_rect: Rect,
    /// Plate bounds; text is centered inside it.
    pub plate_rect: Rect,
}

/// Band and plate rectangles for a canvas, without rasterizing.
pub fn overlay_rects(canvas: Size, style: &DesignStyle) -> PostResult<(Rect, Rect)> {
    let band_h = (f64::from(canvas.height) * style.band_height_ratio)
        .round()
        .max(1.0) as u32;
    let band_h = band_h.min(canvas.height);
    let band_y = (canvas.height - band_h) as i32;
    let band = Rect::new(0, band_y, canvas.width, band_h);

    let margin = style.plate_margin_x;
    if canvas.width <= margin.saturating_mul(2) {
        return Err(PostError::geometry(format!(
            "canvas width {} leaves no room for a text plate with {margin}px margins",
            canvas.width
        )));
    }
    let plate_w = canvas.width - 2 * margin;
    let plate_h = style.plate_height;
    let plate_y = band_y + (i64::from(band_h) - i64::from(plate_h)).div_euclid(2) as i32;
    let plate = Rect::new(margin as i32, plate_y, plate_w, plate_h);

    Ok((band, plate))
}

/// Build the band and text plate layers for a canvas.
pub fn compose(
    canvas: Size,
    primary: Rgba8,
    secondary: Rgba8,
    style: &DesignStyle,
) -> PostResult<OverlayLayers> {
    let (band_rect, plate_rect) = overlay_rects(canvas, style)?;
    tracing::debug!(?band_rect, ?plate_rect, "overlay geometry");

    let band = band_layer(band_rect, secondary)?;
    let plate = plate_layer(plate_rect, primary, style.plate_corner_radius)?;
    Ok(OverlayLayers {
        band,
        plate,
        band_rect,
        plate_rect,
    })
}

// Lower half rectangle plus two circles of radius h centered on the bottom corners,
// all clipped to the band's own raster.
fn band_layer(rect: Rect, color: Rgba8) -> PostResult<Layer> {
    let w = f64::from(rect.width);
    let h = f64::from(rect.height);

    let shapes = [
        path_of(&kurbo::Rect::new(0.0, h / 2.0, w, h)),
        path_of(&kurbo::Circle::new((0.0, h), h)),
        path_of(&kurbo::Circle::new((w, h), h)),
    ];

    let mut ctx = cpu_context(rect.width, rect.height)?;
    ctx.set_paint(paint(color));
    for p in &shapes {
        ctx.fill_path(&bezpath_to_cpu(p));
    }
    let image = finish_raster(&mut ctx, rect.width, rect.height)?;
    Ok(Layer::new(image, rect.x, rect.y))
}

fn plate_layer(rect: Rect, color: Rgba8, radius: f64) -> PostResult<Layer> {
    let w = f64::from(rect.width);
    let h = f64::from(rect.height);
    let r = radius.min(w / 2.0).min(h / 2.0);
    let shape = kurbo::RoundedRect::new(0.0, 0.0, w, h, r);

    let mut ctx = cpu_context(rect.width, rect.height)?;
    ctx.set_paint(paint(color));
    ctx.fill_path(&bezpath_to_cpu(&path_of(&shape)));
    let image = finish_raster(&mut ctx, rect.width, rect.height)?;
    Ok(Layer::new(image, rect.x, rect.y))
}

fn path_of(shape: &impl kurbo::Shape) -> kurbo::BezPath {
    let mut p = kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        p.push(el);
    }
    p
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;

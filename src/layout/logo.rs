use crate::assets::decode::LogoSource;
use crate::assets::svg::rasterize_svg;
use crate::config::DesignStyle;
use crate::foundation::core::{Layer, RasterAsset, Rect, Rgba8, Size};
use crate::foundation::error::{PostError, PostResult};
use crate::layout::fit::resample;
use crate::render::blur::{gaussian_blur, radius_for_sigma};

/// The logo and its blurred drop shadow, ready for compositing.
#[derive(Clone, Debug)]
pub struct LogoLayers {
    /// Blurred shadow, including its blur margin.
    pub shadow: Layer,
    /// The scaled logo anchored at the inset.
    pub logo: Layer,
    /// Where the logo lands on the canvas.
    pub logo_rect: Rect,
    /// The shadow silhouette before blurring.
    pub shadow_rect: Rect,
}

/// Logo size on a canvas: height is a fixed share of the canvas height and the width keeps
/// the logo's aspect ratio.
///
/// The width never runs past the right edge of the canvas; an overly wide logo is shrunk
/// to that width with its height reduced to match.
pub fn logo_size(intrinsic: (f64, f64), canvas: Size, style: &DesignStyle) -> PostResult<Size> {
    let (iw, ih) = intrinsic;
    if !(iw.is_finite() && ih.is_finite() && iw > 0.0 && ih > 0.0) {
        return Err(PostError::validation("logo has no usable intrinsic size"));
    }

    let room = i64::from(canvas.width) - i64::from(style.logo_inset.0.max(0));
    if room < 1 {
        return Err(PostError::geometry(format!(
            "logo inset {} leaves no room on a {}px wide canvas",
            style.logo_inset.0, canvas.width
        )));
    }
    let max_w = room as f64;

    let h = (f64::from(canvas.height) * style.logo_height_ratio).round().max(1.0);
    let w = (h * iw / ih).round().max(1.0);
    if w <= max_w {
        return Ok(Size::new(w as u32, h as u32));
    }

    let h = (max_w * ih / iw).round().clamp(1.0, h);
    Ok(Size::new(max_w as u32, h as u32))
}

/// Scale the logo, build its shadow and anchor both at the configured inset.
pub fn place(logo: LogoSource, canvas: Size, style: &DesignStyle) -> PostResult<LogoLayers> {
    let size = logo_size(logo.intrinsic_size(), canvas, style)?;
    let image = match logo {
        LogoSource::Raster(r) => resample(r, size)?,
        LogoSource::Vector(tree) => rasterize_svg(&tree, size.width, size.height)?,
    };

    let (ax, ay) = style.logo_inset;
    let (ox, oy) = style.logo_shadow_offset;
    let logo_rect = Rect::new(ax, ay, size.width, size.height);
    let shadow_rect = logo_rect.translate(ox, oy);

    let shadow = shadow_layer(shadow_rect, style)?;
    tracing::debug!(
        w = size.width,
        h = size.height,
        shadow_x = shadow.origin.0,
        shadow_y = shadow.origin.1,
        "logo placed"
    );

    Ok(LogoLayers {
        shadow,
        logo: Layer::new(image, ax, ay),
        logo_rect,
        shadow_rect,
    })
}

// The silhouette is padded by the blur radius so the soft edge is not clipped.
fn shadow_layer(rect: Rect, style: &DesignStyle) -> PostResult<Layer> {
    let pad = radius_for_sigma(style.logo_shadow_sigma);
    let w = rect.width + 2 * pad;
    let h = rect.height + 2 * pad;

    let fill = Rgba8::BLACK.with_alpha(style.logo_shadow_alpha).to_premul();
    let mut px = RasterAsset::transparent(w, h)?.into_data();
    for y in pad..pad + rect.height {
        let row = (y * w) as usize * 4;
        for x in pad..pad + rect.width {
            let i = row + x as usize * 4;
            px[i..i + 4].copy_from_slice(&fill);
        }
    }

    let silhouette = RasterAsset::from_premul(w, h, px)?;
    let blurred = gaussian_blur(&silhouette, style.logo_shadow_sigma)?;
    Ok(Layer::new(
        blurred,
        rect.x - pad as i32,
        rect.y - pad as i32,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/logo.rs"]
mod tests;

use crate::foundation::core::Canvas;
use crate::foundation::error::{PostError, PostResult};
use crate::render::composite::flatten_to_rgb8;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 75;

/// Matte used for any transparency left on the canvas.
pub const MATTE_WHITE: [u8; 3] = [255, 255, 255];

/// Opaque RGB8 pixels of `canvas` composited over `matte`.
pub fn flatten_on(canvas: &Canvas, matte: [u8; 3]) -> Vec<u8> {
    flatten_to_rgb8(canvas.data(), matte)
}

/// Flatten against white and encode as baseline JPEG.
pub fn encode(canvas: &Canvas, quality: u8) -> PostResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(PostError::validation(format!(
            "jpeg quality must be in 1..=100, got {quality}"
        )));
    }

    let rgb = flatten_on(canvas, MATTE_WHITE);
    let mut buf = Vec::new();
    let mut enc = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
    enc.encode(
        &rgb,
        canvas.width(),
        canvas.height(),
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|e| PostError::encode(e.to_string()))?;

    tracing::debug!(bytes = buf.len(), quality, "encoded jpeg");
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;

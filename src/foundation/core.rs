use crate::foundation::error::{PostError, PostResult};

/// Canvas or asset dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a size value.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Integer placement region on the canvas.
///
/// `x`/`y` are signed so that centered content wider than its container, and blur bleed
/// around elements near the edge, can be described without clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a rect from origin and size.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Twice the horizontal center; exact in integers.
    pub fn center_x2(self) -> i64 {
        2 * i64::from(self.x) + i64::from(self.width)
    }

    /// Overlap of two rects, `None` when they do not share a pixel.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(
            x0 as i32,
            y0 as i32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        ))
    }

    /// The same rect moved by `(dx, dy)`.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serializes as a `#rrggbbaa` hex string; see `assets::color` for accepted input forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Construct from channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Premultiplied `[r, g, b, a]`.
    pub fn to_premul(self) -> [u8; 4] {
        let mut px = [self.r, self.g, self.b, self.a];
        crate::foundation::math::premultiply_rgba8_in_place(&mut px);
        px
    }
}

/// Decoded image: premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterAsset {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
}

impl std::fmt::Debug for RasterAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterAsset")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba8_premul.len())
            .finish()
    }
}

impl RasterAsset {
    /// Wrap premultiplied bytes, checking that the length matches `width*height*4`.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> PostResult<Self> {
        if width == 0 || height == 0 {
            return Err(PostError::validation("raster dimensions must be > 0"));
        }
        let expected = byte_len(width, height)?;
        if rgba8_premul.len() != expected {
            return Err(PostError::validation(format!(
                "raster buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul,
        })
    }

    /// Fully transparent raster.
    pub fn transparent(width: u32, height: u32) -> PostResult<Self> {
        Self::from_premul(width, height, vec![0; byte_len(width, height)?])
    }

    /// Raster filled with a single color; used as a placeholder background.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> PostResult<Self> {
        let px = color.to_premul();
        let n = (width as usize) * (height as usize);
        Self::from_premul(width, height, px.repeat(n))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Premultiplied pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`; panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.rgba8_premul[i],
            self.rgba8_premul[i + 1],
            self.rgba8_premul[i + 2],
            self.rgba8_premul[i + 3],
        ]
    }

    /// Take the pixel buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.rgba8_premul
    }

    /// View as an `image` buffer for resampling. Channels stay premultiplied.
    pub(crate) fn into_image(self) -> image::RgbaImage {
        let (w, h) = (self.width, self.height);
        image::RgbaImage::from_raw(w, h, self.rgba8_premul)
            .unwrap_or_else(|| image::RgbaImage::new(w, h))
    }

    /// Inverse of [`RasterAsset::into_image`].
    pub(crate) fn from_image(img: image::RgbaImage) -> PostResult<Self> {
        let (w, h) = img.dimensions();
        Self::from_premul(w, h, img.into_raw())
    }
}

/// A raster positioned on the canvas; the unit every layout step hands to the compositor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    /// Layer pixels.
    pub image: RasterAsset,
    /// Canvas position of the image's top-left pixel.
    pub origin: (i32, i32),
}

impl Layer {
    /// Create a layer.
    pub fn new(image: RasterAsset, x: i32, y: i32) -> Self {
        Self {
            image,
            origin: (x, y),
        }
    }

    /// Canvas region covered by this layer.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.origin.0,
            self.origin.1,
            self.image.width(),
            self.image.height(),
        )
    }
}

/// Output canvas: fixed dimensions, premultiplied RGBA8.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Canvas {
    /// Create a transparent canvas.
    pub fn new(size: Size) -> PostResult<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(PostError::geometry("canvas dimensions must be > 0"));
        }
        Ok(Self {
            width: size.width,
            height: size.height,
            pixels: vec![0; byte_len(size.width, size.height)?],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Premultiplied pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Premultiplied pixel at `(x, y)`; panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Alpha-over `layer` onto the canvas, clipping whatever falls outside.
    pub fn composite(&mut self, layer: &Layer) {
        crate::render::composite::over_at(
            &mut self.pixels,
            self.width,
            self.height,
            &layer.image,
            layer.origin,
        );
    }

    /// Stable 64-bit content hash of dimensions and pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut h = xxhash_rust::xxh3::Xxh3::new();
        h.update(&self.width.to_le_bytes());
        h.update(&self.height.to_le_bytes());
        h.update(&self.pixels);
        h.digest()
    }
}

fn byte_len(width: u32, height: u32) -> PostResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PostError::validation("raster buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

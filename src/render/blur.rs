use crate::foundation::core::RasterAsset;
use crate::foundation::error::{PostError, PostResult};

/// Kernel radius that covers a gaussian of `sigma` to three standard deviations.
pub fn radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Separable gaussian blur of a premultiplied raster with clamp-to-edge sampling.
pub fn gaussian_blur(src: &RasterAsset, sigma: f32) -> PostResult<RasterAsset> {
    let radius = radius_for_sigma(sigma);
    if radius == 0 {
        return Ok(src.clone());
    }

    let kernel = Kernel::gaussian(sigma, radius)?;
    let rows = kernel.pass(src, Axis::Horizontal)?;
    kernel.pass(&rows, Axis::Vertical)
}

const ONE_Q16: i64 = 1 << 16;

#[derive(Clone, Copy, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Normalized gaussian taps in Q16; they always sum to exactly `1 << 16`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Kernel {
    taps: Vec<u32>,
}

impl Kernel {
    fn gaussian(sigma: f32, radius: u32) -> PostResult<Self> {
        let two_s2 = 2.0 * f64::from(sigma) * f64::from(sigma);
        let r = i64::from(radius);
        let raw: Vec<f64> = (-r..=r)
            .map(|i| (-((i * i) as f64) / two_s2).exp())
            .collect();
        let total: f64 = raw.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(PostError::validation(format!(
                "blur sigma {sigma} yields an empty kernel"
            )));
        }

        let mut taps: Vec<u32> = raw
            .iter()
            .map(|w| ((w / total) * ONE_Q16 as f64).round().clamp(0.0, ONE_Q16 as f64) as u32)
            .collect();
        let sum: i64 = taps.iter().map(|&t| i64::from(t)).sum();
        let mid = taps.len() / 2;
        taps[mid] = (i64::from(taps[mid]) + ONE_Q16 - sum).clamp(0, ONE_Q16) as u32;
        Ok(Self { taps })
    }

    fn radius(&self) -> i64 {
        (self.taps.len() / 2) as i64
    }

    /// Convolve every row (or column) of `src` with the taps.
    fn pass(&self, src: &RasterAsset, axis: Axis) -> PostResult<RasterAsset> {
        let (w, h) = (src.width() as usize, src.height() as usize);
        let (len, lines) = match axis {
            Axis::Horizontal => (w, h),
            Axis::Vertical => (h, w),
        };
        let offset = |line: usize, pos: usize| match axis {
            Axis::Horizontal => (line * w + pos) * 4,
            Axis::Vertical => (pos * w + line) * 4,
        };

        let data = src.data();
        let last = len as i64 - 1;
        let mut out = vec![0u8; data.len()];
        for line in 0..lines {
            for pos in 0..len {
                let mut acc = [0u32; 4];
                for (k, &tap) in self.taps.iter().enumerate() {
                    let p = (pos as i64 + k as i64 - self.radius()).clamp(0, last) as usize;
                    let o = offset(line, p);
                    for (a, &c) in acc.iter_mut().zip(&data[o..o + 4]) {
                        *a += tap * u32::from(c);
                    }
                }
                let o = offset(line, pos);
                for (d, a) in out[o..o + 4].iter_mut().zip(acc) {
                    *d = ((a + (1 << 15)) >> 16).min(255) as u8;
                }
            }
        }
        RasterAsset::from_premul(src.width(), src.height(), out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;

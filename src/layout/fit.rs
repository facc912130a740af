use image::imageops::FilterType;

use crate::config::TargetGeometry;
use crate::foundation::core::{RasterAsset, Size};
use crate::foundation::error::{PostError, PostResult};
use crate::foundation::math::div_round_u64;
use crate::render::composite::over_at;

/// Geometry of an aspect-preserving fit: the uniformly scaled size and where its top-left
/// lands inside the target. A positive offset is padding, a negative one is a center crop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FitPlan {
    /// Size after uniform scaling.
    pub scaled: Size,
    /// Position of the scaled image inside the target.
    pub offset: (i32, i32),
}

impl FitPlan {
    /// `(top, bottom)` transparent rows added, zero when cropping.
    pub fn vertical_padding(&self, target: Size) -> (u32, u32) {
        if self.scaled.height >= target.height {
            return (0, 0);
        }
        let top = self.offset.1 as u32;
        (top, target.height - self.scaled.height - top)
    }

    /// `(left, right)` transparent columns added, zero when cropping.
    pub fn horizontal_padding(&self, target: Size) -> (u32, u32) {
        if self.scaled.width >= target.width {
            return (0, 0);
        }
        let left = self.offset.0 as u32;
        (left, target.width - self.scaled.width - left)
    }
}

/// Compute the fit of `src` into `target` without touching pixels.
pub fn fit_plan(src: Size, target: Size) -> PostResult<FitPlan> {
    if src.width == 0 || src.height == 0 || target.width == 0 || target.height == 0 {
        return Err(PostError::validation("fit requires non-empty source and target"));
    }
    let (w, h) = (u64::from(src.width), u64::from(src.height));
    let (tw, th) = (u64::from(target.width), u64::from(target.height));

    // Compare w/h against tw/th exactly.
    let src_cross = w * th;
    let dst_cross = h * tw;

    if src_cross == dst_cross {
        return Ok(FitPlan {
            scaled: target,
            offset: (0, 0),
        });
    }

    if src_cross > dst_cross {
        let nh = div_round_u64(tw * h, w).max(1);
        let dy = centered_offset(th, nh);
        Ok(FitPlan {
            scaled: Size::new(target.width, to_u32(nh)?),
            offset: (0, dy),
        })
    } else {
        let nw = div_round_u64(th * w, h).max(1);
        let dx = centered_offset(tw, nw);
        Ok(FitPlan {
            scaled: Size::new(to_u32(nw)?, target.height),
            offset: (dx, 0),
        })
    }
}

// Padding puts floor(deficit/2) on the leading side; cropping drops floor(excess/2) from it.
fn centered_offset(target: u64, scaled: u64) -> i32 {
    if scaled <= target {
        ((target - scaled) / 2) as i32
    } else {
        -(((scaled - target) / 2) as i32)
    }
}

fn to_u32(v: u64) -> PostResult<u32> {
    u32::try_from(v).map_err(|_| PostError::validation("scaled size exceeds u32"))
}

/// Resize, crop and pad `source` so it exactly covers `target` without distortion.
pub fn fit(source: RasterAsset, target: TargetGeometry) -> PostResult<RasterAsset> {
    fit_to(source, target.size())
}

pub(crate) fn fit_to(source: RasterAsset, target: Size) -> PostResult<RasterAsset> {
    let plan = fit_plan(source.size(), target)?;
    tracing::debug!(
        src_w = source.width(),
        src_h = source.height(),
        scaled_w = plan.scaled.width,
        scaled_h = plan.scaled.height,
        off_x = plan.offset.0,
        off_y = plan.offset.1,
        "aspect fit"
    );

    let scaled = resample(source, plan.scaled)?;
    if plan.scaled == target {
        return Ok(scaled);
    }

    let mut out = RasterAsset::transparent(target.width, target.height)?.into_data();
    over_at(&mut out, target.width, target.height, &scaled, plan.offset);
    RasterAsset::from_premul(target.width, target.height, out)
}

/// High quality resample to `size`; returns the input untouched when sizes already match.
pub(crate) fn resample(source: RasterAsset, size: Size) -> PostResult<RasterAsset> {
    if source.size() == size {
        return Ok(source);
    }
    let img = source.into_image();
    let resized = image::imageops::resize(&img, size.width, size.height, FilterType::Lanczos3);
    RasterAsset::from_image(resized)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;

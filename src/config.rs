//! Target geometry presets and the tunable visual constants of a post.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{PostError, PostResult};

/// Largest supported canvas edge; rasterization surfaces are addressed with `u16`.
pub const MAX_CANVAS_EDGE: u32 = u16::MAX as u32;

/// Resolved target canvas size.
///
/// Only obtainable through a [`PresetTable`], so every render targets a known preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TargetGeometry {
    width: u32,
    height: u32,
}

impl TargetGeometry {
    pub(crate) fn new_unchecked(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canvas width in pixels.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(self) -> u32 {
        self.height
    }

    /// Canvas size.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// One named entry of a [`PresetTable`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetEntry {
    /// Lookup name, e.g. `square`.
    pub name: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl PresetEntry {
    /// `WxH` label, also accepted by [`PresetTable::resolve`].
    pub fn label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Caller-owned table of supported canvas sizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetTable {
    entries: Vec<PresetEntry>,
}

impl Default for PresetTable {
    fn default() -> Self {
        let entry = |name: &str, width, height| PresetEntry {
            name: name.to_string(),
            width,
            height,
        };
        Self {
            entries: vec![
                entry("square", 1080, 1080),
                entry("landscape", 1200, 628),
                entry("story", 1080, 1920),
                entry("portrait", 1080, 1350),
                entry("pin", 1000, 1500),
            ],
        }
    }
}

impl PresetTable {
    /// An empty table; add sizes with [`PresetTable::with_entry`].
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace a named size.
    pub fn with_entry(mut self, name: &str, width: u32, height: u32) -> PostResult<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            return Err(PostError::geometry("preset name must be non-empty"));
        }
        validate_edge(width)?;
        validate_edge(height)?;
        self.entries.retain(|e| !e.name.eq_ignore_ascii_case(&name));
        self.entries.push(PresetEntry {
            name,
            width,
            height,
        });
        Ok(self)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[PresetEntry] {
        &self.entries
    }

    /// Resolve a preset by name (case-insensitive) or by its `WxH` label.
    pub fn resolve(&self, name: &str) -> PostResult<TargetGeometry> {
        let key = name.trim().to_ascii_lowercase();
        let entry = self
            .entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(&key) || e.label() == key)
            .ok_or_else(|| {
                let known: Vec<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
                PostError::geometry(format!(
                    "unknown preset '{name}' (known: {})",
                    known.join(", ")
                ))
            })?;
        validate_edge(entry.width)?;
        validate_edge(entry.height)?;
        Ok(TargetGeometry::new_unchecked(entry.width, entry.height))
    }
}

fn validate_edge(v: u32) -> PostResult<()> {
    if v == 0 || v > MAX_CANVAS_EDGE {
        return Err(PostError::geometry(format!(
            "canvas edge {v} out of range 1..={MAX_CANVAS_EDGE}"
        )));
    }
    Ok(())
}

/// Visual design constants. Defaults reproduce the reference look; every field can be
/// overridden from a job file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignStyle {
    /// Band height as a fraction of canvas height.
    pub band_height_ratio: f64,
    /// Horizontal gap between text plate and canvas edges.
    pub plate_margin_x: u32,
    /// Text plate height.
    pub plate_height: u32,
    /// Text plate corner radius.
    pub plate_corner_radius: f64,

    /// Logo height as a fraction of canvas height.
    pub logo_height_ratio: f64,
    /// Logo top-left inset from the canvas origin.
    pub logo_inset: (i32, i32),
    /// Shadow displacement relative to the logo.
    pub logo_shadow_offset: (i32, i32),
    /// Alpha of the (pre-blur) logo shadow fill.
    pub logo_shadow_alpha: u8,
    /// Gaussian standard deviation of the logo shadow.
    pub logo_shadow_sigma: f32,

    /// Primary text size in pixels.
    pub primary_font_px: f32,
    /// Secondary text size in pixels.
    pub secondary_font_px: f32,
    /// Main text fill.
    pub text_color: Rgba8,
    /// Upward bias applied to the primary block.
    pub text_vertical_bias: i32,
    /// Gap between primary and secondary blocks.
    pub text_line_gap: i32,
    /// Magnitude of the four diagonal text shadow offsets.
    pub text_shadow_offset: i32,
    /// Alpha of the black text shadow copies.
    pub text_shadow_alpha: u8,
    /// Break text into lines no wider than the plate.
    pub wrap_text: bool,
}

impl Default for DesignStyle {
    fn default() -> Self {
        Self {
            band_height_ratio: 0.30,
            plate_margin_x: 50,
            plate_height: 200,
            plate_corner_radius: 50.0,
            logo_height_ratio: 0.15,
            logo_inset: (30, 30),
            logo_shadow_offset: (5, 5),
            logo_shadow_alpha: 100,
            logo_shadow_sigma: 5.0,
            primary_font_px: 40.0,
            secondary_font_px: 30.0,
            text_color: Rgba8::WHITE,
            text_vertical_bias: 20,
            text_line_gap: 20,
            text_shadow_offset: 2,
            text_shadow_alpha: 128,
            wrap_text: true,
        }
    }
}

impl DesignStyle {
    /// Reject values that would make geometry meaningless.
    pub fn validate(&self) -> PostResult<()> {
        fn ratio(name: &str, v: f64) -> PostResult<()> {
            if !v.is_finite() || v <= 0.0 || v > 1.0 {
                return Err(PostError::validation(format!("{name} must be in (0, 1]")));
            }
            Ok(())
        }
        fn positive(name: &str, v: f32) -> PostResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(PostError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
            Ok(())
        }

        ratio("band_height_ratio", self.band_height_ratio)?;
        ratio("logo_height_ratio", self.logo_height_ratio)?;
        positive("primary_font_px", self.primary_font_px)?;
        positive("secondary_font_px", self.secondary_font_px)?;
        if !self.plate_corner_radius.is_finite() || self.plate_corner_radius < 0.0 {
            return Err(PostError::validation(
                "plate_corner_radius must be finite and >= 0",
            ));
        }
        if !self.logo_shadow_sigma.is_finite() || self.logo_shadow_sigma < 0.0 {
            return Err(PostError::validation(
                "logo_shadow_sigma must be finite and >= 0",
            ));
        }
        if self.plate_height == 0 {
            return Err(PostError::validation("plate_height must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::config::{DesignStyle, PresetTable, TargetGeometry};
use crate::encode::jpeg::DEFAULT_QUALITY;
use crate::foundation::error::{Notice, NoticeKind, PostError, PostResult};
use crate::pipeline::{BrandInput, PostContent, RenderRequest};

/// A post described in JSON. Asset paths are relative to the job file's directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostJob {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    #[serde(default)]
    pub primary_font: Option<String>,
    #[serde(default)]
    pub secondary_font: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Replaces the built-in preset table when present.
    #[serde(default)]
    pub presets: Option<PresetTable>,
    #[serde(default)]
    pub style: DesignStyle,
    #[serde(default = "default_quality")]
    pub quality: u8,
}

fn default_primary_color() -> String {
    "#FF0000".to_owned()
}

fn default_secondary_color() -> String {
    "#000000".to_owned()
}

fn default_preset() -> String {
    "square".to_owned()
}

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

/// A job turned into a request, plus notices from files that could not be read.
#[derive(Debug)]
pub struct LoadedJob {
    pub request: RenderRequest,
    pub notices: Vec<Notice>,
}

impl PostJob {
    /// Parse a job from JSON text.
    pub fn from_json_str(s: &str) -> PostResult<Self> {
        let job = serde_json::from_str(s).context("parse job JSON")?;
        Ok(job)
    }

    /// Read and parse a job file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read job '{}'", path.display()))?;
        Ok(Self::from_json_str(&s)?)
    }

    /// The job's own preset table, or the built-in one.
    pub fn preset_table(&self) -> PresetTable {
        self.presets.clone().unwrap_or_default()
    }

    /// Resolve `preset` against the job's table.
    pub fn geometry(&self) -> PostResult<TargetGeometry> {
        self.preset_table().resolve(&self.preset)
    }

    /// Read every referenced file under `root` and build a render request.
    ///
    /// An unreadable background is fatal. Unreadable fonts and logos are dropped with a
    /// notice, matching how undecodable ones are treated.
    pub fn load(&self, root: &Path) -> anyhow::Result<LoadedJob> {
        let geometry = self.geometry()?;
        let mut notices = Vec::new();

        let background = match &self.background {
            Some(rel) => {
                let p = asset_path(root, rel)?;
                Some(
                    std::fs::read(&p)
                        .with_context(|| format!("read background '{}'", p.display()))?,
                )
            }
            None => None,
        };

        let logo = read_optional(
            root,
            self.logo.as_deref(),
            NoticeKind::LogoSkipped,
            "logo",
            &mut notices,
        )?;
        let primary_font = read_optional(
            root,
            self.primary_font.as_deref(),
            NoticeKind::FontFallback,
            "primary font",
            &mut notices,
        )?;
        let secondary_font = read_optional(
            root,
            self.secondary_font.as_deref(),
            NoticeKind::FontFallback,
            "secondary font",
            &mut notices,
        )?;

        let request = RenderRequest {
            background,
            brand: BrandInput {
                logo,
                primary_color: self.primary_color.clone(),
                secondary_color: self.secondary_color.clone(),
                primary_font,
                secondary_font,
            },
            content: PostContent {
                primary: self.text.clone(),
                secondary: self.occasion.clone().filter(|s| !s.is_empty()),
            },
            geometry,
            style: self.style.clone(),
            quality: self.quality,
        };
        Ok(LoadedJob { request, notices })
    }
}

fn read_optional(
    root: &Path,
    rel: Option<&str>,
    kind: NoticeKind,
    what: &str,
    notices: &mut Vec<Notice>,
) -> PostResult<Option<Vec<u8>>> {
    let Some(rel) = rel else {
        return Ok(None);
    };
    let p = asset_path(root, rel)?;
    match std::fs::read(&p) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) => {
            notices.push(Notice::emit(
                kind,
                format!("{what} '{}' unreadable: {e}", p.display()),
            ));
            Ok(None)
        }
    }
}

fn asset_path(root: &Path, rel: &str) -> PostResult<PathBuf> {
    let norm = normalize_rel_path(rel)?;
    Ok(root.join(Path::new(&norm)))
}

/// Normalize and validate job-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> PostResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PostError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(PostError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PostError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PostError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;

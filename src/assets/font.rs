use std::sync::Arc;

use crate::foundation::error::{Notice, NoticeKind, PostError, PostResult, Recovered};

/// Font bytes bundled into the binary and used whenever a brand font is absent or unusable.
pub const DEFAULT_FONT_BYTES: &[u8] = epaint_default_fonts::UBUNTU_LIGHT;

/// A validated font: raw bytes plus the family name they register under.
#[derive(Clone)]
pub struct FontHandle {
    bytes: Arc<Vec<u8>>,
    family: String,
    embedded: bool,
}

impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontHandle")
            .field("family", &self.family)
            .field("bytes_len", &self.bytes.len())
            .field("embedded", &self.embedded)
            .finish()
    }
}

impl FontHandle {
    /// Validate font bytes by registering them with a scratch font collection.
    pub fn from_bytes(bytes: Vec<u8>) -> PostResult<Self> {
        let family = probe_family(&bytes)?;
        Ok(Self {
            bytes: Arc::new(bytes),
            family,
            embedded: false,
        })
    }

    /// The embedded default font.
    pub fn embedded_default() -> PostResult<Self> {
        let family = probe_family(DEFAULT_FONT_BYTES)?;
        Ok(Self {
            bytes: Arc::new(DEFAULT_FONT_BYTES.to_vec()),
            family,
            embedded: true,
        })
    }

    /// Raw font file bytes.
    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    /// Family name reported by the font.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Return `true` for the embedded default font.
    pub fn is_embedded_default(&self) -> bool {
        self.embedded
    }
}

fn probe_family(bytes: &[u8]) -> PostResult<String> {
    if bytes.is_empty() {
        return Err(PostError::font_load("font data is empty"));
    }
    let mut ctx = parley::FontContext::default();
    let families = ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| PostError::font_load("no font families registered from font bytes"))?;
    let name = ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| PostError::font_load("registered font family has no name"))?;
    Ok(name.to_string())
}

/// Resolve an optional brand font, substituting the embedded default on failure.
///
/// `None` means no font was requested and yields the default without a notice.
pub fn resolve_font(role: &str, bytes: Option<Vec<u8>>) -> PostResult<Recovered<FontHandle>> {
    let Some(bytes) = bytes else {
        return Ok(Recovered::clean(FontHandle::embedded_default()?));
    };
    match FontHandle::from_bytes(bytes) {
        Ok(f) => Ok(Recovered::clean(f)),
        Err(e) => Ok(Recovered::fallback(
            FontHandle::embedded_default()?,
            Notice::emit(
                NoticeKind::FontFallback,
                format!("{role} font: {e}; using embedded default font"),
            ),
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;

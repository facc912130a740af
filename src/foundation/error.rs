use std::fmt;

/// Convenience result type used across brandpost.
pub type PostResult<T> = Result<T, PostError>;

/// Which input a decode failure belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRole {
    /// The background image (required).
    Background,
    /// The brand logo (optional).
    Logo,
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background => f.write_str("background"),
            Self::Logo => f.write_str("logo"),
        }
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PostError {
    /// Malformed or unsupported image bytes.
    #[error("decode error ({asset}): {reason}")]
    Decode {
        /// Which input failed to decode.
        asset: AssetRole,
        /// Decoder message.
        reason: String,
    },

    /// Font bytes could not be registered.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// Malformed hex color string.
    #[error("color parse error: {0}")]
    ColorParse(String),

    /// Unknown or invalid target geometry.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Invalid caller-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure while serializing the final image.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PostError {
    /// Build a [`PostError::Decode`] value.
    pub fn decode(asset: AssetRole, reason: impl Into<String>) -> Self {
        Self::Decode {
            asset,
            reason: reason.into(),
        }
    }

    /// Build a [`PostError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`PostError::ColorParse`] value.
    pub fn color_parse(msg: impl Into<String>) -> Self {
        Self::ColorParse(msg.into())
    }

    /// Build a [`PostError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`PostError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PostError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

/// Kind of non-fatal fallback taken during a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// A font could not be loaded; the embedded default font was used.
    FontFallback,
    /// A color string could not be parsed; the documented default was used.
    ColorFallback,
    /// The logo could not be read or decoded and was left out.
    LogoSkipped,
    /// No background was supplied; a solid placeholder was used.
    BackgroundPlaceholder,
}

/// Non-fatal diagnostic attached to a successful render.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Notice {
    /// Fallback category.
    pub kind: NoticeKind,
    /// Human readable detail (which input, why).
    pub message: String,
}

impl Notice {
    /// Create a notice and emit it as a `tracing` warning.
    pub fn emit(kind: NoticeKind, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!(?kind, "{message}");
        Self { kind, message }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// A value that is always usable, plus the notice describing any fallback taken to get it.
#[derive(Clone, Debug)]
pub struct Recovered<T> {
    /// The parsed value, or the documented default.
    pub value: T,
    /// Present when the default was substituted.
    pub notice: Option<Notice>,
}

impl<T> Recovered<T> {
    /// A value obtained without any fallback.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            notice: None,
        }
    }

    /// A default substituted after a recoverable failure.
    pub fn fallback(value: T, notice: Notice) -> Self {
        Self {
            value,
            notice: Some(notice),
        }
    }

    /// Split into the value, pushing any notice onto `notices`.
    pub fn take(self, notices: &mut Vec<Notice>) -> T {
        if let Some(n) = self.notice {
            notices.push(n);
        }
        self.value
    }

    /// Return `true` when a fallback was used.
    pub fn is_fallback(&self) -> bool {
        self.notice.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

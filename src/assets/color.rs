use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{Notice, NoticeKind, PostError, PostResult, Recovered};

/// Fallback for an unparsable primary brand color.
pub const DEFAULT_PRIMARY: Rgba8 = Rgba8::rgb(255, 0, 0);
/// Fallback for an unparsable secondary brand color.
pub const DEFAULT_SECONDARY: Rgba8 = Rgba8::rgb(0, 0, 0);

/// Parse `#RRGGBB` / `#RRGGBBAA` (the `#` is optional, case-insensitive).
pub fn parse_hex(s: &str) -> PostResult<Rgba8> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> PostResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| PostError::color_parse(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.is_ascii() {
        return Err(PostError::color_parse("hex color must be ASCII"));
    }
    match s.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err(PostError::color_parse(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

/// Parse a brand color, substituting `default` when the string is malformed.
pub fn resolve_color(role: &str, s: &str, default: Rgba8) -> Recovered<Rgba8> {
    match parse_hex(s) {
        Ok(c) => Recovered::clean(c),
        Err(e) => Recovered::fallback(
            default,
            Notice::emit(
                NoticeKind::ColorFallback,
                format!(
                    "{role} color {s:?}: {e}; using {}",
                    to_hex(default)
                ),
            ),
        ),
    }
}

/// Lowercase `#rrggbbaa`.
pub fn to_hex(c: Rgba8) -> String {
    format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&to_hex(*self))
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Rgba8::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Rgba8::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;

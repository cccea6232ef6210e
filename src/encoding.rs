//! Byte-order-mark sniffing and text decoding.
//!
//! Detection and decoding are separate steps: [`detect_bom`] is a pure
//! classifier over the first bytes of a buffer, and [`decode_bytes`] combines
//! its result with an optional encoding name to pick the decoder.
//!
//! Supported encodings are UTF-8, UTF-16LE and UTF-16BE. Malformed byte
//! sequences are replaced with U+FFFD rather than failing the import.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// A character encoding this crate can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16le")]
    Utf16Le,
    #[serde(rename = "utf-16be")]
    Utf16Be,
}

impl Encoding {
    /// The canonical lowercase label, e.g. `utf-16be`.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16Be => "utf-16be",
        }
    }

    fn decoder(self) -> &'static encoding_rs::Encoding {
        match self {
            Encoding::Utf8 => encoding_rs::UTF_8,
            Encoding::Utf16Le => encoding_rs::UTF_16LE,
            Encoding::Utf16Be => encoding_rs::UTF_16BE,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of classifying the leading bytes of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bom {
    /// `EF BB BF`
    Utf8,
    /// `FF FE`
    Utf16Le,
    /// `FE FF`
    Utf16Be,
    /// No byte-order mark.
    Unknown,
}

impl Bom {
    /// Number of bytes the mark occupies.
    pub fn len(self) -> usize {
        match self {
            Bom::Utf8 => 3,
            Bom::Utf16Le | Bom::Utf16Be => 2,
            Bom::Unknown => 0,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Bom::Unknown
    }

    pub fn encoding(self) -> Option<Encoding> {
        match self {
            Bom::Utf8 => Some(Encoding::Utf8),
            Bom::Utf16Le => Some(Encoding::Utf16Le),
            Bom::Utf16Be => Some(Encoding::Utf16Be),
            Bom::Unknown => None,
        }
    }
}

/// Classify a buffer by its byte-order mark.
pub fn detect_bom(bytes: &[u8]) -> Bom {
    match bytes {
        [0xEF, 0xBB, 0xBF, ..] => Bom::Utf8,
        [0xFF, 0xFE, ..] => Bom::Utf16Le,
        [0xFE, 0xFF, ..] => Bom::Utf16Be,
        _ => Bom::Unknown,
    }
}

/// An encoding name as given by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingHint {
    /// Names a single encoding; wins over a BOM.
    Exact(Encoding),
    /// `utf16` without a byte order; the BOM decides, big-endian otherwise.
    Utf16,
}

/// Parse a user-supplied encoding name.
///
/// Case, `-`, `_` and spaces are ignored, so `UTF-16BE`, `utf16be` and
/// `utf_16_be` are the same name.
///
/// # Errors
/// [`ConfigError::UnknownEncoding`] for anything outside UTF-8/UTF-16.
pub fn parse_encoding_name(name: &str) -> Result<EncodingHint, ConfigError> {
    let norm: String = name
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect();
    match norm.as_str() {
        "utf8" => Ok(EncodingHint::Exact(Encoding::Utf8)),
        "utf16" => Ok(EncodingHint::Utf16),
        "utf16le" => Ok(EncodingHint::Exact(Encoding::Utf16Le)),
        "utf16be" => Ok(EncodingHint::Exact(Encoding::Utf16Be)),
        _ => Err(ConfigError::UnknownEncoding(name.to_string())),
    }
}

/// Pick the encoding for a buffer from its BOM and an optional hint.
pub fn resolve_encoding(bom: Bom, hint: Option<EncodingHint>) -> Encoding {
    match hint {
        Some(EncodingHint::Exact(enc)) => enc,
        Some(EncodingHint::Utf16) => bom.encoding().unwrap_or(Encoding::Utf16Be),
        None => bom.encoding().unwrap_or(Encoding::Utf8),
    }
}

/// Text decoded from a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: Encoding,
}

/// Decode a buffer, honoring and stripping a byte-order mark.
///
/// A BOM is only stripped when it matches the encoding actually used; with an
/// explicit, conflicting encoding name the bytes are decoded as given.
///
/// # Errors
/// [`ConfigError::UnknownEncoding`] if `encoding` is not a supported name.
pub fn decode_bytes(bytes: &[u8], encoding: Option<&str>) -> Result<Decoded, ConfigError> {
    let hint = encoding.map(parse_encoding_name).transpose()?;
    let bom = detect_bom(bytes);
    let enc = resolve_encoding(bom, hint);
    let body = if bom.encoding() == Some(enc) {
        &bytes[bom.len()..]
    } else {
        bytes
    };

    let (text, had_errors) = enc.decoder().decode_without_bom_handling(body);
    if had_errors {
        warn!(encoding = %enc, "malformed byte sequences replaced while decoding");
    }
    debug!(encoding = %enc, bom = ?bom, bytes = bytes.len(), "decoded input");
    Ok(Decoded {
        text: text.into_owned(),
        encoding: enc,
    })
}

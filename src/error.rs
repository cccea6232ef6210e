//! Configuration errors raised before any row processing happens.
//!
//! Everything else that can go wrong with messy input (unparsable numbers,
//! ragged rows, blank header names) is resolved by per-field policies and never
//! surfaces as an error. Public entry points return [`anyhow::Result`]; callers
//! that need to branch on the failure can `downcast_ref::<ConfigError>()`.

use std::fmt;

/// A fatal problem with the options of an import call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The encoding name is not one of the supported UTF-8/UTF-16 spellings.
    UnknownEncoding(String),
    /// A `field_types` entry is not of the form `name:type` or `+name`.
    MalformedTypeHint(String),
    /// The delimiter cannot separate fields (quote, line break, or non-ASCII on export).
    InvalidDelimiter(char),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownEncoding(name) => {
                write!(f, "unsupported encoding: {:?} (expected utf8, utf16, utf16le or utf16be)", name)
            }
            ConfigError::MalformedTypeHint(hint) => {
                write!(f, "invalid type hint: {:?} (expected name:str, name:num or +name)", hint)
            }
            ConfigError::InvalidDelimiter(c) => write!(f, "unusable delimiter: {:?}", c),
        }
    }
}

impl std::error::Error for ConfigError {}

//! Header names and type hints.
//!
//! A header cell may carry a type hint, either as a `:type` suffix
//! (`fips:str`, `count:num`) or as a leading `+` that forces a number
//! (`+count`). Recognized type names, case-insensitive:
//!
//! | hint                    | type     |
//! |-------------------------|----------|
//! | `s`, `str`, `string`    | string   |
//! | `n`, `num`, `number`    | number   |
//!
//! Hints are collected into a [`TypeHintIndex`] where the first binding of a
//! name wins; later hints for the same name are ignored.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
}

impl FieldType {
    /// Normalize a type alias such as `STR` or `num`.
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.trim().to_ascii_lowercase().as_str() {
            "s" | "str" | "string" => Some(FieldType::String),
            "n" | "num" | "number" => Some(FieldType::Number),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field name with an optional declared type (`None` means infer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: Option<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Parse a header-style spec such as `fips:str`, `+count` or `name`.
    ///
    /// An unrecognized `:suffix` is not a hint; the whole text becomes the name.
    pub fn parse(raw: &str) -> Self {
        let (name, field_type) = split_hint(raw);
        Self::new(name, field_type)
    }

    /// Parse an explicit hint, which must name both a field and a type.
    ///
    /// # Errors
    /// [`ConfigError::MalformedTypeHint`] if `raw` is not `name:type` or `+name`.
    pub fn parse_hint(raw: &str) -> Result<Self, ConfigError> {
        match split_hint(raw) {
            (name, Some(t)) if !name.is_empty() => Ok(Self::new(name, Some(t))),
            _ => Err(ConfigError::MalformedTypeHint(raw.to_string())),
        }
    }
}

/// Split a trimmed header cell into a name and an optional hint.
fn split_hint(raw: &str) -> (String, Option<FieldType>) {
    let raw = raw.trim();
    if let Some((name, alias)) = raw.rsplit_once(':')
        && let Some(t) = FieldType::from_alias(alias)
    {
        return (name.trim().to_string(), Some(t));
    }
    if let Some(name) = raw.strip_prefix('+') {
        return (name.trim().to_string(), Some(FieldType::Number));
    }
    (raw.to_string(), None)
}

/// Field name → declared type, first binding wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeHintIndex {
    types: HashMap<String, FieldType>,
}

impl TypeHintIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `field_type` unless it is already bound.
    ///
    /// Returns `false` when an earlier binding was kept.
    pub fn bind(&mut self, name: impl Into<String>, field_type: FieldType) -> bool {
        let name = name.into();
        if self.types.contains_key(&name) {
            return false;
        }
        self.types.insert(name, field_type);
        true
    }

    pub fn get(&self, name: &str) -> Option<FieldType> {
        self.types.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.types.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, FieldType)> for TypeHintIndex {
    fn from_iter<I: IntoIterator<Item = (K, FieldType)>>(iter: I) -> Self {
        let mut index = TypeHintIndex::new();
        for (name, t) in iter {
            index.bind(name, t);
        }
        index
    }
}

/// Resolve raw header cells into field names, recording hints in `index`.
///
/// The result is positional: one name per input cell, duplicates kept. Cells
/// that are empty after trimming yield an empty name, which marks a column
/// whose data is dropped from every record.
///
/// ```
/// use delimport::headers::{parse_field_headers, FieldType, TypeHintIndex};
///
/// let mut index = TypeHintIndex::new();
/// let fields = parse_field_headers(&["fips", "count", "fips:str"], &mut index);
/// assert_eq!(fields, ["fips", "count", "fips"]);
/// assert_eq!(index.get("fips"), Some(FieldType::String));
/// assert_eq!(index.len(), 1);
/// ```
pub fn parse_field_headers<S: AsRef<str>>(raw: &[S], index: &mut TypeHintIndex) -> Vec<String> {
    raw.iter()
        .map(|cell| {
            let spec = FieldSpec::parse(cell.as_ref());
            if let Some(t) = spec.field_type
                && !spec.name.is_empty()
                && !index.bind(spec.name.as_str(), t)
                && index.get(&spec.name) != Some(t)
            {
                warn!(field = %spec.name, hint = %t, "conflicting type hint ignored");
            }
            spec.name
        })
        .collect()
}

/// Build a hint index from an explicit list such as `["a:str", "+b"]`.
///
/// # Errors
/// [`ConfigError::MalformedTypeHint`] for the first entry that is not a hint.
pub fn parse_field_types<S: AsRef<str>>(entries: &[S]) -> Result<TypeHintIndex, ConfigError> {
    let mut index = TypeHintIndex::new();
    for entry in entries {
        let spec = FieldSpec::parse_hint(entry.as_ref())?;
        if let Some(t) = spec.field_type {
            index.bind(spec.name, t);
        }
    }
    Ok(index)
}

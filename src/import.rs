//! Delimited-text import: bytes in, typed records out.
//!
//! The pipeline is:
//!
//! 1. validate [`ImportOptions`] (all configuration errors surface here),
//! 2. decode the bytes ([`crate::encoding`]),
//! 3. guess the delimiter unless one was given ([`crate::delimiter`]),
//! 4. tokenize ([`crate::tokenizer`]),
//! 5. resolve header names and type hints ([`crate::headers`]),
//! 6. infer and convert field types ([`crate::convert`]).
//!
//! Nothing after step 1 can fail; messy data is resolved cell by cell.

use crate::convert::adjust_record_types;
use crate::delimiter::guess_delimiter;
use crate::encoding::{Encoding, decode_bytes, parse_encoding_name};
use crate::error::ConfigError;
use crate::headers::{FieldSpec, TypeHintIndex, parse_field_headers, parse_field_types};
use crate::tokenizer::{RawTable, tokenize};
use crate::value::{Record, Value};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[cfg(feature = "parallel-io")]
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

/// Options for a single import call.
///
/// Every field is optional. Deserializes from kebab-case keys:
///
/// ```
/// use delimport::ImportOptions;
///
/// let opts: ImportOptions = serde_json::from_str(
///     r#"{"delimiter": "\t", "encoding": "utf16", "field-types": ["fips:str"]}"#,
/// )?;
/// assert_eq!(opts.delimiter, Some('\t'));
/// # anyhow::Result::<()>::Ok(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImportOptions {
    /// Field delimiter; guessed from the content when absent.
    pub delimiter: Option<char>,
    /// Encoding name (`utf8`, `utf16`, `utf16le`, `utf16be`, any spelling).
    pub encoding: Option<String>,
    /// Type hints such as `fips:str` or `+count`; they take precedence over
    /// hints in the header row.
    pub field_types: Vec<String>,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_field_types<S: Into<String>>(mut self, hints: impl IntoIterator<Item = S>) -> Self {
        self.field_types = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Check every option and return the parsed `field_types` hints.
    ///
    /// # Errors
    /// The first [`ConfigError`] found.
    pub fn validate(&self) -> Result<TypeHintIndex, ConfigError> {
        if let Some(d) = self.delimiter
            && matches!(d, '"' | '\n' | '\r')
        {
            return Err(ConfigError::InvalidDelimiter(d));
        }
        if let Some(name) = &self.encoding {
            parse_encoding_name(name)?;
        }
        parse_field_types(&self.field_types)
    }
}

/// The result of an import: typed records plus how they were read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedRecordSet {
    records: Vec<Record>,
    fields: Vec<FieldSpec>,
    delimiter: char,
    encoding: Encoding,
}

impl TypedRecordSet {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Resolved type of each usable field, in column order.
    pub fn field_types(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// The delimiter the input was split on, given or guessed.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Import a raw byte buffer.
///
/// # Errors
/// Only configuration errors (see [`ImportOptions::validate`]); the
/// underlying [`ConfigError`] can be recovered with `downcast_ref`.
pub fn import_delim(bytes: &[u8], opts: &ImportOptions) -> Result<TypedRecordSet> {
    let hints = opts.validate().context("invalid import options")?;
    let decoded =
        decode_bytes(bytes, opts.encoding.as_deref()).context("decode delimited text")?;
    Ok(build_record_set(
        &decoded.text,
        decoded.encoding,
        opts.delimiter,
        hints,
    ))
}

/// Import text that has already been decoded.
///
/// A leading U+FEFF left over from decoding is ignored.
///
/// # Errors
/// See [`import_delim`]. The `encoding` option is validated but not used.
pub fn import_delim_str(text: &str, opts: &ImportOptions) -> Result<TypedRecordSet> {
    let hints = opts.validate().context("invalid import options")?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    Ok(build_record_set(text, Encoding::Utf8, opts.delimiter, hints))
}

/// Parse decoded text with a known delimiter and no external type hints.
///
/// ```
/// use delimport::{import_delim_table, Value};
///
/// let records = import_delim_table("a|b\n1|\"boo\"\n", '|');
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get("a"), Some(&Value::Number(1.0)));
/// assert_eq!(records[0].get("b"), Some(&Value::from("boo")));
/// ```
pub fn import_delim_table(text: &str, delimiter: char) -> Vec<Record> {
    build_record_set(text, Encoding::Utf8, Some(delimiter), TypeHintIndex::new()).into_records()
}

/// Import several independent payloads in parallel, preserving their order.
///
/// # Errors
/// Fails if the options are invalid or any payload fails to import.
#[cfg(feature = "parallel-io")]
pub fn import_all<B>(payloads: &[B], opts: &ImportOptions) -> Result<Vec<TypedRecordSet>>
where
    B: AsRef<[u8]> + Sync,
{
    opts.validate().context("invalid import options")?;
    payloads
        .par_iter()
        .enumerate()
        .map(|(i, bytes)| {
            import_delim(bytes.as_ref(), opts).with_context(|| format!("import payload #{}", i + 1))
        })
        .collect()
}

fn build_record_set(
    text: &str,
    encoding: Encoding,
    delimiter: Option<char>,
    hints: TypeHintIndex,
) -> TypedRecordSet {
    let delimiter = delimiter.unwrap_or_else(|| guess_delimiter(text));
    let table = tokenize(text, delimiter);
    let (fields, records) = type_records(&table, hints);
    debug!(
        delimiter = ?delimiter,
        encoding = %encoding,
        fields = fields.len(),
        records = records.len(),
        "imported delimited text"
    );
    TypedRecordSet {
        records,
        fields,
        delimiter,
        encoding,
    }
}

/// Turn a raw table into typed records, using `hints` plus the header's own.
fn type_records(table: &RawTable, mut hints: TypeHintIndex) -> (Vec<FieldSpec>, Vec<Record>) {
    let names = parse_field_headers(table.header().unwrap_or_default(), &mut hints);

    // A table with no usable names has exactly one (empty) record, however
    // many data rows it carries.
    if names.iter().all(String::is_empty) {
        return (Vec::new(), vec![Record::new()]);
    }

    let columns = usable_columns(&names);
    let mut records: Vec<Record> = table
        .data_rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|&(name, i)| {
                    let cell = row.get(i).cloned().unwrap_or_default();
                    (name, Value::String(cell))
                })
                .collect::<Record>()
        })
        .collect();

    let specs: Vec<FieldSpec> = columns
        .iter()
        .map(|&(name, _)| FieldSpec::new(name, hints.get(name)))
        .collect();
    let fields = adjust_record_types(&mut records, &specs);
    (fields, records)
}

/// Each distinct non-blank name paired with the raw column its value comes
/// from: the position of its first occurrence, the index of its last.
fn usable_columns(names: &[String]) -> Vec<(&str, usize)> {
    let mut columns: Vec<(&str, usize)> = Vec::with_capacity(names.len());
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate().filter(|(_, n)| !n.is_empty()) {
        match positions.get(name.as_str()) {
            Some(&pos) => columns[pos].1 = i,
            None => {
                positions.insert(name.as_str(), columns.len());
                columns.push((name.as_str(), i));
            }
        }
    }
    columns
}

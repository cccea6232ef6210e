//! Writing imported records back out as delimited text.
//!
//! This module provides:
//! - **Delimiter choice**: [`export_delimiter`] falls back to the delimiter the
//!   records were imported with
//! - **Streaming writer**: [`write_delim`] serializes into any `io::Write`
//! - **In-memory formatting**: [`format_delim`] returns a `String`
//!
//! # Design notes
//! - Output goes through `csv::Writer`, so fields are quoted only when they
//!   contain the delimiter, a quote or a line break.
//! - Null cells are written empty; numbers use their shortest form (`3`, not `3.0`).
//! - Only fields with a usable name are written, in column order.

use crate::error::ConfigError;
use crate::import::TypedRecordSet;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::io::Write;

/// The delimiter to export with: `requested` if given, else the input delimiter.
pub fn export_delimiter(set: &TypedRecordSet, requested: Option<char>) -> char {
    requested.unwrap_or_else(|| set.delimiter())
}

/// Write field names and records as delimited text.
///
/// Every record is terminated with `\n`.
///
/// # Returns
/// The number of records written.
///
/// # Errors
/// [`ConfigError::InvalidDelimiter`] if the delimiter is not a single ASCII
/// byte usable as a separator, or any I/O error from `writer`.
pub fn write_delim<W: Write>(
    writer: W,
    set: &TypedRecordSet,
    delimiter: Option<char>,
) -> Result<usize> {
    let delim = export_delimiter(set, delimiter);
    let byte = u8::try_from(delim)
        .ok()
        .filter(|b| b.is_ascii() && !matches!(*b, b'"' | b'\n' | b'\r'))
        .ok_or(ConfigError::InvalidDelimiter(delim))?;

    let names: Vec<&str> = set.field_names().collect();
    if names.is_empty() {
        return Ok(0);
    }

    let mut wtr = WriterBuilder::new().delimiter(byte).from_writer(writer);
    wtr.write_record(&names).context("write header row")?;
    for (i, rec) in set.records().iter().enumerate() {
        let row: Vec<String> = names
            .iter()
            .map(|name| rec.get(name).map(ToString::to_string).unwrap_or_default())
            .collect();
        wtr.write_record(&row)
            .with_context(|| format!("write record #{}", i + 1))?;
    }
    wtr.flush()?;
    Ok(set.len())
}

/// Format records as a delimited-text string without a trailing line break.
///
/// ```
/// use delimport::{import_delim_str, ImportOptions};
/// use delimport::io::csv::format_delim;
///
/// let opts = ImportOptions::new().with_field_types(["fips:str"]);
/// let set = import_delim_str("fips\n00001", &opts)?;
/// assert_eq!(format_delim(&set, None)?, "fips\n00001");
/// # anyhow::Result::<()>::Ok(())
/// ```
///
/// # Errors
/// See [`write_delim`].
pub fn format_delim(set: &TypedRecordSet, delimiter: Option<char>) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_delim(&mut buf, set, delimiter)?;
    let mut out = String::from_utf8(buf).context("exported text is not UTF-8")?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

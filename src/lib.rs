//! # delimport
//!
//! Import **delimited text** (CSV, TSV, pipe- or semicolon-separated) into
//! typed records. Raw bytes go in; records keyed by field name come out, with
//! every cell converted to a string, a number or null.
//!
//! ## Key Features
//!
//! - **Encoding detection** - UTF-8, UTF-16LE and UTF-16BE, with byte-order-mark sniffing
//! - **Delimiter guessing** - comma, tab, pipe or semicolon, picked from the header line
//! - **Quote-aware tokenizing** - quoted delimiters, line breaks and `""` escapes
//! - **Type hints** - `name:str`, `name:num` or `+name` in the header or as options
//! - **Type inference** - numeric fields detected from their first non-empty value
//! - **Numeric literals** - signed, thousands-separated, scientific and hex
//! - **Export** - write records back out with the input delimiter (feature `io-csv`)
//!
//! ## Quick Start
//!
//! ```
//! use delimport::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let set = import_delim(b"number,name\n3,foo\n,\n", &ImportOptions::default())?;
//!
//! assert_eq!(set.delimiter(), ',');
//! assert_eq!(set.records()[0].get("number"), Some(&Value::Number(3.0)));
//! assert_eq!(set.records()[1].get("number"), Some(&Value::Null));
//! assert_eq!(set.records()[1].get("name"), Some(&Value::from("")));
//! # Ok(())
//! # }
//! ```
//!
//! ## Type Hints
//!
//! ```
//! use delimport::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! // Keep leading zeros by declaring the field a string.
//! let opts = ImportOptions::new().with_field_types(["fips:str"]);
//! let set = import_delim_str("fips\tpop\n00001\t1,204", &opts)?;
//!
//! assert_eq!(set.records()[0].get("fips"), Some(&Value::from("00001")));
//! assert_eq!(set.records()[0].get("pop"), Some(&Value::Number(1204.0)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Only configuration problems fail an import: an unknown encoding name, a
//! malformed `field_types` entry or an unusable delimiter. They are reported as
//! [`ConfigError`] inside an [`anyhow::Error`]. Bad data never fails; an
//! unparsable cell in a numeric field becomes null, and blank-named columns
//! are dropped.
//!
//! ## Feature Flags
//!
//! - `io-csv` - Enable writing records back out as delimited text
//! - `parallel-io` - Enable [`import_all`] for importing many payloads on Rayon
//!
//! ## Module Overview
//!
//! - [`encoding`] - BOM detection and decoding
//! - [`delimiter`] - Delimiter guessing
//! - [`tokenizer`] - Splitting text into raw rows
//! - [`headers`] - Field names and type hints
//! - [`number`] - Numeric literal parsing
//! - [`convert`] - Type inference and cell conversion
//! - [`import`] - The end-to-end import pipeline
//! - [`io`] - Export

pub mod convert;
pub mod delimiter;
pub mod encoding;
pub mod error;
pub mod headers;
pub mod import;
pub mod io;
pub mod number;
pub mod tokenizer;
pub mod value;

// General re-exports
pub use convert::{adjust_record_types, infer_column_type};
pub use delimiter::guess_delimiter;
pub use encoding::{Bom, Encoding, decode_bytes, detect_bom};
pub use error::ConfigError;
pub use headers::{FieldSpec, FieldType, TypeHintIndex, parse_field_headers};
pub use import::{ImportOptions, TypedRecordSet, import_delim, import_delim_str, import_delim_table};
pub use number::parse_number;
pub use tokenizer::{RawTable, tokenize};
pub use value::{Record, Value};

// Gated re-exports
#[cfg(feature = "parallel-io")]
pub use import::import_all;

#[cfg(feature = "io-csv")]
pub use io::csv::{format_delim, write_delim};

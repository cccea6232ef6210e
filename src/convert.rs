//! Column type inference and cell conversion.
//!
//! Conversion is two-phase. First each field gets a type: its declared one,
//! or one inferred from the first non-empty value in the column. Then every
//! cell of the field is converted to that type. A later value that doesn't
//! fit the decided type never changes the decision; in a numeric column it
//! simply becomes null.

use crate::headers::{FieldSpec, FieldType};
use crate::number::{parse_number, parse_value};
use crate::value::{Record, Value};
use std::collections::HashMap;
use tracing::trace;

/// Decide a column type from its values.
///
/// Empty strings and nulls are skipped. The column is numeric if the first
/// remaining value is a number or parses as one; otherwise, including when
/// every value is empty, it is a string column.
pub fn infer_column_type<'a, I>(values: I) -> FieldType
where
    I: IntoIterator<Item = &'a Value>,
{
    match values.into_iter().find(|v| !v.is_empty()) {
        Some(Value::Number(_)) => FieldType::Number,
        Some(Value::String(s)) if parse_number(s).is_some() => FieldType::Number,
        _ => FieldType::String,
    }
}

/// Convert a single cell in place.
///
/// String columns are left untouched, so numbers that came from a non-text
/// source stay numbers and numeric-looking text keeps its leading zeros.
pub fn convert_value(value: &mut Value, field_type: FieldType) {
    if field_type == FieldType::Number {
        *value = parse_value(value);
    }
}

/// Give every field a type and convert the records in place.
///
/// `fields` may repeat a name; the first occurrence with a declared type
/// decides for all of them. Fields with no declared type are inferred from
/// the records. Returns one resolved spec per distinct name, in order of first
/// appearance, each with `field_type` set.
pub fn adjust_record_types(records: &mut [Record], fields: &[FieldSpec]) -> Vec<FieldSpec> {
    let mut resolved: Vec<FieldSpec> = Vec::with_capacity(fields.len());
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(fields.len());
    for spec in fields {
        match positions.get(spec.name.as_str()) {
            Some(&i) => {
                let existing = &mut resolved[i];
                if existing.field_type.is_none() {
                    existing.field_type = spec.field_type;
                }
            }
            None => {
                positions.insert(spec.name.as_str(), resolved.len());
                resolved.push(spec.clone());
            }
        }
    }

    for spec in &mut resolved {
        let field_type = match spec.field_type {
            Some(t) => t,
            None => {
                let t = infer_column_type(records.iter().filter_map(|r| r.get(&spec.name)));
                trace!(field = %spec.name, inferred = %t, "inferred field type");
                t
            }
        };
        spec.field_type = Some(field_type);
        for rec in records.iter_mut() {
            if let Some(value) = rec.get_mut(&spec.name) {
                convert_value(value, field_type);
            }
        }
    }
    resolved
}

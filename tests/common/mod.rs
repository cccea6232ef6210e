#![allow(dead_code)]

use delimport::{Record, Value};

/// Build a record from `(name, value)` pairs in column order.
pub fn rec(pairs: &[(&str, Value)]) -> Record {
    pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
}

pub fn num(n: f64) -> Value {
    Value::Number(n)
}

pub fn s(text: &str) -> Value {
    Value::from(text)
}

pub const NULL: Value = Value::Null;

//! Numeric literal recognition.
//!
//! [`parse_number`] accepts a whole token or nothing: plain and signed decimals,
//! thousands-grouped decimals (`4,000,300`), scientific notation and `0x` hex.
//! Tokens with anything else in them (`312 Orchard St`, `2013-12-03`, `4a`)
//! are rejected rather than having a numeric prefix extracted.

use crate::value::Value;
use regex::Regex;
use std::sync::LazyLock;

static NUMERIC_RXP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([-+]?)(?:0[xX]([0-9a-fA-F]+)|((?:(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][-+]?[0-9]+)?))$",
    )
    .expect("numeric literal regex is valid")
});

/// Parse a single token as a number.
///
/// Surrounding whitespace is ignored. Returns `None` for empty or
/// whitespace-only input, for any token that is not entirely a numeric
/// literal, and for literals that overflow to infinity.
///
/// ```
/// use delimport::parse_number;
///
/// assert_eq!(parse_number("-2,000,000.0  "), Some(-2e6));
/// assert_eq!(parse_number("0xcc"), Some(204.0));
/// assert_eq!(parse_number("312 Orchard St"), None);
/// ```
pub fn parse_number(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    let caps = NUMERIC_RXP.captures(token)?;
    let negative = caps.get(1).is_some_and(|m| m.as_str() == "-");

    let magnitude = if let Some(hex) = caps.get(2) {
        hex.as_str()
            .chars()
            .fold(0.0_f64, |acc, c| acc * 16.0 + c.to_digit(16).map_or(0.0, f64::from))
    } else {
        let body = caps.get(3)?.as_str().replace(',', "");
        body.parse::<f64>().ok()?
    };

    let n = if negative { -magnitude } else { magnitude };
    n.is_finite().then_some(n)
}

/// Convert a cell to a number, passing native numbers through untouched.
///
/// Strings go through [`parse_number`]; anything unparsable becomes
/// [`Value::Null`].
pub fn parse_value(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(*n),
        Value::String(s) => parse_number(s).into(),
        Value::Null => Value::Null,
    }
}

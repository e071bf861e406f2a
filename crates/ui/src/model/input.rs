//! Conversion of raw field text into request values.
//!
//! Numbers follow browser `Number()` rules so that what a user types into the
//! embeddings field is interpreted the way the web form interpreted it: no
//! token is ever rejected, unparseable ones simply become `NaN`.

use api::JsonObject;
use serde_json::Value;
use thiserror::Error;

/// Local input-format problems. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid JSON format for data.")]
    InvalidData,
    #[error("Data must be a JSON array of objects.")]
    DataShape,
    #[error("Invalid JSON format for conditions.")]
    InvalidConditions,
    #[error("Conditions must be a non-empty JSON object.")]
    ConditionsShape,
    #[error("Invalid collection schema: {0}")]
    Schema(#[from] core_types::SchemaError),
    #[error("`{field}` expects {expected}, got `{value}`")]
    Field {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Split on commas and convert each token with `Number()` semantics.
pub fn parse_embeddings(text: &str) -> Vec<f64> {
    text.split(',').map(js_number).collect()
}

/// Split on commas, keeping whitespace and empty segments.
pub fn split_cids(text: &str) -> Vec<String> {
    text.split(',').map(str::to_string).collect()
}

pub fn parse_insert_data(text: &str) -> Result<Vec<JsonObject>, InputError> {
    let value: Value = serde_json::from_str(text).map_err(|_| InputError::InvalidData)?;
    let Value::Array(items) = value else {
        return Err(InputError::DataShape);
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(obj) => Ok(obj),
            _ => Err(InputError::DataShape),
        })
        .collect()
}

pub fn parse_conditions(text: &str) -> Result<JsonObject, InputError> {
    let value: Value = serde_json::from_str(text).map_err(|_| InputError::InvalidConditions)?;
    match value {
        Value::Object(obj) if !obj.is_empty() => Ok(obj),
        _ => Err(InputError::ConditionsShape),
    }
}

/// `Number(token)` as a browser evaluates it.
pub fn js_number(token: &str) -> f64 {
    let t = token.trim();
    if t.is_empty() {
        return 0.0;
    }

    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = t.strip_prefix(prefix) {
            return radix_number(digits, radix);
        }
    }

    let decimal_only = t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal_only {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_number(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    })
    .unwrap_or(f64::NAN)
}

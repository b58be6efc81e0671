//! Numeric normalization at the store boundary.
//!
//! DynamoDB stores every number as an arbitrary-precision decimal string. Values
//! leaving the store, and bodies entering it, are rewritten so that integral
//! numbers are integers and everything else is an `f64`, whatever the collection.

use crate::common::Record;

use serde_json::{Number, Value};

/// Bounds of the `f64` range that converts to `i64` without saturating.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Normalize every number inside `value`, recursing through maps and lists.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Number(number) => Value::Number(normalize_number(number)),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(fields) => Value::Object(normalize_record(fields)),
        other => other,
    }
}

/// Normalize every field of a record.
pub fn normalize_record(record: Record) -> Record {
    record
        .into_iter()
        .map(|(name, value)| (name, normalize(value)))
        .collect()
}

fn normalize_number(number: Number) -> Number {
    if !number.is_f64() {
        return number;
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(&float) => {
            Number::from(float as i64)
        }
        _ => number,
    }
}

//! Field deserializers that never fail on a type mismatch.
//!
//! Each helper reads the raw JSON value and converts what it can. A value of
//! the wrong shape becomes `None` (or an empty list) so one odd leaf never
//! costs the rest of the document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Numeric leaf types accepted by [`number`].
pub(super) trait Numeric: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

/// Read a JSON number, or a string holding one.
fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

impl Numeric for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        as_f64(value)
    }
}

impl Numeric for u64 {
    // Fractional values are truncated, negative ones are dropped.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn from_value(value: &Value) -> Option<Self> {
        if let Some(exact) = value.as_u64() {
            return Some(exact);
        }
        as_f64(value)
            .filter(|number| *number >= 0.0 && *number < u64::MAX as f64)
            .map(|number| number.trunc() as u64)
    }
}

impl Numeric for u32 {
    fn from_value(value: &Value) -> Option<Self> {
        u64::from_value(value).and_then(|number| u32::try_from(number).ok())
    }
}

impl Numeric for i64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        if let Some(exact) = value.as_i64() {
            return Some(exact);
        }
        as_f64(value)
            .filter(|number| number.abs() < i64::MAX as f64)
            .map(|number| number.trunc() as i64)
    }
}

pub(super) fn number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Numeric,
{
    Ok(T::from_value(&Value::deserialize(deserializer)?))
}

/// Strings pass through; numbers and booleans are shown as written.
pub(super) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    })
}

pub(super) fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// Decode a nested object, or `None` when the value is not an object.
fn object<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_object() {
        T::deserialize(value).ok()
    } else {
        None
    }
}

pub(super) fn section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(object(Value::deserialize(deserializer)?))
}

/// Keep the object entries of an array; anything else reads as empty.
pub(super) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(object).collect(),
        _ => Vec::new(),
    })
}

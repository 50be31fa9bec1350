//! Lenient field deserializers for source records
//!
//! Prosopographical exports are inconsistent about types: years and
//! identifiers arrive as numbers or strings, absent values as `null`, `""` or
//! the literal string `"None"`. These helpers normalise all of that to
//! `Option`s so that a malformed value means "unknown" instead of a failed
//! record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as an optional integer
#[must_use]
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => parse_int_str(s),
        Value::Object(map) => map.get("value").and_then(value_as_i64),
        _ => None,
    }
}

/// Interpret a JSON value as an optional non-empty string
#[must_use]
pub fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == "None" {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("value").and_then(value_as_string),
        _ => None,
    }
}

/// Interpret a JSON value as an optional boolean
#[must_use]
pub fn value_as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Some(true),
            "false" | "0" | "no" | "n" => Some(false),
            _ => None,
        },
        Value::Object(map) => map.get("value").and_then(value_as_bool),
        _ => None,
    }
}

fn parse_int_str(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    // Some exports print years as floats ("-509.0")
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}

/// Deserialize an optional integer leniently
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64))
}

/// Deserialize an optional year leniently
pub fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(value_as_i64)
        .and_then(|i| i32::try_from(i).ok()))
}

/// Deserialize an optional string leniently
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_string))
}

/// Deserialize an optional boolean leniently
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_bool))
}

/// Deserialize a presence flag: any non-null, non-false value counts as set
///
/// DPRR binds the triumph flag to the string `"True"` when present and
/// leaves it unbound otherwise.
pub fn presence_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(value_as_bool(&v).unwrap_or(true)),
    })
}

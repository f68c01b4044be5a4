//! Field-level deserializers that absorb schema drift from the extraction service.
//!
//! Extraction output is LLM-generated JSON: strings arrive as `null` or numbers,
//! lists arrive as comma-separated strings, year counts arrive as `"5+ years"`.
//! These helpers coerce the scalar drift and reject only shape errors
//! (an object where a list belongs, a list where a number belongs).

use std::sync::OnceLock;

use regex::Regex;
use serde::de::{Deserialize, Deserializer, Error};
use serde_json::Value;

/// Leading decimal number inside free text, e.g. "3.5" in "3.5+ yrs".
pub fn leading_number(text: &str) -> Option<f64> {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let re = NUMBER.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number regex"));
    re.find(text).and_then(|m| m.as_str().parse::<f64>().ok())
}

/// `null` and missing values become `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any scalar becomes a string; `null` becomes `""`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string, found {}",
            kind(&other)
        ))),
    }
}

/// Like [`string`], but a missing or blank value stays `None`.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = string(deserializer)?;
    Ok(if s.trim().is_empty() { None } else { Some(s) })
}

/// A list of strings, or a single string split on commas / semicolons.
pub fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    list(Value::deserialize(deserializer)?, &[',', ';', '\n']).map_err(D::Error::custom)
}

/// A list of strings, or a single string split on line breaks.
pub fn line_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    list(Value::deserialize(deserializer)?, &['\n']).map_err(D::Error::custom)
}

/// Non-negative years: numbers, numeric strings ("5", "5+ years") or `null` (0).
pub fn years<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let years = match Value::deserialize(deserializer)? {
        Value::Null => 0.0,
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_number(&s).unwrap_or(0.0),
        other => {
            return Err(D::Error::custom(format!(
                "expected a number of years, found {}",
                kind(&other)
            )))
        }
    };
    Ok(if years.is_finite() { years.max(0.0) } else { 0.0 })
}

/// A weight value: numbers or numeric strings. `null` counts as 0.
pub(crate) fn weight(value: &Value) -> Result<f64, String> {
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("weight '{s}' is not a number")),
        other => Err(format!("expected a numeric weight, found {}", kind(other))),
    }
}

fn list(value: Value, separators: &[char]) -> Result<Vec<String>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(s
            .split(separators)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) if !s.trim().is_empty() => out.push(s.trim().to_string()),
                    Value::Number(n) => out.push(n.to_string()),
                    Value::String(_) | Value::Null => {}
                    other => {
                        return Err(format!("expected list items to be strings, found {}", kind(&other)))
                    }
                }
            }
            Ok(out)
        }
        other => Err(format!("expected a list of strings, found {}", kind(&other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

//! Lenient JSON decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode `text` as `T`, returning `fallback` if it is not valid JSON or does
/// not match the shape of `T`.
#[must_use]
pub fn parse_json<T: DeserializeOwned>(text: &str, fallback: T) -> T {
    serde_json::from_str(text).unwrap_or(fallback)
}

/// Untyped form of [`parse_json`]; the fallback is usually `Value::Null`.
#[must_use]
pub fn parse_json_value(text: &str, fallback: Value) -> Value {
    parse_json(text, fallback)
}

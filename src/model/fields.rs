//! Lenient field decoders for the upstream JSON.
//!
//! UEX encodes booleans as `0`/`1`, emits `0` or `null` for a missing parent id,
//! sometimes quotes numeric ids, and occasionally sends `null` where a name is expected.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a 0/1 flag. Booleans and nonzero numbers map to 1, anything else to 0.
pub fn flag<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let set = match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => matches!(s.trim(), "1" | "true"),
        _ => false,
    };
    Ok(u8::from(set))
}

/// Read a numeric id from a number or a numeric string.
fn numeric_id(value: Option<Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decode a foreign key. `0`, `null` and anything not numeric mean "no parent".
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(numeric_id(value).filter(|id| *id != 0))
}

/// Decode a required id given as a number or a numeric string.
pub fn id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let shown = value.as_ref().map(Value::to_string).unwrap_or_else(|| "null".into());
    numeric_id(value).ok_or_else(|| D::Error::custom(format!("invalid id {}", shown)))
}

/// Decode a string where `null` means empty.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an optional string, treating `null` and blank text as absent.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

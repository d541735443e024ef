use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One pull as stored in the export, every field stringified
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPull {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub time: String,
}

impl RawPull {
    pub fn from_json(json: &Value) -> Self {
        Self {
            id: extract_string(json, "id"),
            name: extract_string(json, "name"),
            kind: extract_string(json, "type"),
            time: extract_string(json, "time"),
        }
    }
}

/// Stringify a scalar JSON value. Null, arrays and objects yield `None`.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn extract_string(json: &Value, key: &str) -> String {
    json.get(key).and_then(scalar_string).unwrap_or_default()
}

/// `deserialize_with` helper accepting any scalar as a string
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_string(&value))
}

/// Like [`lenient_string`] but missing/null becomes an empty string
pub fn lenient_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// `deserialize_with` helper accepting an integer or a numeric string
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

//! Paimon.moe local export documents

use serde_json::Value;

use super::record::{scalar_string, RawPull};

/// Banner keys in processing order, with their gacha type codes
pub static BANNER_TYPES: &[(&str, &str)] = &[
    ("wish-counter-beginners", "100"),
    ("wish-counter-character-event", "301"),
    ("wish-counter-weapon-event", "302"),
    ("wish-counter-standard", "200"),
    ("wish-counter-chronicled", "500"),
];

#[derive(Debug, Clone)]
pub struct Banner {
    pub key: &'static str,
    pub gacha_type: &'static str,
    pub pulls: Vec<RawPull>,
}

#[derive(Debug, Clone)]
pub struct PaimonExport {
    pub uid: String,
    pub locale: String,
    pub banners: Vec<Banner>,
}

impl PaimonExport {
    pub fn from_json(json: &Value) -> Self {
        let uid = ["wish-uid", "uid"]
            .iter()
            .filter_map(|key| json.get(*key))
            .filter(|v| !is_blank_uid(v))
            .find_map(scalar_string)
            .unwrap_or_else(|| "0".to_string());

        let locale = json
            .get("locale")
            .and_then(Value::as_str)
            .filter(|l| !l.is_empty())
            .unwrap_or("en")
            .to_string();

        let banners = BANNER_TYPES
            .iter()
            .filter_map(|&(key, gacha_type)| {
                let counter = json.get(key)?.as_object()?;
                let pulls = counter
                    .get("pulls")
                    .and_then(Value::as_array)
                    .map(|pulls| pulls.iter().map(RawPull::from_json).collect())
                    .unwrap_or_default();
                Some(Banner {
                    key,
                    gacha_type,
                    pulls,
                })
            })
            .collect();

        Self {
            uid,
            locale,
            banners,
        }
    }

    pub fn pull_count(&self) -> usize {
        self.banners.iter().map(|b| b.pulls.len()).sum()
    }
}

/// Empty strings, numeric zero and `false` count as a missing uid. The
/// string "0" does not.
fn is_blank_uid(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(b) => !b,
        Value::Null | Value::Array(_) | Value::Object(_) => true,
    }
}

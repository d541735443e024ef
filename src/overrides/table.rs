use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

use crate::io::load_json;
use crate::parser::{lenient_string, lenient_string_or_empty};

pub const OVERRIDE_TABLE_VERSION: &str = "1.0";

/// One curated correction. Any subset of the fields may be filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub pmoe_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name_en: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name_jp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gacha_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rank_type: Option<String>,
}

impl OverrideEntry {
    /// Trimmed rank, `None` when missing or blank
    pub fn rank(&self) -> Option<&str> {
        self.rank_type.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }
}

/// The override table file. Unknown top-level keys are carried through
/// rewrites untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideTable {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub items: Vec<OverrideEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> String {
    OVERRIDE_TABLE_VERSION.to_string()
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self {
            version: default_version(),
            items: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl OverrideTable {
    pub fn new(items: Vec<OverrideEntry>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

/// Override entries keyed by internal item id, loaded once per run
#[derive(Debug, Clone, Default)]
pub struct OverrideMap {
    entries: HashMap<String, OverrideEntry>,
}

impl OverrideMap {
    pub fn from_table(table: &OverrideTable) -> Self {
        let entries = table
            .items
            .iter()
            .filter(|e| !e.pmoe_id.is_empty())
            .map(|e| (e.pmoe_id.clone(), e.clone()))
            .collect();
        Self { entries }
    }

    /// Load the table used during conversion. A missing file is an empty
    /// table; an unreadable one is logged and treated as empty.
    pub fn load_or_empty(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(?path, "no override table");
            return Self::default();
        }

        match load_json::<OverrideTable>(path) {
            Ok(table) => Self::from_table(&table),
            Err(e) => {
                tracing::warn!("ignoring override table: {}", e);
                Self::default()
            }
        }
    }

    pub fn get(&self, item_id: &str) -> Option<&OverrideEntry> {
        self.entries.get(item_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_accepts_numeric_rank_and_keeps_unknown_keys() {
        let table: OverrideTable = serde_json::from_value(json!({
            "version": "1.0",
            "note": "curated by hand",
            "items": [{"pmoe_id": "mika", "rank_type": 4, "name_jp": null}]
        }))
        .unwrap();

        assert_eq!(table.items[0].rank_type.as_deref(), Some("4"));
        assert_eq!(table.items[0].name_jp, None);
        assert_eq!(table.extra["note"], "curated by hand");

        let written = serde_json::to_value(&table).unwrap();
        assert_eq!(written["note"], "curated by hand");
        assert_eq!(written["items"][0]["rank_type"], "4");
    }

    #[test]
    fn test_map_skips_entries_without_id() {
        let table = OverrideTable::new(vec![
            OverrideEntry {
                pmoe_id: "mika".into(),
                ..Default::default()
            },
            OverrideEntry::default(),
        ]);
        let map = OverrideMap::from_table(&table);

        assert_eq!(map.len(), 1);
        assert!(map.get("mika").is_some());
    }

    #[test]
    fn test_load_missing_or_broken_table_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(OverrideMap::load_or_empty(&dir.path().join("absent.json")).is_empty());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[1, 2").unwrap();
        assert!(OverrideMap::load_or_empty(&broken).is_empty());
    }

    #[test]
    fn test_rank_trimmed_and_blank_is_none() {
        let mut entry = OverrideEntry::default();
        assert_eq!(entry.rank(), None);
        entry.rank_type = Some("  ".into());
        assert_eq!(entry.rank(), None);
        entry.rank_type = Some(" 5 ".into());
        assert_eq!(entry.rank(), Some("5"));
    }
}

//! Items whose rarity could not be resolved, collected for curation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::parser::{lenient_string, lenient_string_or_empty};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedItem {
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub pmoe_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name_en: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name_jp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gacha_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedReport {
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub items: Vec<UnresolvedItem>,
}

impl UnresolvedReport {
    /// Items with an id, first occurrence per id
    pub fn unique_items(&self) -> Vec<&UnresolvedItem> {
        let mut seen = std::collections::HashSet::new();
        self.items
            .iter()
            .filter(|item| !item.pmoe_id.is_empty() && seen.insert(item.pmoe_id.as_str()))
            .collect()
    }
}

/// Collector used during conversion: one entry per id, a later emission for
/// the same id replaces the earlier one in place.
#[derive(Debug, Default)]
pub struct UnresolvedItems {
    items: Vec<UnresolvedItem>,
    index: HashMap<String, usize>,
}

impl UnresolvedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, item: UnresolvedItem) {
        match self.index.get(&item.pmoe_id) {
            Some(&pos) => self.items[pos] = item,
            None => {
                self.index.insert(item.pmoe_id.clone(), self.items.len());
                self.items.push(item);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[UnresolvedItem] {
        &self.items
    }

    pub fn into_report(self, generated_at: impl Into<String>) -> UnresolvedReport {
        UnresolvedReport {
            generated_at: generated_at.into(),
            items: self.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, gacha_type: &str) -> UnresolvedItem {
        UnresolvedItem {
            pmoe_id: id.into(),
            gacha_type: Some(gacha_type.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_collector_last_write_wins_in_first_position() {
        let mut items = UnresolvedItems::new();
        items.record(item("a", "200"));
        items.record(item("b", "301"));
        items.record(item("a", "302"));

        let report = items.into_report("2024-01-01 00:00:00");
        let ids: Vec<_> = report.items.iter().map(|i| i.pmoe_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(report.items[0].gacha_type.as_deref(), Some("302"));
    }

    #[test]
    fn test_unique_items_first_wins_and_skips_blank_ids() {
        let report = UnresolvedReport {
            generated_at: String::new(),
            items: vec![item("a", "200"), item("", "200"), item("a", "302"), item("b", "100")],
        };

        let unique = report.unique_items();
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].gacha_type.as_deref(), Some("200"));
        assert_eq!(unique[1].pmoe_id, "b");
    }
}

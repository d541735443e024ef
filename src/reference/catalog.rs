//! Aggregation of raw reference documents into lookup tables
//!
//! Each source is turned into partial records by an adapter chosen from its
//! [`SourceKind`]; the partials are then folded in [`ALL_SOURCES`] order with
//! set-if-absent semantics. A source with the wrong shape contributes nothing.

use serde_json::{Map, Value};
use std::collections::HashMap;

use super::client::SourceData;
use super::sources::{CatalogLang, ReferenceSource, SourceKind, ALL_SOURCES};
use crate::parser::scalar_string;
use crate::resolve::normalize_en_key;

/// Catalog information for one internal item id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name_en: Option<String>,
    pub name_ja: Option<String>,
    pub rarity: Option<String>,
}

impl CatalogEntry {
    /// Fill every field that is still empty from `other`
    fn absorb(&mut self, other: CatalogEntry) {
        if self.name_en.is_none() {
            self.name_en = other.name_en;
        }
        if self.name_ja.is_none() {
            self.name_ja = other.name_ja;
        }
        if self.rarity.is_none() {
            self.rarity = other.rarity;
        }
    }
}

/// English/Japanese/Chinese word pairs
#[derive(Debug, Clone, Default)]
pub struct WordMaps {
    pub en_to_ja: HashMap<String, String>,
    pub en_to_ja_norm: HashMap<String, String>,
    pub zh_to_ja: HashMap<String, String>,
}

/// Everything the resolver consults, immutable for the rest of the run
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub catalog: HashMap<String, CatalogEntry>,
    pub item_ids: HashMap<String, String>,
    pub words: WordMaps,
}

impl ReferenceData {
    /// Build from fetched documents using the default source order
    pub fn from_sources(data: &SourceData) -> Self {
        Self::from_ordered(ALL_SOURCES, data)
    }

    pub fn from_ordered(order: &[&ReferenceSource], data: &SourceData) -> Self {
        let mut reference = ReferenceData::default();

        for source in order {
            let Some(doc) = data.get(source.key) else {
                continue;
            };
            match source.kind {
                SourceKind::Catalog(lang) => {
                    for (item_id, partial) in catalog_partials(doc, lang) {
                        reference.catalog.entry(item_id).or_default().absorb(partial);
                    }
                }
                SourceKind::ItemIds => {
                    for (name, id) in item_id_pairs(doc) {
                        reference.item_ids.entry(name).or_insert(id);
                    }
                }
                SourceKind::Words => reference.words.absorb(doc),
            }
        }

        reference
    }

    pub fn catalog_entry(&self, item_id: &str) -> Option<&CatalogEntry> {
        self.catalog.get(item_id)
    }
}

impl WordMaps {
    fn absorb(&mut self, doc: &Value) {
        let Some(words) = doc.as_array() else {
            return;
        };

        for word in words.iter().filter_map(Value::as_object) {
            let Some(ja) = non_empty_str(word, "ja") else {
                continue;
            };

            if let Some(en) = non_empty_str(word, "en") {
                self.en_to_ja.insert(en.to_string(), ja.to_string());
                let norm = normalize_en_key(en);
                if !norm.is_empty() {
                    self.en_to_ja_norm.insert(norm, ja.to_string());
                }
            }

            if let Some(zh) = non_empty_str(word, "zhCN") {
                self.zh_to_ja.insert(zh.to_string(), ja.to_string());
            }
        }
    }
}

fn catalog_partials(doc: &Value, lang: CatalogLang) -> Vec<(String, CatalogEntry)> {
    let Some(items) = doc.as_object() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|(item_id, info)| {
            let info = info.as_object()?;
            let name = non_empty_str(info, "name").map(str::to_string);
            let rarity = info
                .get("rarity")
                .filter(|r| r.is_number() || r.is_string())
                .and_then(scalar_string)
                .filter(|r| !r.is_empty());

            let (name_en, name_ja) = match lang {
                CatalogLang::English => (name, None),
                CatalogLang::Japanese => (None, name),
            };
            Some((item_id.clone(), CatalogEntry { name_en, name_ja, rarity }))
        })
        .collect()
}

fn item_id_pairs(doc: &Value) -> Vec<(String, String)> {
    let Some(ids) = doc.as_object() else {
        return Vec::new();
    };

    ids.iter()
        .filter_map(|(name, id)| {
            let id = id
                .as_u64()
                .map(|n| n.to_string())
                .or_else(|| id.as_str().map(str::to_string))
                .filter(|id| !id.is_empty())?;
            Some((name.clone(), id))
        })
        .collect()
}

fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

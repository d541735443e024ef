//! Offline upkeep of the override table: init, todo and merge

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::report::{UnresolvedItem, UnresolvedReport};
use super::table::{OverrideEntry, OverrideTable};

/// Batch of entries for a curator to fill in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoBatch {
    #[serde(default)]
    pub base_missing_file: String,
    #[serde(default)]
    pub items: Vec<OverrideEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
}

fn blank_entry(item: &UnresolvedItem) -> OverrideEntry {
    OverrideEntry {
        pmoe_id: item.pmoe_id.clone(),
        name_en: item.name_en.clone(),
        name_jp: item.name_jp.clone(),
        gacha_type: item.gacha_type.clone(),
        rank_type: Some(String::new()),
    }
}

/// One blank entry per unresolved item
pub fn init_table(report: &UnresolvedReport) -> OverrideTable {
    OverrideTable::new(report.unique_items().into_iter().map(blank_entry).collect())
}

/// Blank entries for unresolved items the table does not know yet
pub fn todo_entries(report: &UnresolvedReport, table: &OverrideTable) -> Vec<OverrideEntry> {
    let known: HashSet<&str> = table
        .items
        .iter()
        .map(|e| e.pmoe_id.as_str())
        .filter(|id| !id.is_empty())
        .collect();

    report
        .unique_items()
        .into_iter()
        .filter(|item| !known.contains(item.pmoe_id.as_str()))
        .map(blank_entry)
        .collect()
}

/// Upsert every batch entry that carries a rank. Entries with a blank rank
/// are skipped entirely. The table ends up sorted by id.
pub fn merge_entries(table: &mut OverrideTable, batch: &[OverrideEntry]) -> MergeStats {
    let mut by_id: BTreeMap<String, OverrideEntry> = table
        .items
        .drain(..)
        .filter(|e| !e.pmoe_id.is_empty())
        .map(|e| (e.pmoe_id.clone(), e))
        .collect();

    let mut stats = MergeStats::default();

    for incoming in batch.iter().filter(|e| !e.pmoe_id.is_empty()) {
        let Some(rank) = incoming.rank() else {
            continue;
        };

        let existing = by_id.get(&incoming.pmoe_id);
        let merged = OverrideEntry {
            pmoe_id: incoming.pmoe_id.clone(),
            name_en: incoming
                .name_en
                .clone()
                .or_else(|| existing.and_then(|e| e.name_en.clone())),
            name_jp: incoming
                .name_jp
                .clone()
                .or_else(|| existing.and_then(|e| e.name_jp.clone())),
            gacha_type: incoming
                .gacha_type
                .clone()
                .or_else(|| existing.and_then(|e| e.gacha_type.clone())),
            rank_type: Some(rank.to_string()),
        };

        if existing.is_some() {
            stats.updated += 1;
        } else {
            stats.added += 1;
        }
        by_id.insert(merged.pmoe_id.clone(), merged);
    }

    table.items = by_id.into_values().collect();
    stats
}

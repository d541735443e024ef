use super::table::OverrideMap;

/// Resolved identity of a pull before and after curation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name_en: String,
    pub name_ja: String,
    pub rank: Option<String>,
}

impl OverrideMap {
    /// Overlay the curated entry for `item_id`, field by field. Blank
    /// override values never clear what was resolved.
    pub fn apply(&self, item_id: &str, mut identity: Identity) -> Identity {
        let Some(entry) = self.get(item_id) else {
            return identity;
        };

        if let Some(name) = trimmed(&entry.name_en) {
            identity.name_en = name;
        }
        if let Some(name) = trimmed(&entry.name_jp) {
            identity.name_ja = name;
        }
        if let Some(rank) = entry.rank() {
            identity.rank = Some(rank.to_string());
        }

        identity
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

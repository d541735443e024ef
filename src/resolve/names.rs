//! Best-effort English/Japanese name resolution
//!
//! Both names are produced by walking a fixed list of strategies and taking
//! the first non-empty answer. Catalog data outranks anything guessed, exact
//! dictionary hits outrank normalized ones, and the raw export name is the
//! last resort so that a pull with a name never ends up nameless.

use std::collections::HashMap;

use crate::reference::{CatalogEntry, ReferenceData};

/// Case-folded, whitespace-collapsed key with underscores treated as spaces
pub fn normalize_en_key(s: &str) -> String {
    s.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Guess an English name from an internal id: `wolfs_gravestone` becomes
/// `Wolfs Gravestone`. Often wrong for punctuated names; callers accept that.
pub fn derive_name_from_id(item_id: &str) -> String {
    normalize_en_key(item_id)
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether a locale tag selects Japanese as the localized language
pub fn is_japanese_locale(locale: &str) -> bool {
    locale.to_lowercase().starts_with("ja")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedNames {
    pub name_en: String,
    pub name_ja: String,
}

/// Inputs visible to every strategy
struct Lookup<'a> {
    reference: &'a ReferenceData,
    catalog: Option<&'a CatalogEntry>,
    derived: String,
    raw_name: &'a str,
    /// Filled in once the English chain has run
    english: String,
}

type Strategy = fn(&Lookup<'_>) -> Option<String>;

static ENGLISH_CHAIN: &[Strategy] = &[
    |l| l.catalog.and_then(|c| c.name_en.clone()),
    |l| Some(l.derived.clone()),
    |l| Some(l.raw_name.to_string()),
];

static JAPANESE_CHAIN: &[Strategy] = &[
    |l| l.catalog.and_then(|c| c.name_ja.clone()),
    |l| exact(l, &l.english),
    |l| normalized(l, &l.english),
    |l| exact(l, &l.derived),
    |l| normalized(l, &l.derived),
    |l| exact(l, l.raw_name),
    |l| find(&l.reference.words.zh_to_ja, l.raw_name),
];

fn exact(l: &Lookup, key: &str) -> Option<String> {
    find(&l.reference.words.en_to_ja, key)
}

fn normalized(l: &Lookup, key: &str) -> Option<String> {
    find(&l.reference.words.en_to_ja_norm, &normalize_en_key(key))
}

fn find(map: &HashMap<String, String>, key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }
    map.get(key).cloned()
}

fn first_match(chain: &[Strategy], lookup: &Lookup) -> String {
    chain
        .iter()
        .filter_map(|strategy| strategy(lookup))
        .find(|name| !name.is_empty())
        .unwrap_or_default()
}

pub struct NameResolver<'a> {
    reference: &'a ReferenceData,
}

impl<'a> NameResolver<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    pub fn resolve(&self, item_id: &str, raw_name: &str, locale: &str) -> ResolvedNames {
        let mut lookup = Lookup {
            reference: self.reference,
            catalog: self.reference.catalog_entry(item_id),
            derived: derive_name_from_id(item_id),
            raw_name,
            english: String::new(),
        };

        lookup.english = first_match(ENGLISH_CHAIN, &lookup);
        let name_ja = first_match(JAPANESE_CHAIN, &lookup);
        let mut names = ResolvedNames {
            name_en: lookup.english,
            name_ja,
        };

        if names.name_en.is_empty() && names.name_ja.is_empty() {
            if is_japanese_locale(locale) {
                names.name_ja = raw_name.to_string();
            } else {
                names.name_en = raw_name.to_string();
            }
        }

        names
    }

    /// Rarity straight from the catalog, if any source had one
    pub fn rarity(&self, item_id: &str) -> Option<String> {
        self.reference
            .catalog_entry(item_id)
            .and_then(|c| c.rarity.clone())
            .filter(|r| !r.is_empty())
    }

    /// Numeric item id for the first candidate name found in the id table,
    /// or "0"
    pub fn item_id(&self, candidates: &[&str]) -> String {
        candidates
            .iter()
            .filter(|name| !name.is_empty())
            .filter_map(|name| self.reference.item_ids.get(*name))
            .find(|id| !id.is_empty())
            .cloned()
            .unwrap_or_else(|| "0".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceData {
        let mut reference = ReferenceData::default();
        reference.catalog.insert(
            "aqua_simulacra".into(),
            CatalogEntry {
                name_en: Some("Aqua Simulacra".into()),
                name_ja: None,
                rarity: Some("5".into()),
            },
        );
        let words = &mut reference.words;
        words.en_to_ja.insert("Aqua Simulacra".into(), "若水".into());
        words.en_to_ja.insert("Mika".into(), "ミカ".into());
        words.en_to_ja_norm.insert("the catch".into(), "「漁獲」".into());
        words.zh_to_ja.insert("狼的末路".into(), "狼の末路".into());
        reference.item_ids.insert("Aqua Simulacra".into(), "15508".into());
        reference.item_ids.insert("ミカ".into(), "10000080".into());
        reference
    }

    #[test]
    fn test_normalize_en_key() {
        assert_eq!(normalize_en_key("  The_Catch  "), "the catch");
        assert_eq!(normalize_en_key("Wolf's\tGravestone"), "wolf's gravestone");
        assert_eq!(normalize_en_key(""), "");
    }

    #[test]
    fn test_derive_name_from_id() {
        assert_eq!(derive_name_from_id("skyward_harp"), "Skyward Harp");
        assert_eq!(derive_name_from_id("kamisato__ayaka"), "Kamisato Ayaka");
        assert_eq!(derive_name_from_id(""), "");
    }

    #[test]
    fn test_derive_name_known_bad_guesses() {
        // The heuristic cannot restore punctuation, articles or casing.
        assert_eq!(derive_name_from_id("wolfs_gravestone"), "Wolfs Gravestone");
        assert_eq!(derive_name_from_id("the_catch"), "The Catch");
        assert_eq!(derive_name_from_id("hu_tao"), "Hu Tao");
        assert_eq!(derive_name_from_id("favonius_warbow"), "Favonius Warbow");
        assert_eq!(derive_name_from_id("amos_bow"), "Amos Bow");
        assert_eq!(derive_name_from_id("traveler_anemo"), "Traveler Anemo");
    }

    #[test]
    fn test_catalog_english_wins() {
        let reference = reference();
        let names = NameResolver::new(&reference).resolve("aqua_simulacra", "若水", "ja");

        assert_eq!(names.name_en, "Aqua Simulacra");
        assert_eq!(names.name_ja, "若水");
    }

    #[test]
    fn test_catalog_english_outranks_derived_dictionary_hit() {
        let mut reference = reference();
        reference.catalog.insert(
            "aqua_simulacra_bow".into(),
            CatalogEntry {
                name_en: Some("Aqua Simulacra".into()),
                ..Default::default()
            },
        );
        reference.words.en_to_ja.insert("Aqua Simulacra Bow".into(), "誤訳".into());

        let names = NameResolver::new(&reference).resolve("aqua_simulacra_bow", "", "en");
        assert_eq!(names.name_en, "Aqua Simulacra");
        assert_eq!(names.name_ja, "若水");
    }

    #[test]
    fn test_derived_name_used_without_catalog() {
        let reference = reference();
        let names = NameResolver::new(&reference).resolve("mika", "Mika", "en");

        assert_eq!(names.name_en, "Mika");
        assert_eq!(names.name_ja, "ミカ");
    }

    #[test]
    fn test_normalized_match_for_english_candidates() {
        let reference = reference();
        let names = NameResolver::new(&reference).resolve("the_catch", "", "en");

        assert_eq!(names.name_en, "The Catch");
        assert_eq!(names.name_ja, "「漁獲」");
    }

    #[test]
    fn test_raw_name_normalized_only_as_english_candidate() {
        let mut reference = ReferenceData::default();
        reference.words.en_to_ja_norm.insert("the catch".into(), "「漁獲」".into());

        // empty id: the raw name becomes the english name, and only that
        // candidate is tried against the normalized table
        let names = NameResolver::new(&reference).resolve("", "THE  CATCH", "ja");
        assert_eq!(names.name_en, "THE  CATCH");
        assert_eq!(names.name_ja, "「漁獲」");
    }

    #[test]
    fn test_exact_match_beats_normalized() {
        let mut reference = ReferenceData::default();
        reference.words.en_to_ja.insert("Hu Tao".into(), "胡桃".into());
        reference.words.en_to_ja_norm.insert("hu tao".into(), "別名".into());

        let names = NameResolver::new(&reference).resolve("hu_tao", "", "ja");
        assert_eq!(names.name_en, "Hu Tao");
        assert_eq!(names.name_ja, "胡桃");
    }

    #[test]
    fn test_raw_name_not_normalized_when_other_candidates_differ() {
        let mut reference = ReferenceData::default();
        reference.catalog.insert(
            "catch_polearm".into(),
            CatalogEntry {
                name_en: Some("Fishing Spear".into()),
                ..Default::default()
            },
        );
        reference.words.en_to_ja_norm.insert("the catch".into(), "「漁獲」".into());

        // catalog says "Fishing Spear", derived is "Catch Polearm"; the raw
        // name only hits the table after normalization, which never happens
        let resolver = NameResolver::new(&reference);
        let names = resolver.resolve("catch_polearm", "THE  CATCH", "ja");
        assert_eq!(names.name_en, "Fishing Spear");
        assert_eq!(names.name_ja, "");

        reference.words.zh_to_ja.insert("THE  CATCH".into(), "漁獲".into());
        let names = NameResolver::new(&reference).resolve("catch_polearm", "THE  CATCH", "ja");
        assert_eq!(names.name_ja, "漁獲");
    }

    #[test]
    fn test_chinese_raw_name_fallback() {
        let reference = reference();
        let names = NameResolver::new(&reference).resolve("", "狼的末路", "ja");

        assert_eq!(names.name_en, "狼的末路");
        assert_eq!(names.name_ja, "狼の末路");
    }

    #[test]
    fn test_never_nameless_when_raw_name_present() {
        let reference = ReferenceData::default();
        let resolver = NameResolver::new(&reference);

        for locale in ["ja", "en", ""] {
            let names = resolver.resolve("", "Unknown Item", locale);
            assert!(!names.name_en.is_empty() || !names.name_ja.is_empty());
        }
    }

    #[test]
    fn test_empty_everything_stays_empty() {
        let reference = ReferenceData::default();
        let names = NameResolver::new(&reference).resolve("", "", "ja");
        assert_eq!(names, ResolvedNames::default());
    }

    #[test]
    fn test_rarity_and_item_id() {
        let reference = reference();
        let resolver = NameResolver::new(&reference);

        assert_eq!(resolver.rarity("aqua_simulacra").as_deref(), Some("5"));
        assert_eq!(resolver.rarity("mika"), None);
        assert_eq!(resolver.item_id(&["Mika", "", "ミカ"]), "10000080");
        assert_eq!(resolver.item_id(&["Nobody"]), "0");
    }

    #[test]
    fn test_empty_item_id_never_returned() {
        let mut reference = ReferenceData::default();
        reference.item_ids.insert("Blank".into(), String::new());
        reference.item_ids.insert("ブランク".into(), "11501".into());
        let resolver = NameResolver::new(&reference);

        assert_eq!(resolver.item_id(&["Blank"]), "0");
        assert_eq!(resolver.item_id(&["Blank", "ブランク"]), "11501");
    }
}

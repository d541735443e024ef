//! Reference data sources, in merge order

/// Language of a catalog table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogLang {
    English,
    Japanese,
}

/// What shape a source is expected to have and which table it feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `{ internal_id: { "name": ..., "rarity": ... } }`
    Catalog(CatalogLang),
    /// `{ canonical_name: numeric_item_id }`
    ItemIds,
    /// `[ { "en": ..., "ja": ..., "zhCN": ... } ]`
    Words,
}

#[derive(Debug)]
pub struct ReferenceSource {
    pub key: &'static str,
    pub url: &'static str,
    pub kind: SourceKind,
}

pub static WEAPONS_EN: ReferenceSource = ReferenceSource {
    key: "weapons_en",
    url: "https://raw.githubusercontent.com/MadeBaruna/paimon-moe/main/src/data/weapons/en.json",
    kind: SourceKind::Catalog(CatalogLang::English),
};

pub static WEAPONS_JA: ReferenceSource = ReferenceSource {
    key: "weapons_ja",
    url: "https://raw.githubusercontent.com/MadeBaruna/paimon-moe/main/src/data/weapons/ja.json",
    kind: SourceKind::Catalog(CatalogLang::Japanese),
};

pub static CHARACTERS_EN: ReferenceSource = ReferenceSource {
    key: "characters_en",
    url: "https://raw.githubusercontent.com/MadeBaruna/paimon-moe/main/src/data/furnishing/en.json",
    kind: SourceKind::Catalog(CatalogLang::English),
};

pub static CHARACTERS_JA: ReferenceSource = ReferenceSource {
    key: "characters_ja",
    url: "https://raw.githubusercontent.com/MadeBaruna/paimon-moe/main/src/data/furnishing/ja.json",
    kind: SourceKind::Catalog(CatalogLang::Japanese),
};

pub static UIGF_DICT_EN: ReferenceSource = ReferenceSource {
    key: "uigf_dict_en",
    url: "https://api.uigf.org/dict/genshin/en.json",
    kind: SourceKind::ItemIds,
};

pub static UIGF_DICT_JA: ReferenceSource = ReferenceSource {
    key: "uigf_dict_ja",
    url: "https://api.uigf.org/dict/genshin/jp.json",
    kind: SourceKind::ItemIds,
};

pub static GENSHIN_WORDS: ReferenceSource = ReferenceSource {
    key: "genshin_words",
    url: "https://dataset.genshin-dictionary.com/words.json",
    kind: SourceKind::Words,
};

/// All sources. Order matters: catalog fields and item ids are first-wins,
/// so English precedes Japanese and weapons precede characters.
pub static ALL_SOURCES: &[&ReferenceSource] = &[
    &WEAPONS_EN,
    &WEAPONS_JA,
    &CHARACTERS_EN,
    &CHARACTERS_JA,
    &UIGF_DICT_EN,
    &UIGF_DICT_JA,
    &GENSHIN_WORDS,
];

pub fn get_source(key: &str) -> Option<&'static ReferenceSource> {
    ALL_SOURCES.iter().copied().find(|s| s.key == key)
}

//! Stage 1: Paimon.moe export to UIGF v3

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::{lang_from_locale, parse_time, sort_chronologically, timezone_from_uid};
use super::{to_uigf_gacha_type, Chronological, TIME_FORMAT};
use crate::overrides::{Identity, OverrideMap, UnresolvedItem, UnresolvedItems};
use crate::parser::{lenient_i64, lenient_string, lenient_string_or_empty, PaimonExport, RawPull};
use crate::resolve::NameResolver;
use crate::reference::ReferenceData;

pub const UIGF_V3_VERSION: &str = "v3.0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoV3 {
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub uid: String,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub lang: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub export_timestamp: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub export_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub export_app: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub export_app_version: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub uigf_version: String,
    #[serde(default, deserialize_with = "lenient_i64", skip_serializing_if = "Option::is_none")]
    pub region_time_zone: Option<i64>,
}

/// UIGF v3 record. Read leniently so that hand-made v3 files with numeric
/// fields still convert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemV3 {
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub uigf_gacha_type: String,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub gacha_type: String,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub item_id: String,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub count: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub rank_type: Option<String>,
}

impl Chronological for ItemV3 {
    fn time(&self) -> &str {
        &self.time
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UigfV3 {
    #[serde(default)]
    pub info: InfoV3,
    #[serde(default)]
    pub list: Vec<ItemV3>,
}

/// Name and version written into export headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportApp {
    pub name: String,
    pub version: String,
}

/// Strictly increasing synthetic record ids for one run
#[derive(Debug, Clone)]
pub struct RecordIds {
    last: u128,
}

impl RecordIds {
    /// Seed from a numeric uid followed by six zeros, or from the clock when
    /// the uid is not numeric
    pub fn seeded(uid: &str, now_unix: i64) -> Self {
        let clock = || u128::try_from(now_unix).unwrap_or_default();
        if uid.is_empty() || !uid.bytes().all(|b| b.is_ascii_digit()) {
            return Self { last: clock() };
        }

        match format!("{}000000", uid).parse::<u128>() {
            Ok(last) => Self { last },
            Err(_) => {
                tracing::warn!(uid, "uid too long to seed record ids, using the clock");
                Self { last: clock() }
            }
        }
    }

    pub fn next_id(&mut self) -> String {
        self.last = self.last.saturating_add(1);
        self.last.to_string()
    }
}

/// Build one v3 record. Returns `None` when the pull has no parseable time.
pub fn build_record(
    pull: &RawPull,
    gacha_type: &str,
    identity: &Identity,
    item_id: String,
    record_id: String,
    lang: &str,
) -> Option<ItemV3> {
    if pull.time.is_empty() || parse_time(&pull.time).is_none() {
        return None;
    }

    let japanese = lang.eq_ignore_ascii_case("ja-jp");
    let preferred = if japanese {
        identity.name_ja.as_str()
    } else if !identity.name_en.is_empty() {
        identity.name_en.as_str()
    } else {
        identity.name_ja.as_str()
    };
    let name = if preferred.is_empty() {
        pull.name.clone()
    } else {
        preferred.to_string()
    };

    let item_type = match (pull.kind.to_lowercase().as_str(), japanese) {
        ("weapon", true) => Some("武器"),
        ("character", true) => Some("キャラクター"),
        ("weapon", false) => Some("Weapon"),
        ("character", false) => Some("Character"),
        _ => None,
    };

    Some(ItemV3 {
        uigf_gacha_type: to_uigf_gacha_type(gacha_type).to_string(),
        gacha_type: gacha_type.to_string(),
        item_id,
        time: pull.time.clone(),
        id: record_id,
        count: "1".to_string(),
        name: Some(name),
        item_type: item_type.map(str::to_string),
        rank_type: identity.rank.clone().filter(|r| !r.is_empty()),
    })
}

/// Result of stage 1
#[derive(Debug)]
pub struct V3Conversion {
    pub document: UigfV3,
    pub unresolved: UnresolvedItems,
    /// Pulls dropped for a missing or unparseable time
    pub dropped: usize,
}

pub struct V3Converter<'a> {
    resolver: NameResolver<'a>,
    overrides: &'a OverrideMap,
    app: &'a ExportApp,
}

impl<'a> V3Converter<'a> {
    pub fn new(reference: &'a ReferenceData, overrides: &'a OverrideMap, app: &'a ExportApp) -> Self {
        Self {
            resolver: NameResolver::new(reference),
            overrides,
            app,
        }
    }

    /// Resolve identity for one pull: names, catalog rarity, then curation
    pub fn identify(&self, pull: &RawPull, locale: &str) -> Identity {
        let names = self.resolver.resolve(&pull.id, &pull.name, locale);
        let identity = Identity {
            name_en: names.name_en,
            name_ja: names.name_ja,
            rank: self.resolver.rarity(&pull.id),
        };
        self.overrides.apply(&pull.id, identity)
    }

    pub fn convert(&self, export: &PaimonExport, now: DateTime<Local>) -> V3Conversion {
        let lang = lang_from_locale(&export.locale);
        let mut ids = RecordIds::seeded(&export.uid, now.timestamp());
        let mut list = Vec::with_capacity(export.pull_count());
        let mut unresolved = UnresolvedItems::new();
        let mut dropped = 0;

        for banner in &export.banners {
            for pull in &banner.pulls {
                let identity = self.identify(pull, &export.locale);
                let item_id = self
                    .resolver
                    .item_id(&[&identity.name_en[..], &pull.name[..], &identity.name_ja[..]]);
                let record_id = ids.next_id();

                match build_record(pull, banner.gacha_type, &identity, item_id, record_id, lang) {
                    Some(record) => list.push(record),
                    None => {
                        tracing::debug!(item = %pull.id, time = %pull.time, "dropping pull without a valid time");
                        dropped += 1;
                    }
                }

                if identity.rank.is_none() {
                    unresolved.record(UnresolvedItem {
                        pmoe_id: pull.id.clone(),
                        name_en: Some(identity.name_en),
                        name_jp: Some(identity.name_ja),
                        gacha_type: Some(banner.gacha_type.to_string()),
                    });
                }
            }
        }

        sort_chronologically(&mut list);

        let info = InfoV3 {
            uid: export.uid.clone(),
            lang: lang.to_string(),
            export_timestamp: Some(now.timestamp()),
            export_time: Some(now.format(TIME_FORMAT).to_string()),
            export_app: Some(self.app.name.clone()),
            export_app_version: Some(self.app.version.clone()),
            uigf_version: UIGF_V3_VERSION.to_string(),
            region_time_zone: Some(timezone_from_uid(&export.uid)),
        };

        V3Conversion {
            document: UigfV3 { info, list },
            unresolved,
            dropped,
        }
    }
}

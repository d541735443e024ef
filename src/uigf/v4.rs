//! Stage 2: UIGF v3 to UIGF v4.1

use serde::{Deserialize, Serialize};

use super::v3::{ItemV3, UigfV3};
use super::{sort_chronologically, to_uigf_gacha_type, Chronological};
use crate::error::{ConvertError, Result};

pub const DEFAULT_TARGET_VERSION: &str = "v4.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoV4 {
    pub export_timestamp: Option<i64>,
    pub export_app: Option<String>,
    pub export_app_version: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemV4 {
    pub uigf_gacha_type: String,
    pub gacha_type: String,
    pub item_id: String,
    pub time: String,
    pub id: String,
    pub count: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_type: Option<String>,
}

impl Chronological for ItemV4 {
    fn time(&self) -> &str {
        &self.time
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Genshin Impact account block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountV4 {
    pub uid: String,
    pub timezone: i64,
    pub lang: String,
    pub list: Vec<ItemV4>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UigfV4 {
    pub info: InfoV4,
    pub hk4e: Vec<AccountV4>,
}

/// Reject target versions this converter cannot produce
pub fn check_target_version(version: &str) -> Result<()> {
    if version.starts_with(DEFAULT_TARGET_VERSION) {
        Ok(())
    } else {
        Err(ConvertError::Config(format!(
            "unsupported UIGF target version: {} (supported: {})",
            version, DEFAULT_TARGET_VERSION
        )))
    }
}

fn convert_item(item: &ItemV3) -> Option<ItemV4> {
    if item.gacha_type.is_empty() || item.time.is_empty() || item.id.is_empty() {
        return None;
    }

    let uigf_source = if item.uigf_gacha_type.is_empty() {
        &item.gacha_type
    } else {
        &item.uigf_gacha_type
    };
    let count = if item.count.is_empty() { "1" } else { item.count.as_str() };

    Some(ItemV4 {
        uigf_gacha_type: to_uigf_gacha_type(uigf_source).to_string(),
        gacha_type: to_uigf_gacha_type(&item.gacha_type).to_string(),
        item_id: item.item_id.clone(),
        time: item.time.clone(),
        id: item.id.clone(),
        count: count.to_string(),
        name: item.name.clone(),
        item_type: item.item_type.clone(),
        rank_type: item.rank_type.clone(),
    })
}

/// Convert a v3 document into a single-account v4.x document
pub fn convert_v3_to_v4(doc: &UigfV3, target_version: &str) -> Result<UigfV4> {
    check_target_version(target_version)?;

    let info = &doc.info;
    let mut list: Vec<ItemV4> = doc.list.iter().filter_map(convert_item).collect();
    let skipped = doc.list.len() - list.len();
    if skipped > 0 {
        tracing::debug!(skipped, "v3 records without gacha type, time or id");
    }
    sort_chronologically(&mut list);

    let account = AccountV4 {
        uid: non_empty_or(&info.uid, "0"),
        timezone: info.region_time_zone.unwrap_or(8),
        lang: non_empty_or(&info.lang, "en-us"),
        list,
    };

    Ok(UigfV4 {
        info: InfoV4 {
            export_timestamp: info.export_timestamp,
            export_app: info.export_app.clone(),
            export_app_version: info.export_app_version.clone(),
            version: target_version.to_string(),
        },
        hk4e: vec![account],
    })
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

//! UIGF interchange documents and the conversions that produce them

pub mod v3;
pub mod v4;

pub use v3::*;
pub use v4::*;

use chrono::NaiveDateTime;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Gacha type alias: the second character event banner ("400") shares the
/// UIGF type of the first. No other alias is known.
pub fn to_uigf_gacha_type(gacha_type: &str) -> &str {
    if gacha_type == "400" {
        "301"
    } else {
        gacha_type
    }
}

pub fn parse_time(time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(time, TIME_FORMAT).ok()
}

/// UIGF language tag for an export locale
pub fn lang_from_locale(locale: &str) -> &'static str {
    match locale.to_lowercase().as_str() {
        "ja" => "ja-jp",
        _ => "en-us",
    }
}

/// Server timezone inferred from the first digit of the account id
pub fn timezone_from_uid(uid: &str) -> i64 {
    match uid.chars().next() {
        Some('6') => -5,
        Some('7') => 1,
        _ => 8,
    }
}

/// Records ordered by time, then by record id
pub trait Chronological {
    fn time(&self) -> &str;
    fn id(&self) -> &str;
}

pub fn sort_chronologically<T: Chronological>(records: &mut [T]) {
    records.sort_by(|a, b| a.time().cmp(b.time()).then_with(|| a.id().cmp(b.id())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gacha_type_alias() {
        assert_eq!(to_uigf_gacha_type("400"), "301");
        assert_eq!(to_uigf_gacha_type("301"), "301");
        assert_eq!(to_uigf_gacha_type("200"), "200");
        assert_eq!(to_uigf_gacha_type(""), "");
    }

    #[test]
    fn test_parse_time() {
        assert!(parse_time("2024-01-01 00:00:00").is_some());
        assert!(parse_time("2024-01-01T00:00:00").is_none());
        assert!(parse_time("2024-13-01 00:00:00").is_none());
        assert!(parse_time("").is_none());
    }

    #[test]
    fn test_lang_from_locale() {
        assert_eq!(lang_from_locale("ja"), "ja-jp");
        assert_eq!(lang_from_locale("JA"), "ja-jp");
        assert_eq!(lang_from_locale("en"), "en-us");
        assert_eq!(lang_from_locale("de"), "en-us");
    }

    #[test]
    fn test_timezone_from_uid() {
        assert_eq!(timezone_from_uid("612345678"), -5);
        assert_eq!(timezone_from_uid("700000001"), 1);
        assert_eq!(timezone_from_uid("812345678"), 8);
        assert_eq!(timezone_from_uid(""), 8);
    }
}

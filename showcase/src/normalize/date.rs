//! Best-effort date extraction.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::chain::ExtractorChain;
use crate::record::RawRecord;

/// Candidate date fields, highest priority first.
pub const DATE_FIELDS: [&str; 5] = ["date", "publishedAt", "published", "createdAt", "updatedAt"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Ordered list of date fields tried when picking a record's date.
///
/// The first non-empty candidate wins. If that value does not parse, the record is undated and gets
/// the empty string; later candidates are not consulted.
#[derive(Debug)]
pub struct DatePolicy {
    fields: Vec<&'static str>,
    chain: ExtractorChain,
}

impl Default for DatePolicy {
    fn default() -> Self {
        Self::new(DATE_FIELDS)
    }
}

impl DatePolicy {
    pub fn new(fields: impl IntoIterator<Item = &'static str>) -> Self {
        let fields: Vec<&'static str> = fields.into_iter().collect();
        let chain = fields.iter().fold(ExtractorChain::new("date"), |chain, &key| chain.field(key));
        Self { fields, chain }
    }

    #[inline]
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// The winning date string, or `""` when it is missing or unparseable.
    pub fn pick(&self, raw: &RawRecord) -> String {
        self.candidate(raw)
            .filter(|value| parse_date(value).is_some())
            .unwrap_or_default()
    }

    /// The winning date parsed to UTC.
    pub fn timestamp(&self, raw: &RawRecord) -> Option<DateTime<Utc>> {
        self.candidate(raw).and_then(|value| parse_date(&value))
    }

    fn candidate(&self, raw: &RawRecord) -> Option<String> {
        let (index, value) = self.chain.first_match(raw)?;
        if parse_date(&value).is_none() {
            log::debug!(
                "{} field {:?} holds unparseable value {:?}",
                self.chain.name(),
                self.fields[index],
                value
            );
        }
        Some(value)
    }
}

/// Parse the date shapes editorial content tends to use. Naive values are taken as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc());
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    // Year and month only, e.g. "2024-06".
    if trimmed.len() == 7
        && let Ok(date) = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
    {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        RawRecord::from_value(value).expect("fixture should be an object")
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).single().expect("valid fixture date")
    }

    #[test]
    fn parses_common_editorial_formats() {
        assert_eq!(parse_date("2024-01-01"), Some(utc(2024, 1, 1, 0, 0, 0)));
        assert_eq!(parse_date("2024/03/05"), Some(utc(2024, 3, 5, 0, 0, 0)));
        assert_eq!(parse_date("2024-06"), Some(utc(2024, 6, 1, 0, 0, 0)));
        assert_eq!(parse_date("2024-01-01T10:30"), Some(utc(2024, 1, 1, 10, 30, 0)));
        assert_eq!(parse_date("2024-01-01T10:30:15"), Some(utc(2024, 1, 1, 10, 30, 15)));
        assert_eq!(parse_date("2024-01-01T10:30:15+02:00"), Some(utc(2024, 1, 1, 8, 30, 15)));
        assert_eq!(parse_date("2024-01-01T10:30:15.250Z").map(|d| d.timestamp()), Some(1_704_105_015));
        assert_eq!(
            parse_date("Tue, 1 Jul 2003 10:52:37 +0200"),
            Some(utc(2003, 7, 1, 8, 52, 37))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn pick_follows_field_priority() {
        let policy = DatePolicy::default();
        let raw = record(json!({
            "updatedAt": "2024-09-01",
            "publishedAt": "2024-06-01",
            "createdAt": "2024-01-01"
        }));

        assert_eq!(policy.pick(&raw), "2024-06-01");
        assert_eq!(policy.timestamp(&raw), Some(utc(2024, 6, 1, 0, 0, 0)));
    }

    #[test]
    fn unparseable_first_candidate_leaves_the_record_undated() {
        let policy = DatePolicy::default();
        let raw = record(json!({"date": "TBC", "published": "2023-02-14"}));

        assert_eq!(policy.pick(&raw), "");
        assert_eq!(policy.timestamp(&raw), None);
    }

    #[test]
    fn blank_candidates_are_skipped() {
        let policy = DatePolicy::default();
        let raw = record(json!({"date": "", "publishedAt": null, "published": "2023-02-14"}));

        assert_eq!(policy.pick(&raw), "2023-02-14");
    }

    #[test]
    fn no_parseable_candidate_yields_empty_string() {
        let policy = DatePolicy::default();
        let raw = record(json!({"date": "", "createdAt": "someday", "updatedAt": "2024-01-01"}));

        assert_eq!(policy.pick(&raw), "");
        assert_eq!(policy.timestamp(&raw), None);
    }

    #[test]
    fn custom_policy_changes_precedence() {
        let policy = DatePolicy::new(["updatedAt", "date"]);
        let raw = record(json!({"date": "2024-01-01", "updatedAt": "2024-02-01"}));

        assert_eq!(policy.fields(), &["updatedAt", "date"]);
        assert_eq!(policy.pick(&raw), "2024-02-01");
    }
}

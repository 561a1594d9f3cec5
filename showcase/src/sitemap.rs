//! Sitemap derivation.
//!
//! Static pages come first, then one entry per product, case study and news record that carries a
//! slug, in source order. `lastModified` uses the same date rule as the feed and falls back to the
//! caller-supplied `now`.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SitemapSettings;
use crate::normalize::DatePolicy;
use crate::record::{Family, SourceRecord};
use crate::source::ContentSources;

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
}

/// Builds sitemap entries for one base URL.
#[derive(Debug)]
pub struct SitemapBuilder<'a> {
    base_url: String,
    settings: &'a SitemapSettings,
    policy: &'a DatePolicy,
    now: DateTime<Utc>,
}

impl<'a> SitemapBuilder<'a> {
    /// `base_url` is used verbatim apart from trailing slashes; validate it upstream
    /// (see [`crate::config::SiteConfig::base_url`]).
    pub fn new(base_url: &str, settings: &'a SitemapSettings, policy: &'a DatePolicy, now: DateTime<Utc>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            settings,
            policy,
            now,
        }
    }

    pub fn build(&self, sources: &ContentSources) -> Vec<SitemapEntry> {
        let mut entries: Vec<SitemapEntry> = self
            .settings
            .static_pages
            .iter()
            .map(|page| SitemapEntry {
                url: self.url_for(&page.path),
                last_modified: self.now,
                change_frequency: page.change_frequency,
                priority: page.priority,
            })
            .collect();

        for record in sources.tagged() {
            match self.record_entry(&record) {
                Some(entry) => entries.push(entry),
                None => log::debug!("skipped {} record without a slug", record.family().collection()),
            }
        }

        entries
    }

    fn record_entry(&self, record: &SourceRecord) -> Option<SitemapEntry> {
        let slug = record.slug()?;
        let family = record.family();
        Some(SitemapEntry {
            url: self.url_for(&format!("/{}/{}", family.collection(), slug)),
            last_modified: self.policy.timestamp(record.raw()).unwrap_or(self.now),
            change_frequency: self.settings.change_frequency,
            priority: self.priority(family),
        })
    }

    fn priority(&self, family: Family) -> f64 {
        match family {
            Family::Product => self.settings.product_priority,
            Family::CaseStudy => self.settings.case_study_priority,
            Family::News => self.settings.news_priority,
        }
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

/// Build the full sitemap with the shared date policy.
pub fn build_sitemap(
    base_url: &str,
    settings: &SitemapSettings,
    sources: &ContentSources,
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    SitemapBuilder::new(base_url, settings, crate::normalize::date_policy(), now).build(sources)
}

/// Render entries as a sitemaps.org `<urlset>` document.
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 160);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(xml, "<urlset xmlns=\"{SITEMAP_NAMESPACE}\">");
    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.url));
        let _ = writeln!(
            xml,
            "    <lastmod>{}</lastmod>",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let _ = writeln!(xml, "    <changefreq>{}</changefreq>", entry.change_frequency.as_str());
        let _ = writeln!(xml, "    <priority>{:.1}</priority>", entry.priority);
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Escape the five XML special characters.
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).single().expect("valid date")
    }

    fn records(value: serde_json::Value) -> Vec<RawRecord> {
        crate::source::extract_records(value, Family::Product)
    }

    #[test]
    fn escape_xml_handles_special_characters() {
        assert_eq!(escape_xml("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&apos;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn static_pages_use_now_and_configured_priority() {
        let settings = SitemapSettings::default();
        let entries = build_sitemap("https://thecurry.club/", &settings, &ContentSources::default(), now());

        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].url, "https://thecurry.club/");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[1].url, "https://thecurry.club/how-it-works");
        assert!(entries.iter().all(|e| e.last_modified == now()));
        assert!(entries.iter().all(|e| e.change_frequency == ChangeFrequency::Weekly));
    }

    #[test]
    fn record_pages_skip_missing_slugs_and_fall_back_to_now() {
        let mut settings = SitemapSettings::default();
        settings.static_pages.clear();
        let sources = ContentSources::new(
            records(json!([{"slug": "launch", "date": "2024-01-01"}, {"title": "no slug"}])),
            records(json!([
                {"slug": "office", "updatedAt": "2024-02-02"},
                {"slug": "tbc", "date": "bad", "publishedAt": "2024-03-03"}
            ])),
            records(json!([{"slug": "korma"}, {"slug": ""}])),
        );

        let entries = build_sitemap("https://thecurry.club", &settings, &sources, now());
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://thecurry.club/products/korma",
                "https://thecurry.club/case-studies/office",
                "https://thecurry.club/case-studies/tbc",
                "https://thecurry.club/news/launch",
            ]
        );

        assert_eq!(entries[0].last_modified, now());
        assert_eq!(entries[0].priority, 0.6);
        assert_eq!(
            entries[1].last_modified,
            Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).single().expect("valid date")
        );
        // An unparseable first date field leaves the record undated.
        assert_eq!(entries[2].last_modified, now());
        assert_eq!(entries[3].priority, 0.5);
    }

    #[test]
    fn renders_xml_document() {
        let entries = vec![SitemapEntry {
            url: "https://example.com/search?a=1&b=2".to_string(),
            last_modified: now(),
            change_frequency: ChangeFrequency::Daily,
            priority: 0.8,
        }];

        let xml = render_xml(&entries);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains("<loc>https://example.com/search?a=1&amp;b=2</loc>"));
        assert!(xml.contains("<lastmod>2025-03-01T12:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn entries_serialize_with_camel_case_keys() {
        let entry = SitemapEntry {
            url: "https://example.com/".to_string(),
            last_modified: now(),
            change_frequency: ChangeFrequency::Weekly,
            priority: 1.0,
        };
        let value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(value["lastModified"], json!("2025-03-01T12:00:00Z"));
        assert_eq!(value["changeFrequency"], json!("weekly"));
    }
}

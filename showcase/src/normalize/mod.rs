//! Record normalization.
//!
//! Turns [`RawRecord`]s into the canonical shapes consumed by the feed, catalog and sitemap. Every
//! function here is infallible: a missing or malformed field degrades to a documented default
//! (empty string, empty list, `#` link, [`HeatLevel::Mild`]).

pub mod chain;
pub mod date;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

pub use chain::{Extractor, ExtractorChain};
pub use date::{DATE_FIELDS, DatePolicy, parse_date};

use crate::record::{Family, RawRecord, SourceRecord};

pub const UNTITLED_NEWS: &str = "Untitled";
pub const UNTITLED_CASE_STUDY: &str = "Untitled case study";
pub const PLACEHOLDER_HREF: &str = "#";
const SUMMARY_GOALS: usize = 2;
const GOAL_SEPARATOR: &str = " • ";

static DATE_POLICY: Lazy<DatePolicy> = Lazy::new(DatePolicy::default);

static NEWS_HREF: Lazy<ExtractorChain> = Lazy::new(|| {
    ExtractorChain::new("news href")
        .field("url")
        .then(|raw| detail_path(Family::News, raw))
});

static CASE_STUDY_HREF: Lazy<ExtractorChain> =
    Lazy::new(|| ExtractorChain::new("case study href").then(|raw| detail_path(Family::CaseStudy, raw)));

static NEWS_TITLE: Lazy<ExtractorChain> = Lazy::new(|| ExtractorChain::new("news title").field("title"));

static CASE_STUDY_TITLE: Lazy<ExtractorChain> =
    Lazy::new(|| ExtractorChain::new("case study title").field("title"));

/// The date policy shared by the feed and the sitemap.
pub fn date_policy() -> &'static DatePolicy {
    &DATE_POLICY
}

/// `/{collection}/{slug}` for records carrying a slug.
pub fn detail_path(family: Family, raw: &RawRecord) -> Option<String> {
    raw.text("slug").map(|slug| format!("/{}/{}", family.collection(), slug))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    News,
    CaseStudy,
}

impl FeedKind {
    pub const fn label(self) -> &'static str {
        match self {
            FeedKind::News => "News",
            FeedKind::CaseStudy => "Case Study",
        }
    }
}

/// One entry of the insights feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeedItem {
    pub kind: FeedKind,
    /// Winning date candidate as written in the source, or `""`.
    pub date: String,
    pub title: String,
    pub href: String,
    pub summary: String,
    /// Family-specific display fields (`author` for news, `sector` for case studies).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, JsonValue>,
}

impl NormalizedFeedItem {
    /// Parsed form of [`Self::date`]; `None` sorts last.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }

    pub fn extra_text(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(JsonValue::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum HeatLevel {
    #[default]
    Mild,
    Medium,
    Hot,
}

impl HeatLevel {
    pub const ALL: [HeatLevel; 3] = [HeatLevel::Mild, HeatLevel::Medium, HeatLevel::Hot];

    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            HeatLevel::Mild => "Mild",
            HeatLevel::Medium => "Medium",
            HeatLevel::Hot => "Hot",
        }
    }

    /// Case-insensitive parse of a heat label.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(trimmed))
    }

    /// Heat level of a product record, defaulting to mild.
    pub fn from_raw(raw: &RawRecord) -> Self {
        match raw.text("heat") {
            Some(value) => Self::parse(&value).unwrap_or_else(|| {
                log::debug!("unrecognised heat level {value:?}, defaulting to Mild");
                HeatLevel::Mild
            }),
            None => HeatLevel::Mild,
        }
    }
}

impl std::fmt::Display for HeatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A product with every field populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub heat: HeatLevel,
    pub tags: Vec<String>,
    pub diet: Vec<String>,
    pub allergens: Vec<String>,
    pub category: String,
}

impl NormalizedProduct {
    /// Detail page path, if the product has a slug.
    pub fn href(&self) -> Option<String> {
        (!self.slug.is_empty()).then(|| format!("/{}/{}", Family::Product.collection(), self.slug))
    }
}

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Feed(NormalizedFeedItem),
    Product(NormalizedProduct),
}

/// Normalize a tagged record according to its family.
pub fn normalize(record: &SourceRecord) -> Normalized {
    match record {
        SourceRecord::News(raw) => Normalized::Feed(normalize_news(raw)),
        SourceRecord::CaseStudy(raw) => Normalized::Feed(normalize_case_study(raw)),
        SourceRecord::Product(raw) => Normalized::Product(normalize_product(raw)),
    }
}

pub fn normalize_news(raw: &RawRecord) -> NormalizedFeedItem {
    let mut extra = Map::new();
    if let Some(author) = raw.text("author") {
        extra.insert("author".to_string(), JsonValue::String(author));
    }

    NormalizedFeedItem {
        kind: FeedKind::News,
        date: DATE_POLICY.pick(raw),
        title: NEWS_TITLE.resolve(raw, UNTITLED_NEWS),
        href: NEWS_HREF.resolve(raw, PLACEHOLDER_HREF),
        summary: raw.text_or_empty("summary"),
        extra,
    }
}

pub fn normalize_case_study(raw: &RawRecord) -> NormalizedFeedItem {
    let mut extra = Map::new();
    if let Some(sector) = raw.text("sector") {
        extra.insert("sector".to_string(), JsonValue::String(sector));
    }

    let summary = raw
        .list("goals")
        .into_iter()
        .filter(|goal| !goal.trim().is_empty())
        .take(SUMMARY_GOALS)
        .collect::<Vec<_>>()
        .join(GOAL_SEPARATOR);

    NormalizedFeedItem {
        kind: FeedKind::CaseStudy,
        date: DATE_POLICY.pick(raw),
        title: CASE_STUDY_TITLE.resolve(raw, UNTITLED_CASE_STUDY),
        href: CASE_STUDY_HREF.resolve(raw, PLACEHOLDER_HREF),
        summary,
        extra,
    }
}

pub fn normalize_product(raw: &RawRecord) -> NormalizedProduct {
    NormalizedProduct {
        slug: raw.text_or_empty("slug"),
        name: raw.text_or_empty("name"),
        description: raw.text_or_empty("description"),
        image: raw.text_or_empty("image"),
        heat: HeatLevel::from_raw(raw),
        tags: raw.list("tags"),
        diet: raw.list("diet"),
        allergens: raw.list("allergens"),
        category: raw.text_or_empty("category"),
    }
}

pub fn normalize_products(records: &[RawRecord]) -> Vec<NormalizedProduct> {
    records.iter().map(normalize_product).collect()
}

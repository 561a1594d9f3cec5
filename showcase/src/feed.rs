//! Insights feed: news and case studies merged into one date-ordered list.

use std::cmp::Reverse;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ShowcaseError;
use crate::normalize::{FeedKind, NormalizedFeedItem, normalize_case_study, normalize_news};
use crate::record::RawRecord;

/// Tab selector over the merged feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedTab {
    #[default]
    All,
    News,
    #[serde(rename = "cases")]
    CaseStudies,
}

impl FeedTab {
    pub const ALL: [FeedTab; 3] = [FeedTab::All, FeedTab::News, FeedTab::CaseStudies];

    pub const fn as_str(self) -> &'static str {
        match self {
            FeedTab::All => "all",
            FeedTab::News => "news",
            FeedTab::CaseStudies => "cases",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FeedTab::All => "All",
            FeedTab::News => "News",
            FeedTab::CaseStudies => "Case Studies",
        }
    }

    #[inline]
    pub fn admits(self, kind: FeedKind) -> bool {
        match self {
            FeedTab::All => true,
            FeedTab::News => kind == FeedKind::News,
            FeedTab::CaseStudies => kind == FeedKind::CaseStudy,
        }
    }
}

impl FromStr for FeedTab {
    type Err = ShowcaseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(FeedTab::All),
            "news" => Ok(FeedTab::News),
            "cases" | "case-studies" | "case_studies" => Ok(FeedTab::CaseStudies),
            other => Err(ShowcaseError::invalid_request(format!("Unsupported feed tab: {other}"))),
        }
    }
}

/// Concatenate news then case studies and sort by descending date.
///
/// The sort is stable: equal dates keep their input order, and items without a parseable date go
/// after every dated item.
pub fn merge_feed(news: Vec<NormalizedFeedItem>, case_studies: Vec<NormalizedFeedItem>) -> Vec<NormalizedFeedItem> {
    let mut merged = news;
    merged.extend(case_studies);
    merged.sort_by_cached_key(|item| Reverse(item.timestamp()));
    merged
}

/// Restrict a merged feed to one tab, preserving order.
pub fn filter_tab(items: &[NormalizedFeedItem], tab: FeedTab) -> Vec<&NormalizedFeedItem> {
    items.iter().filter(|item| tab.admits(item.kind)).collect()
}

/// Normalize and merge raw collections in one step.
pub fn build_feed(news: &[RawRecord], case_studies: &[RawRecord]) -> Vec<NormalizedFeedItem> {
    let news: Vec<_> = news.iter().map(normalize_news).collect();
    let case_studies: Vec<_> = case_studies.iter().map(normalize_case_study).collect();
    log::debug!(
        "merging {} news posts and {} case studies",
        news.len(),
        case_studies.len()
    );
    merge_feed(news, case_studies)
}

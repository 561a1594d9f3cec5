//! Loading bundled content collections.
//!
//! Collections are plain JSON documents. A document is either an array of records or an object
//! exposing the array under an export key (for example `{"products": [...]}` or `{"default": [...]}`).
//! Shapes that carry no array load as an empty collection.

use std::path::Path;

use serde_json::Value as JsonValue;

use crate::config::SiteConfig;
use crate::errors::{ShowcaseError, ShowcaseResult};
use crate::record::{Family, RawRecord, SourceRecord};

const DEFAULT_EXPORT: &str = "default";

/// Export keys checked for a family, in order, before `default`.
pub const fn export_keys(family: Family) -> &'static [&'static str] {
    match family {
        Family::News => &["posts", "news"],
        Family::CaseStudy => &["cases", "caseStudies"],
        Family::Product => &["products"],
    }
}

/// The three content collections, injected into every component that needs them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentSources {
    pub news: Vec<RawRecord>,
    pub case_studies: Vec<RawRecord>,
    pub products: Vec<RawRecord>,
}

impl ContentSources {
    pub fn new(news: Vec<RawRecord>, case_studies: Vec<RawRecord>, products: Vec<RawRecord>) -> Self {
        Self {
            news,
            case_studies,
            products,
        }
    }

    /// Load every collection configured in `config`.
    pub fn load(config: &SiteConfig) -> ShowcaseResult<Self> {
        let load = |path: Option<&Path>, family: Family| -> ShowcaseResult<Vec<RawRecord>> {
            match path {
                Some(path) => load_collection(&config.resolve(path), family),
                None => {
                    log::debug!("no source configured for {}", family.collection());
                    Ok(Vec::new())
                }
            }
        };

        Ok(Self {
            news: load(config.sources.news.as_deref(), Family::News)?,
            case_studies: load(config.sources.cases.as_deref(), Family::CaseStudy)?,
            products: load(config.sources.products.as_deref(), Family::Product)?,
        })
    }

    pub fn records(&self, family: Family) -> &[RawRecord] {
        match family {
            Family::News => &self.news,
            Family::CaseStudy => &self.case_studies,
            Family::Product => &self.products,
        }
    }

    /// Every record tagged with its family, products first, then case studies, then news.
    pub fn tagged(&self) -> impl Iterator<Item = SourceRecord> + '_ {
        [Family::Product, Family::CaseStudy, Family::News]
            .into_iter()
            .flat_map(move |family| {
                self.records(family)
                    .iter()
                    .cloned()
                    .map(move |raw| SourceRecord::tagged(family, raw))
            })
    }
}

/// Read and parse one collection file.
pub fn load_collection(path: &Path, family: Family) -> ShowcaseResult<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| ShowcaseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: JsonValue = serde_json::from_str(&content).map_err(|source| ShowcaseError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let records = extract_records(value, family);
    log::debug!(
        "loaded {} {} records from {}",
        records.len(),
        family.collection(),
        path.display()
    );
    Ok(records)
}

/// Pull the record array out of a parsed collection document.
pub fn extract_records(value: JsonValue, family: Family) -> Vec<RawRecord> {
    let items = match value {
        JsonValue::Array(items) => items,
        JsonValue::Object(mut exports) => {
            let key = export_keys(family)
                .iter()
                .copied()
                .chain(std::iter::once(DEFAULT_EXPORT))
                .find(|key| matches!(exports.get(*key), Some(JsonValue::Array(_))));
            match key.and_then(|key| exports.remove(key)) {
                Some(JsonValue::Array(items)) => items,
                _ => {
                    log::warn!("no {} array found in collection exports", family.collection());
                    return Vec::new();
                }
            }
        }
        other => {
            log::warn!(
                "{} collection is not an array or object (found {}), treating as empty",
                family.collection(),
                json_kind(&other)
            );
            return Vec::new();
        }
    };

    let total = items.len();
    let records: Vec<RawRecord> = items.into_iter().filter_map(RawRecord::from_value).collect();
    if records.len() < total {
        log::warn!(
            "skipped {} non-object entries in {} collection",
            total - records.len(),
            family.collection()
        );
    }
    records
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

//! Boundary types for loosely-shaped content records.
//!
//! Content collections arrive as arrays of JSON objects where any field may be missing or carry the
//! wrong type. [`RawRecord`] wraps one such object and exposes lenient accessors; [`SourceRecord`] tags a
//! record with the collection it came from so that normalization can pick the right rules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Content family a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    News,
    CaseStudy,
    Product,
}

impl Family {
    /// Path segment the family's detail pages live under.
    #[inline]
    pub const fn collection(self) -> &'static str {
        match self {
            Family::News => "news",
            Family::CaseStudy => "case-studies",
            Family::Product => "products",
        }
    }
}

/// An unvalidated JSON object from an external content collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, JsonValue>);

impl RawRecord {
    pub fn new(fields: Map<String, JsonValue>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON value, returning `None` for anything that is not an object.
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    #[inline]
    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    /// Non-empty textual value of a field.
    ///
    /// Strings are returned as-is when non-empty, numbers are rendered. Booleans, arrays, objects and
    /// null count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_text)
    }

    /// String value of a field or the empty string.
    pub fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    /// Coerce a field into a list of strings.
    ///
    /// Arrays pass through element by element (null and nested values have no text and are dropped).
    /// A truthy scalar becomes a singleton; absent, null, `""`, `0` and `false` become an empty list.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(JsonValue::Array(items)) => items.iter().filter_map(element_text).collect(),
            Some(JsonValue::Number(n)) if n.as_f64() == Some(0.0) => Vec::new(),
            Some(JsonValue::Bool(false)) => Vec::new(),
            Some(other) => element_text(other).filter(|value| !value.is_empty()).into_iter().collect(),
            None => Vec::new(),
        }
    }
}

impl From<Map<String, JsonValue>> for RawRecord {
    fn from(value: Map<String, JsonValue>) -> Self {
        Self(value)
    }
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn element_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A raw record tagged with the collection it was read from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceRecord {
    News(RawRecord),
    CaseStudy(RawRecord),
    Product(RawRecord),
}

impl SourceRecord {
    pub fn family(&self) -> Family {
        match self {
            SourceRecord::News(_) => Family::News,
            SourceRecord::CaseStudy(_) => Family::CaseStudy,
            SourceRecord::Product(_) => Family::Product,
        }
    }

    pub fn raw(&self) -> &RawRecord {
        match self {
            SourceRecord::News(raw) | SourceRecord::CaseStudy(raw) | SourceRecord::Product(raw) => raw,
        }
    }

    /// Tag a raw record with a family.
    pub fn tagged(family: Family, raw: RawRecord) -> Self {
        match family {
            Family::News => SourceRecord::News(raw),
            Family::CaseStudy => SourceRecord::CaseStudy(raw),
            Family::Product => SourceRecord::Product(raw),
        }
    }

    /// Non-empty slug, used for detail page links.
    pub fn slug(&self) -> Option<String> {
        self.raw().text("slug")
    }
}

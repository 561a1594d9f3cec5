use serde::{Deserialize, Serialize};

use super::ProductFilter;

/// Heat selector value that disables the heat predicate.
pub const ALL_HEAT: &str = "All";
/// Category selector value that disables the category predicate.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Selectors of the products page.
///
/// Field names follow the page's URL parameters (`q`, `heat`, `cat`), so a query deserializes
/// directly from a query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_heat")]
    pub heat: String,
    #[serde(rename = "cat", default = "default_category")]
    pub category: String,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            heat: default_heat(),
            category: default_category(),
        }
    }
}

fn default_heat() -> String {
    ALL_HEAT.to_string()
}

fn default_category() -> String {
    ALL_CATEGORIES.to_string()
}

impl CatalogQuery {
    pub fn new(q: impl Into<String>, heat: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            heat: heat.into(),
            category: category.into(),
        }
    }

    /// Parse `q`, `heat` and `cat` from a URL query string (with or without a leading `?`).
    ///
    /// Missing parameters keep their defaults; unknown parameters are ignored. When a parameter repeats,
    /// the first occurrence wins.
    pub fn from_query_string(query: &str) -> Self {
        let mut parsed = Self::default();
        let (mut seen_q, mut seen_heat, mut seen_cat) = (false, false, false);

        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "q" if !seen_q => {
                    parsed.q = value.into_owned();
                    seen_q = true;
                }
                "heat" if !seen_heat => {
                    parsed.heat = value.into_owned();
                    seen_heat = true;
                }
                "cat" if !seen_cat => {
                    parsed.category = value.into_owned();
                    seen_cat = true;
                }
                _ => {}
            }
        }

        parsed
    }

    /// Render back to a query string, omitting selectors at their defaults.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if self.text_active() {
            serializer.append_pair("q", &self.q);
        }
        if self.heat_active() {
            serializer.append_pair("heat", &self.heat);
        }
        if self.category_active() {
            serializer.append_pair("cat", &self.category);
        }
        serializer.finish()
    }

    #[inline]
    pub fn text_active(&self) -> bool {
        !self.q.trim().is_empty()
    }

    #[inline]
    pub fn heat_active(&self) -> bool {
        let heat = self.heat.trim();
        !heat.is_empty() && !heat.eq_ignore_ascii_case(ALL_HEAT)
    }

    #[inline]
    pub fn category_active(&self) -> bool {
        let category = self.category.trim();
        !category.is_empty() && !category.eq_ignore_ascii_case(ALL_CATEGORIES)
    }

    /// Condition tree for the active selectors, ANDed together.
    pub fn to_filter(&self) -> ProductFilter {
        let mut conditions = Vec::with_capacity(3);
        if self.text_active() {
            conditions.push(ProductFilter::text_contains(&self.q));
        }
        if self.heat_active() {
            conditions.push(ProductFilter::heat_eq(&self.heat));
        }
        if self.category_active() {
            conditions.push(ProductFilter::category_eq(&self.category));
        }
        ProductFilter::And(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_every_predicate() {
        let query = CatalogQuery::default();
        assert_eq!(query.heat, "All");
        assert_eq!(query.category, "All Categories");
        assert!(!query.text_active() && !query.heat_active() && !query.category_active());
        assert_eq!(query.to_filter(), ProductFilter::And(Vec::new()));
    }

    #[test]
    fn parses_page_parameters() {
        let query = CatalogQuery::from_query_string("?q=chicken+korma&heat=Mild&cat=Rice%20Dishes&page=2");
        assert_eq!(query, CatalogQuery::new("chicken korma", "Mild", "Rice Dishes"));
    }

    #[test]
    fn missing_parameters_keep_defaults() {
        let query = CatalogQuery::from_query_string("heat=hot");
        assert_eq!(query.q, "");
        assert_eq!(query.heat, "hot");
        assert_eq!(query.category, ALL_CATEGORIES);
    }

    #[test]
    fn first_repeated_parameter_wins() {
        let query = CatalogQuery::from_query_string("q=dal&q=naan");
        assert_eq!(query.q, "dal");
    }

    #[test]
    fn query_string_round_trips_active_selectors() {
        let query = CatalogQuery::new("paneer", ALL_HEAT, "Vegetarian");
        let rendered = query.to_query_string();
        assert_eq!(rendered, "q=paneer&cat=Vegetarian");
        assert_eq!(CatalogQuery::from_query_string(&rendered), query);
        assert_eq!(CatalogQuery::default().to_query_string(), "");
    }

    #[test]
    fn sentinels_are_recognised_ignoring_case() {
        let query = CatalogQuery::new("", "all", "all categories");
        assert!(!query.heat_active());
        assert!(!query.category_active());
    }

    #[test]
    fn deserializes_with_defaults() {
        let query: CatalogQuery = serde_json::from_str(r#"{"q": "dal"}"#).expect("query should parse");
        assert_eq!(query, CatalogQuery::new("dal", ALL_HEAT, ALL_CATEGORIES));
    }
}

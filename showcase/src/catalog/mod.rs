//! # Product catalog search
//!
//! In-memory filtering of the normalized product catalog.
//!
//! A [`CatalogQuery`] carries the three selectors the products page exposes (free text, heat level,
//! category). [`CatalogQuery::to_filter`] turns the active selectors into a [`ProductFilter`]
//! condition tree; inactive selectors contribute nothing, so an all-default query matches
//! everything.
//!
//! | Selector   | Inactive value     | Match rule                                                   |
//! |------------|--------------------|--------------------------------------------------------------|
//! | `q`        | blank after trim   | substring of name, description, joined tags or joined diet   |
//! | `heat`     | `All`              | exact heat label, ignoring case                              |
//! | `cat`      | `All Categories`   | exact category, ignoring case                                |
//!
//! All matching is case-insensitive.

pub mod query;

use std::collections::BTreeSet;

pub use query::{ALL_CATEGORIES, ALL_HEAT, CatalogQuery};

use crate::normalize::NormalizedProduct;

/// Searchable text fields of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Description,
    Tags,
    Diet,
}

impl TextField {
    pub const SEARCHABLE: [TextField; 4] = [TextField::Name, TextField::Description, TextField::Tags, TextField::Diet];

    /// Lower-cased haystack for this field; list fields are space-joined.
    fn haystack(self, product: &NormalizedProduct) -> String {
        match self {
            TextField::Name => product.name.to_lowercase(),
            TextField::Description => product.description.to_lowercase(),
            TextField::Tags => product.tags.join(" ").to_lowercase(),
            TextField::Diet => product.diet.join(" ").to_lowercase(),
        }
    }
}

/// A composable product predicate.
///
/// Leaf conditions test one aspect of a product; `And` and `Or` combine them. An empty `And` matches
/// everything and an empty `Or` matches nothing.
///
/// # Examples
///
/// ```
/// use showcase::catalog::ProductFilter;
///
/// use showcase::catalog::TextField;
///
/// let filter = ProductFilter::and([
///     ProductFilter::field_contains(TextField::Name, "korma"),
///     ProductFilter::heat_eq("mild"),
/// ]);
/// assert_eq!(filter.len(), 2);
///
/// // Free-text search is an `Or` across every searchable field.
/// assert_eq!(ProductFilter::text_contains("korma").len(), TextField::SEARCHABLE.len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    /// Case-insensitive substring match against one field.
    TextContains { field: TextField, needle: String },
    /// Case-insensitive exact match against the heat label.
    HeatEquals { value: String },
    /// Case-insensitive exact match against the category.
    CategoryEquals { value: String },
    And(Vec<ProductFilter>),
    Or(Vec<ProductFilter>),
}

impl ProductFilter {
    /// Substring search in one field. The needle is trimmed and lower-cased.
    #[inline]
    pub fn field_contains(field: TextField, needle: impl AsRef<str>) -> Self {
        Self::TextContains {
            field,
            needle: needle.as_ref().trim().to_lowercase(),
        }
    }

    /// Substring search across every searchable field.
    pub fn text_contains(needle: impl AsRef<str>) -> Self {
        let needle = needle.as_ref();
        Self::or(TextField::SEARCHABLE.map(|field| Self::field_contains(field, needle)))
    }

    #[inline]
    pub fn heat_eq(value: impl AsRef<str>) -> Self {
        Self::HeatEquals {
            value: value.as_ref().trim().to_lowercase(),
        }
    }

    #[inline]
    pub fn category_eq(value: impl AsRef<str>) -> Self {
        Self::CategoryEquals {
            value: value.as_ref().trim().to_lowercase(),
        }
    }

    #[inline]
    pub fn and(conditions: impl IntoIterator<Item = ProductFilter>) -> Self {
        Self::And(conditions.into_iter().collect())
    }

    #[inline]
    pub fn or(conditions: impl IntoIterator<Item = ProductFilter>) -> Self {
        Self::Or(conditions.into_iter().collect())
    }

    /// Number of leaf conditions.
    pub fn len(&self) -> usize {
        match self {
            Self::And(conditions) | Self::Or(conditions) => conditions.iter().map(ProductFilter::len).sum(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn matches(&self, product: &NormalizedProduct) -> bool {
        match self {
            Self::TextContains { field, needle } => field.haystack(product).contains(needle.as_str()),
            Self::HeatEquals { value } => product.heat.label().to_lowercase() == *value,
            Self::CategoryEquals { value } => !product.category.is_empty() && product.category.to_lowercase() == *value,
            Self::And(conditions) => conditions.iter().all(|c| c.matches(product)),
            Self::Or(conditions) => conditions.iter().any(|c| c.matches(product)),
        }
    }
}

/// Products matching every active selector of `query`, in catalog order.
pub fn filter_products<'a>(products: &'a [NormalizedProduct], query: &CatalogQuery) -> Vec<&'a NormalizedProduct> {
    let filter = query.to_filter();
    let matched: Vec<_> = products.iter().filter(|product| filter.matches(product)).collect();
    log::debug!(
        "catalog query {:?} matched {} of {} products",
        query,
        matched.len(),
        products.len()
    );
    matched
}

/// Category selector options: a leading `All Categories` followed by the distinct non-empty
/// categories in ascending order.
pub fn category_options(products: &[NormalizedProduct]) -> Vec<String> {
    let distinct: BTreeSet<&str> = products
        .iter()
        .map(|product| product.category.as_str())
        .filter(|category| !category.is_empty())
        .collect();

    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

/// Heat selector options in display order.
pub fn heat_options() -> Vec<&'static str> {
    std::iter::once(ALL_HEAT)
        .chain(crate::normalize::HeatLevel::ALL.iter().map(|level| level.label()))
        .collect()
}

//! Showcase core library.
//!
//! Data shaping for the site's listing pages: record normalization, the merged insights feed, product
//! catalog filtering and sitemap derivation. Content collections are passed in explicitly; only
//! [`source`] touches the filesystem.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod feed;
pub mod normalize;
pub mod record;
pub mod sitemap;
pub mod source;

pub use catalog::{CatalogQuery, ProductFilter, category_options, filter_products};
pub use config::SiteConfig;
pub use errors::*;
pub use feed::{FeedTab, build_feed, filter_tab, merge_feed};
pub use normalize::{
    FeedKind, HeatLevel, Normalized, NormalizedFeedItem, NormalizedProduct, normalize, normalize_case_study,
    normalize_news, normalize_product, normalize_products,
};
pub use record::{Family, RawRecord, SourceRecord};
pub use sitemap::{ChangeFrequency, SitemapEntry, build_sitemap, render_xml};
pub use source::ContentSources;

//! Site configuration stored in `showcase.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{ShowcaseError, ShowcaseResult};
use crate::sitemap::ChangeFrequency;

pub const DEFAULT_CONFIG_FILE: &str = "showcase.toml";
pub const DEFAULT_BASE_URL: &str = "https://thecurry.club";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub sources: SourceSettings,
    #[serde(default)]
    pub sitemap: SitemapSettings,
    /// Directory relative source paths are resolved against; the config file's directory when loaded
    /// from disk.
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Absolute base URL, or `${VAR}` to read it from the environment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Locations of the bundled content collections. A collection without a path is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cases: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPage {
    pub path: String,
    pub priority: f64,
    #[serde(default)]
    pub change_frequency: ChangeFrequency,
}

impl StaticPage {
    pub fn new(path: impl Into<String>, priority: f64) -> Self {
        Self {
            path: path.into(),
            priority,
            change_frequency: ChangeFrequency::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapSettings {
    #[serde(default = "default_static_pages")]
    pub static_pages: Vec<StaticPage>,
    #[serde(default)]
    pub change_frequency: ChangeFrequency,
    #[serde(default = "default_product_priority")]
    pub product_priority: f64,
    #[serde(default = "default_case_study_priority")]
    pub case_study_priority: f64,
    #[serde(default = "default_news_priority")]
    pub news_priority: f64,
}

impl Default for SitemapSettings {
    fn default() -> Self {
        Self {
            static_pages: default_static_pages(),
            change_frequency: ChangeFrequency::default(),
            product_priority: default_product_priority(),
            case_study_priority: default_case_study_priority(),
            news_priority: default_news_priority(),
        }
    }
}

fn default_static_pages() -> Vec<StaticPage> {
    vec![
        StaticPage::new("/", 1.0),
        StaticPage::new("/how-it-works", 0.8),
        StaticPage::new("/products", 0.8),
        StaticPage::new("/faqs", 0.6),
        StaticPage::new("/case-studies", 0.6),
        StaticPage::new("/news", 0.6),
        StaticPage::new("/contact", 0.5),
    ]
}

fn default_product_priority() -> f64 {
    0.6
}

fn default_case_study_priority() -> f64 {
    0.6
}

fn default_news_priority() -> f64 {
    0.5
}

impl SiteConfig {
    /// Load configuration from a TOML file. Relative source paths resolve against the file's directory.
    pub fn load(path: &Path) -> ShowcaseResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ShowcaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        log::debug!("loaded site configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults rooted at the current directory.
    pub fn load_or_default(path: &Path) -> ShowcaseResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("{} not found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> ShowcaseResult<Self> {
        toml::from_str(content).map_err(|err| ShowcaseError::config(format!("failed to parse configuration: {err}")))
    }

    /// Base URL with environment variables expanded, validated, and without a trailing slash.
    pub fn base_url(&self) -> ShowcaseResult<String> {
        let raw = self.site.base_url.trim();
        let expanded = if raw.starts_with("${") && raw.ends_with('}') {
            let var_name = &raw[2..raw.len() - 1];
            std::env::var(var_name)
                .map_err(|_| ShowcaseError::config(format!("environment variable {var_name} not set")))?
        } else {
            raw.to_string()
        };

        let parsed = Url::parse(&expanded)
            .map_err(|err| ShowcaseError::config(format!("invalid base_url {expanded:?}: {err}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ShowcaseError::config(format!("base_url {expanded:?} cannot be used as a base")));
        }

        Ok(expanded.trim_end_matches('/').to_string())
    }

    /// Resolve a configured source path against [`Self::root`].
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

pub mod catalog;
pub mod feed;
pub mod sitemap;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use showcase::{ContentSources, SiteConfig};

use crate::output::OutputManager;

/// Loaded configuration and content shared by every command
pub struct CommandContext {
    pub config: SiteConfig,
    pub sources: ContentSources,
}

impl CommandContext {
    /// Load the configuration at `config_path` (defaults when absent) and every configured collection
    pub fn load(config_path: &Path, output: &OutputManager) -> Result<Self> {
        let config = SiteConfig::load_or_default(config_path)
            .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
        if config_path.exists() {
            output.verbose(&format!("Using configuration {}", config_path.display()));
        } else {
            output.verbose("No configuration file found, using defaults");
        }

        let sources = ContentSources::load(&config).context("Failed to load content collections")?;
        output.verbose(&format!(
            "Loaded {} news posts, {} case studies, {} products",
            sources.news.len(),
            sources.case_studies.len(),
            sources.products.len()
        ));

        Ok(Self { config, sources })
    }
}

/// Resolve the `--config` argument, falling back to `showcase.toml` in the current directory
pub fn config_path(arg: Option<PathBuf>) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from(showcase::config::DEFAULT_CONFIG_FILE))
}

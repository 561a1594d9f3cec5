use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::{Args, ValueEnum};
use comfy_table::{Cell, Table};
use serde::Serialize;
use showcase::{SitemapEntry, build_sitemap, render_xml};

use super::CommandContext;
use crate::examples::ExampleGroup;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, add_table_header, themed_table};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Preview",
        commands: &[
            "showcase sitemap                          # Table of every sitemap entry",
            "showcase sitemap --output json            # Entries as JSON",
        ],
    },
    ExampleGroup {
        title: "Publish",
        commands: &[
            "showcase sitemap --format xml --out public/sitemap.xml",
            "SITE_URL=https://staging.thecurry.club showcase sitemap --format xml",
        ],
    },
];

#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum SitemapFormat {
    /// Use the global --output format
    #[default]
    Entries,
    /// sitemaps.org XML document
    Xml,
}

#[derive(Args)]
pub struct SitemapArgs {
    /// Document format
    #[arg(long, value_enum, default_value = "entries")]
    pub format: SitemapFormat,

    /// Write the document to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(transparent)]
struct SitemapView(Vec<SitemapEntry>);

impl TableDisplay for SitemapView {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options);
        add_table_header(options, &mut table, &["URL", "Last Modified", "Change", "Priority"]);
        for entry in &self.0 {
            table.add_row(vec![
                Cell::new(&entry.url),
                Cell::new(entry.last_modified.format("%Y-%m-%d").to_string()),
                Cell::new(entry.change_frequency.as_str()),
                Cell::new(format!("{:.1}", entry.priority)),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.0
            .iter()
            .map(|entry| {
                format!(
                    "{}\t{}",
                    entry.url,
                    entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn handle_sitemap(args: SitemapArgs, ctx: &CommandContext, output: &OutputManager) -> Result<()> {
    let base_url = ctx.config.base_url().context("Failed to resolve site base URL")?;
    let entries = build_sitemap(&base_url, &ctx.config.sitemap, &ctx.sources, Utc::now());
    let count = entries.len();

    let document = match args.format {
        SitemapFormat::Xml => render_xml(&entries),
        SitemapFormat::Entries if args.out.is_some() => {
            let mut json = serde_json::to_string_pretty(&entries)?;
            json.push('\n');
            json
        }
        SitemapFormat::Entries => {
            output.heading(&format!("Sitemap for {base_url}"));
            output.display(&SitemapView(entries))?;
            output.info(&format!("{count} entries"));
            return Ok(());
        }
    };

    match args.out {
        Some(path) => {
            std::fs::write(&path, document).with_context(|| format!("Failed to write {}", path.display()))?;
            output.success(&format!("Wrote {count} sitemap entries to {}", path.display()));
        }
        None => output.raw(&document),
    }
    Ok(())
}

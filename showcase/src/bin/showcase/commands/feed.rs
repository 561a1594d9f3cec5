use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::{Cell, Table};
use serde::Serialize;
use showcase::{FeedKind, FeedTab, NormalizedFeedItem, build_feed, filter_tab};

use super::CommandContext;
use crate::examples::ExampleGroup;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, add_table_header, themed_table};
use crate::theme::THEME;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Insights Feed",
    commands: &[
        "showcase feed                     # News and case studies, newest first",
        "showcase feed --tab news          # Only news posts",
        "showcase feed --tab cases --output json",
    ],
}];

#[derive(Args)]
pub struct FeedArgs {
    /// Tab to show: all, news or cases
    #[arg(long, default_value = "all")]
    pub tab: FeedTab,
}

#[derive(Serialize)]
#[serde(transparent)]
struct FeedView<'a>(Vec<&'a NormalizedFeedItem>);

impl TableDisplay for FeedView<'_> {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options);
        add_table_header(options, &mut table, &["Type", "Date", "Title", "Summary", "Link"]);

        for item in &self.0 {
            let label = item.kind.label();
            let kind = if options.no_color {
                label.to_string()
            } else {
                let color = match item.kind {
                    FeedKind::News => THEME.news,
                    FeedKind::CaseStudy => THEME.case_study,
                };
                label.color(color).to_string()
            };

            let mut summary = item.summary.clone();
            if let Some(detail) = item.extra_text("sector").or_else(|| item.extra_text("author")) {
                if summary.is_empty() {
                    summary = detail.to_string();
                } else {
                    summary = format!("{summary}\n{detail}");
                }
            }

            table.add_row(vec![
                Cell::new(kind),
                Cell::new(display_date(item)),
                Cell::new(&item.title),
                Cell::new(summary),
                Cell::new(&item.href),
            ]);
        }

        table
    }

    fn to_compact(&self) -> String {
        self.0
            .iter()
            .map(|item| format!("{}\t{}\t{}\t{}", item.kind.label(), display_date(item), item.title, item.href))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn display_date(item: &NormalizedFeedItem) -> String {
    item.timestamp()
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn handle_feed(args: FeedArgs, ctx: &CommandContext, output: &OutputManager) -> Result<()> {
    let merged = build_feed(&ctx.sources.news, &ctx.sources.case_studies);
    let items = filter_tab(&merged, args.tab);

    output.heading(&format!("Insights: {}", args.tab.label()));
    if items.is_empty() && output.decorated() {
        output.warning("No items yet.");
        return Ok(());
    }

    let shown = items.len();
    output.display(&FeedView(items))?;
    output.info(&format!("{shown} of {} items", merged.len()));
    Ok(())
}

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::{Cell, Table};
use serde::Serialize;
use showcase::catalog::heat_options;
use showcase::{CatalogQuery, NormalizedProduct, category_options, filter_products, normalize_products};

use super::CommandContext;
use crate::examples::ExampleGroup;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, add_table_header, themed_table};
use crate::theme::THEME;

pub const PRODUCT_EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Search",
        commands: &[
            "showcase products                          # Whole catalog",
            "showcase products --q korma                # Name, description, tags or diet",
        ],
    },
    ExampleGroup {
        title: "Filters",
        commands: &[
            "showcase products --heat hot --cat Curry",
            "showcase products --query-string '?q=paneer&heat=Mild'",
        ],
    },
];

pub const CATEGORY_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Selector Options",
    commands: &["showcase categories --output json"],
}];

#[derive(Args)]
pub struct ProductsArgs {
    /// Free-text search over name, description, tags and diet
    #[arg(long)]
    pub q: Option<String>,

    /// Heat level: All, Mild, Medium or Hot
    #[arg(long)]
    pub heat: Option<String>,

    /// Category, or "All Categories"
    #[arg(long = "cat")]
    pub category: Option<String>,

    /// Page query string (q, heat, cat); explicit flags take precedence
    #[arg(long)]
    pub query_string: Option<String>,
}

impl ProductsArgs {
    fn to_query(&self) -> CatalogQuery {
        let mut query = self
            .query_string
            .as_deref()
            .map(CatalogQuery::from_query_string)
            .unwrap_or_default();
        if let Some(q) = &self.q {
            query.q = q.clone();
        }
        if let Some(heat) = &self.heat {
            query.heat = heat.clone();
        }
        if let Some(category) = &self.category {
            query.category = category.clone();
        }
        query
    }
}

#[derive(Serialize)]
#[serde(transparent)]
struct ProductsView<'a>(Vec<&'a NormalizedProduct>);

impl TableDisplay for ProductsView<'_> {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options);
        add_table_header(options, &mut table, &["Name", "Heat", "Category", "Tags", "Link"]);

        for product in &self.0 {
            let heat = if options.no_color {
                product.heat.label().to_string()
            } else {
                product.heat.label().color(THEME.heat(product.heat)).to_string()
            };
            let name = if product.name.is_empty() { "Untitled" } else { product.name.as_str() };
            let badges: Vec<&str> = product.tags.iter().chain(&product.diet).map(String::as_str).collect();

            table.add_row(vec![
                Cell::new(name),
                Cell::new(heat),
                Cell::new(&product.category),
                Cell::new(badges.join(", ")),
                Cell::new(product.href().unwrap_or_default()),
            ]);
        }

        table
    }

    fn to_compact(&self) -> String {
        self.0
            .iter()
            .map(|p| format!("{}\t{}\t{}", p.name, p.heat, p.category))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Serialize)]
struct OptionsView {
    heat: Vec<&'static str>,
    categories: Vec<String>,
}

impl TableDisplay for OptionsView {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options);
        add_table_header(options, &mut table, &["Selector", "Options"]);
        table.add_row(vec![Cell::new("heat"), Cell::new(self.heat.join("\n"))]);
        table.add_row(vec![Cell::new("cat"), Cell::new(self.categories.join("\n"))]);
        table
    }

    fn to_compact(&self) -> String {
        self.categories.join("\n")
    }
}

pub fn handle_products(args: ProductsArgs, ctx: &CommandContext, output: &OutputManager) -> Result<()> {
    let products = normalize_products(&ctx.sources.products);
    let query = args.to_query();
    let matched = filter_products(&products, &query);

    output.heading("Products");
    let active = query.to_query_string();
    if !active.is_empty() {
        output.key_value("Filters", &active);
    }

    if matched.is_empty() && output.decorated() {
        output.warning("No products match your filters.");
        return Ok(());
    }

    let shown = matched.len();
    output.display(&ProductsView(matched))?;
    output.info(&format!("{shown} of {} products", products.len()));
    Ok(())
}

pub fn handle_categories(ctx: &CommandContext, output: &OutputManager) -> Result<()> {
    let products = normalize_products(&ctx.sources.products);
    output.heading("Catalog Selectors");
    output.display(&OptionsView {
        heat: heat_options(),
        categories: category_options(&products),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_query_string() {
        let args = ProductsArgs {
            q: None,
            heat: Some("Hot".to_string()),
            category: None,
            query_string: Some("?q=dal&heat=Mild&cat=Lentils".to_string()),
        };

        assert_eq!(args.to_query(), CatalogQuery::new("dal", "Hot", "Lentils"));
    }

    #[test]
    fn no_arguments_yield_default_query() {
        let args = ProductsArgs {
            q: None,
            heat: None,
            category: None,
            query_string: None,
        };

        assert_eq!(args.to_query(), CatalogQuery::default());
    }
}

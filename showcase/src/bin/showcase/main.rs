mod commands;
mod examples;
mod output;
mod theme;

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::{Color as ThemeColor, Colorize, control::ShouldColorize};

use commands::{
    CommandContext,
    catalog::{ProductsArgs, handle_categories, handle_products},
    config_path,
    feed::{FeedArgs, handle_feed},
    sitemap::{SitemapArgs, handle_sitemap},
};
use examples::{ExampleGroup, command_examples};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{ICONS, THEME};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("SHOWCASE_CONFIG", "Path to the site configuration (default: showcase.toml)"),
    ("SITE_URL", "Overrides the configured base URL"),
    ("RUST_LOG", "Log filter, e.g. showcase=debug"),
];

#[derive(Parser)]
#[command(name = "showcase")]
#[command(version)]
#[command(
    about = "Feed, catalog and sitemap tooling for the site's bundled content",
    long_about = r#"Works over the site's bundled content collections (news, case studies, products):

• Merged insights feed, newest first, with news / case study tabs
• Product search by text, heat level and category
• Sitemap entries and sitemaps.org XML

Commands:
  feed        Show the merged insights feed
  products    Search and filter the product catalog
  categories  List catalog selector options
  sitemap     Build the sitemap
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Site configuration file
    #[arg(long, global = true, env = "SHOWCASE_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL override
    #[arg(long, global = true, env = "SITE_URL")]
    base_url: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse arguments with the themed help; clap prints help, version and usage errors itself.
    fn parse_with_styles() -> Self {
        let matches = build_cli_command().styles(THEME.help_styles()).get_matches();
        Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
    }
}

fn build_cli_command() -> Command {
    let use_color = detect_color_support();
    let appendix = render_top_level_appendix(use_color);
    let mut command = Cli::command().after_long_help(appendix);
    command = command.color(if use_color { ColorChoice::Auto } else { ColorChoice::Never });
    attach_command_examples(&mut command, use_color);
    command
}

fn attach_command_examples(command: &mut Command, use_color: bool) {
    for example in command_examples() {
        if let Some(subcommand) = command.find_subcommand_mut(example.name) {
            let help_text = render_examples(example.groups, use_color);
            let updated = subcommand.clone().after_long_help(help_text);
            *subcommand = updated;
        }
    }
}

fn render_examples(groups: &[ExampleGroup], use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let heading = stylize("Examples:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{heading}");

    for (index, group) in groups.iter().enumerate() {
        let title = stylize(group.title, theme.primary, true, use_color);
        let _ = writeln!(buffer, "  {title}");

        for command in group.commands {
            let arrow = stylize(ICONS.arrow, theme.secondary, false, use_color);
            let command_text = stylize(command, theme.secondary, false, use_color);
            let _ = writeln!(buffer, "    {arrow} {command_text}");
        }

        if index + 1 < groups.len() {
            buffer.push('\n');
        }
    }

    buffer
}

fn render_top_level_appendix(use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let env_heading = stylize("Environment Variables:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{env_heading}");
    for (key, description) in ENVIRONMENT_VARIABLES {
        let key_text = stylize(key, theme.key, true, use_color);
        let value_text = stylize(description, theme.value, false, use_color);
        let _ = writeln!(buffer, "  {key_text}  {value_text}");
    }

    buffer.push('\n');

    let tip_heading = stylize("Tip:", theme.highlight, true, use_color);
    let tip_text = stylize(
        "Use 'showcase <command> --help' to view examples for each command.",
        theme.secondary,
        false,
        use_color,
    );
    let _ = writeln!(buffer, "{tip_heading} {tip_text}");

    buffer
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    if use_color {
        let styled = text.color(color);
        if bold { styled.bold().to_string() } else { styled.to_string() }
    } else {
        text.to_string()
    }
}

fn detect_color_support() -> bool {
    ShouldColorize::from_env().should_colorize()
}

#[derive(Subcommand)]
enum Commands {
    /// Show the merged insights feed (news and case studies)
    Feed(FeedArgs),

    /// Search and filter the product catalog
    Products(ProductsArgs),

    /// List heat and category selector options
    Categories,

    /// Build sitemap entries or a sitemap XML document
    Sitemap(SitemapArgs),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse_with_styles();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let global_options = GlobalOptions {
        output_format: cli.output.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };
    let output = OutputManager::new(global_options);

    if let Err(err) = execute(cli, &output) {
        output.error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn execute(cli: Cli, output: &OutputManager) -> Result<()> {
    let mut ctx = CommandContext::load(&config_path(cli.config), output)?;
    if let Some(base_url) = cli.base_url {
        ctx.config.site.base_url = base_url;
    }

    match cli.command {
        Commands::Feed(args) => handle_feed(args, &ctx, output)?,
        Commands::Products(args) => handle_products(args, &ctx, output)?,
        Commands::Categories => handle_categories(&ctx, output)?,
        Commands::Sitemap(args) => handle_sitemap(args, &ctx, output)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli_command().styles(THEME.help_styles()).debug_assert();
    }

    #[test]
    fn every_subcommand_has_examples() {
        let command = build_cli_command();
        for example in command_examples() {
            assert!(command.find_subcommand(example.name).is_some(), "unknown subcommand {}", example.name);
        }
    }
}

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Color as ClapColor, RgbColor, Style};
use colored::Color;
use once_cell::sync::Lazy;

use showcase::HeatLevel;

/// CLI color theme configuration
pub struct ColorTheme {
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub highlight: Color,
    pub muted: Color,
    pub primary: Color,
    pub secondary: Color,
    pub key: Color,
    pub value: Color,
    pub news: Color,
    pub case_study: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
            highlight: Color::Cyan,
            muted: Color::BrightBlack,
            primary: Color::BrightBlue,
            secondary: Color::Magenta,
            key: Color::BrightCyan,
            value: Color::White,
            news: Color::Blue,
            case_study: Color::Green,
        }
    }
}

impl ColorTheme {
    /// Badge color for a heat level (mild green, medium yellow, hot red).
    pub fn heat(&self, level: HeatLevel) -> Color {
        match level {
            HeatLevel::Mild => self.success,
            HeatLevel::Medium => self.warning,
            HeatLevel::Hot => self.error,
        }
    }

    /// clap help styles drawn from the same palette.
    pub fn help_styles(&self) -> Styles {
        let style = |color: Color| Style::new().fg_color(Some(clap_color(color)));
        Styles::styled()
            .usage(style(self.primary).bold())
            .header(style(self.highlight).bold())
            .literal(style(self.secondary))
            .placeholder(style(self.muted))
            .valid(style(self.success))
            .invalid(style(self.warning))
            .error(style(self.error).bold())
    }
}

fn clap_color(color: Color) -> ClapColor {
    let ansi = match color {
        Color::TrueColor { r, g, b } => return ClapColor::Rgb(RgbColor(r, g, b)),
        Color::Black => AnsiColor::Black,
        Color::Red => AnsiColor::Red,
        Color::Green => AnsiColor::Green,
        Color::Yellow => AnsiColor::Yellow,
        Color::Blue => AnsiColor::Blue,
        Color::Magenta => AnsiColor::Magenta,
        Color::Cyan => AnsiColor::Cyan,
        Color::White => AnsiColor::White,
        Color::BrightBlack => AnsiColor::BrightBlack,
        Color::BrightRed => AnsiColor::BrightRed,
        Color::BrightGreen => AnsiColor::BrightGreen,
        Color::BrightYellow => AnsiColor::BrightYellow,
        Color::BrightBlue => AnsiColor::BrightBlue,
        Color::BrightMagenta => AnsiColor::BrightMagenta,
        Color::BrightCyan => AnsiColor::BrightCyan,
        Color::BrightWhite => AnsiColor::BrightWhite,
    };
    ClapColor::Ansi(ansi)
}

/// Global theme instance
pub static THEME: Lazy<ColorTheme> = Lazy::new(ColorTheme::default);

/// Icons for different message types
pub struct Icons {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub arrow: &'static str,
}

pub const ICONS: Icons = Icons {
    success: "✓",
    error: "✗",
    warning: "⚠",
    info: "ℹ",
    arrow: "→",
};

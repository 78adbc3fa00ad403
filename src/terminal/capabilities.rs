//! Terminal capability detection.

use std::env;

/// Color support level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColorSupport {
    /// No color support.
    #[default]
    None,
    /// 16 colors (basic ANSI).
    Basic,
    /// 256 colors.
    Extended,
    /// True color (16 million colors).
    TrueColor,
}

/// Detected terminal capabilities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Color support level.
    pub color: ColorSupport,
    /// Terminal name if known.
    pub term_name: Option<String>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            color: ColorSupport::Extended,
            term_name: None,
        }
    }
}

impl Capabilities {
    /// Capabilities of a terminal that cannot show color.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            color: ColorSupport::None,
            term_name: None,
        }
    }

    /// Detect terminal capabilities from environment.
    #[must_use]
    pub fn detect() -> Self {
        let term = env::var("TERM").unwrap_or_default();
        let colorterm = env::var("COLORTERM").unwrap_or_default();
        let no_color = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());

        let color = if no_color {
            ColorSupport::None
        } else {
            detect_color(&term, &colorterm)
        };

        Self {
            color,
            term_name: (!term.is_empty()).then_some(term),
        }
    }

    /// Whether color pairs can be registered and shown.
    #[must_use]
    pub fn can_remap_colors(&self) -> bool {
        self.color > ColorSupport::None
    }
}

fn detect_color(term: &str, colorterm: &str) -> ColorSupport {
    if colorterm.eq_ignore_ascii_case("truecolor") || colorterm.eq_ignore_ascii_case("24bit") {
        return ColorSupport::TrueColor;
    }

    if term.contains("24bit") || term.contains("truecolor") {
        return ColorSupport::TrueColor;
    }

    let truecolor_terms = ["alacritty", "kitty", "wezterm", "ghostty"];
    if truecolor_terms.iter().any(|t| term.contains(t)) {
        return ColorSupport::TrueColor;
    }

    if term.contains("256") {
        return ColorSupport::Extended;
    }

    if term == "dumb" || term.is_empty() {
        return ColorSupport::None;
    }

    ColorSupport::Basic
}

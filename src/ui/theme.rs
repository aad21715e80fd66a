//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents with a name and a flat color table. Two are
//! built in; any other file with the same shape can be loaded with
//! [`Theme::from_file`].
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! filter_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! sort_indicator_fg = "#fab387"
//! error_fg = "#f38ba8"
//! info_fg = "#a6e3a1"
//! ```
//!
//! # Example
//!
//! ```rust
//! use patient_roster::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! let title = format!("{}{}Patients{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset());
//! assert!(title.contains("Patients"));
//! ```

use crate::domain::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (`"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    pub text_normal: String,
    /// Dimmed text color (footer, subtitles, empty cells).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    pub filter_bar_border: String,
    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Color of the ▲/▼ markers on sorted columns.
    pub sort_indicator_fg: String,

    /// Error notices and form validation messages.
    pub error_fg: String,
    /// Confirmation notices.
    pub info_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Theme`] for an unknown name.
    pub fn from_name(name: &str) -> Result<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => {
                return Err(RosterError::Theme(format!(
                    "unknown theme '{name}' (built-in: catppuccin-mocha, catppuccin-latte)"
                )))
            }
        };

        Self::from_toml(toml_str)
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Theme`] if the file cannot be read or does not
    /// have the theme shape.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| RosterError::Theme(format!("failed to read {}: {e}", path.display())))?;

        Self::from_toml(&contents)
    }

    fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| RosterError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}

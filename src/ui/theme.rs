//! Color themes and ANSI escape sequences.
//!
//! Two themes are built in, `pantry-dark` (default) and `pantry-light`. A
//! custom theme can be loaded from a TOML file with the same layout:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6e1cf"
//! header_bg = "#1f2430"   # optional
//! selection_fg = "#1f2430"
//! selection_bg = "#ffcc66"
//! text_normal = "#cbccc6"
//! text_dim = "#707a8c"
//! border = "#34455a"
//! input_border = "#5ccfe6"
//! amount_fg = "#bae67e"
//! loading_fg = "#ffa759"
//! error_fg = "#1f2430"
//! error_bg = "#f28779"
//! empty_state_fg = "#73d0ff"
//! ```

use crate::domain::{PantryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "pantry-dark";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    pub text_dim: String,
    pub border: String,

    /// Frame of the filter and add prompts.
    pub input_border: String,
    pub amount_fg: String,
    /// "Loading..." indicator.
    pub loading_fg: String,

    pub error_fg: String,
    pub error_bg: String,

    pub empty_state_fg: String,
}

impl Theme {
    /// Looks up a built-in theme.
    ///
    /// ```rust
    /// use pantry::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("pantry-light").map(|t| t.name), Some("pantry-light".to_string()));
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "pantry-dark" => include_str!("../../themes/pantry-dark.toml"),
            "pantry-light" => include_str!("../../themes/pantry-light.toml"),
            _ => return None,
        };
        toml::from_str(source).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::Io`] if the file cannot be read and
    /// [`PantryError::Config`] if it is not a valid theme.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| PantryError::Config(format!("invalid theme: {e}")))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = hex_to_rgb(hex);
        format!("\u{1b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = hex_to_rgb(hex);
        format!("\u{1b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{1b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{1b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{1b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in default theme parses")
    }
}

/// Parses `#rrggbb`; anything malformed renders white.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    const WHITE: (u8, u8, u8) = (255, 255, 255);

    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return WHITE;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => (r, g, b),
        _ => WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn built_in_themes_parse() {
        for name in ["pantry-dark", "pantry-light"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn light_theme_has_no_header_background() {
        assert_eq!(Theme::from_name("pantry-light").unwrap().colors.header_bg, None);
    }

    #[test]
    fn loads_theme_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        let source = toml::to_string(&Theme::default()).unwrap();
        file.write_all(source.replace("pantry-dark", "mine").as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
        assert_eq!(theme.colors, Theme::default().colors);
    }

    #[test]
    fn malformed_theme_file_is_a_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(PantryError::Config(_))));
    }

    #[test]
    fn escapes_encode_rgb() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("nonsense"), "\u{1b}[48;2;255;255;255m");
    }
}

// TOML theme format parser
//
// Each theme explicitly defines all semantic colors: UI chrome, finding
// status, bill audit accents and the trailing callouts.
//
// Format version: 1

use ratatui::style::Color;
use serde::Deserialize;

/// Root structure for TOML theme files
#[derive(Debug, Clone, Deserialize)]
pub struct TomlTheme {
    pub meta: ThemeMeta,
    pub ui: UiColors,
    pub findings: FindingColors,
    pub bill: BillColors,
    pub callouts: CalloutColors,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeMeta {
    pub name: String,
    pub version: u32,
    #[serde(default)]
    pub author: Option<String>,
}

/// Base UI chrome colors
#[derive(Debug, Clone, Deserialize)]
pub struct UiColors {
    pub background: String,
    pub foreground: String,
    pub border: String,
    pub border_focused: String,
    pub title: String,
    pub status_bar: String,
    pub selection_bg: String,
    pub selection_fg: String,
    /// Optional secondary text color (falls back to border)
    pub muted: Option<String>,
    /// Optional border style: "plain", "rounded", "double", "thick" (default: plain)
    pub border_type: Option<String>,
}

/// Report rows: status "normal" vs everything else
#[derive(Debug, Clone, Deserialize)]
pub struct FindingColors {
    pub normal: String,
    pub abnormal: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BillColors {
    pub issue: String,
    pub savings: String,
    pub score: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalloutColors {
    pub reminder: String,
    pub note: String,
    pub questions: String,
}

impl TomlTheme {
    /// Parse a TOML theme from string
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse a color string to ratatui Color
    /// Supports:
    /// - Hex format: #RRGGBB
    /// - ANSI format: ansi:0-15, ansi:fg, ansi:bg (for terminal-native colors)
    pub fn parse_color(value: &str) -> Color {
        if let Some(ansi) = value.strip_prefix("ansi:") {
            return match ansi {
                "0" => Color::Black,
                "1" => Color::Red,
                "2" => Color::Green,
                "3" => Color::Yellow,
                "4" => Color::Blue,
                "5" => Color::Magenta,
                "6" => Color::Cyan,
                "7" => Color::White,
                "8" => Color::DarkGray,
                "9" => Color::LightRed,
                "10" => Color::LightGreen,
                "11" => Color::LightYellow,
                "12" => Color::LightBlue,
                "13" => Color::LightMagenta,
                "14" => Color::LightCyan,
                "15" => Color::Gray,
                "fg" | "bg" => Color::Reset,
                _ => Color::White,
            };
        }

        let hex = value.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Color::White;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
        Color::Rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::bundled::BUNDLED_THEMES;

    #[test]
    fn test_parse_color() {
        assert_eq!(TomlTheme::parse_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(TomlTheme::parse_color("00ff00"), Color::Rgb(0, 255, 0));
        assert_eq!(TomlTheme::parse_color("ansi:2"), Color::Green);
        assert_eq!(TomlTheme::parse_color("ansi:bg"), Color::Reset);
        assert_eq!(TomlTheme::parse_color("#12"), Color::White);
        assert_eq!(TomlTheme::parse_color("#ééé"), Color::White);
    }

    #[test]
    fn test_bundled_themes_parse() {
        for bundled in BUNDLED_THEMES {
            let theme = TomlTheme::parse(bundled.content)
                .unwrap_or_else(|e| panic!("{} failed to parse: {}", bundled.filename, e));
            assert_eq!(theme.meta.name, bundled.name);
            assert_eq!(theme.meta.version, 1);
        }
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let toml = r##"
[meta]
name = "Half"
version = 1

[ui]
background = "#000000"
foreground = "#ffffff"
border = "#333333"
border_focused = "#ffffff"
title = "#ffffff"
status_bar = "#ffffff"
selection_bg = "#333333"
selection_fg = "#ffffff"
"##;
        assert!(TomlTheme::parse(toml).is_err());
    }
}

// Theme system for the TUI
//
// - TomlTheme: file format with explicit semantic color definitions
// - Theme: resolved theme with all colors ready for use
//
// Theme loading priority:
// 1. External TOML themes from ~/.config/health-decoded/themes/*.toml
// 2. Bundled themes (compiled in, extracted on first run)
// 3. Fallback to hardcoded default

mod bundled;
mod toml_format;

use toml_format::TomlTheme;

use crate::config::Config;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use std::path::PathBuf;

/// Theme configuration options
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            use_theme_background: true,
        }
    }
}

/// Complete resolved theme ready for use in the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── UI Element Colors ───────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight: Color, // border_focused
    pub title: Color,
    pub status_bar: Color,
    pub selection: Color,
    pub selection_fg: Color,
    pub border_type: BorderType,

    // ─── Findings ────────────────────────────────────────────
    pub normal: Color,
    pub abnormal: Color,

    // ─── Bill Audit ──────────────────────────────────────────
    pub issue: Color,
    pub savings: Color,
    pub score: Color,

    // ─── Callouts ────────────────────────────────────────────
    pub reminder: Color,
    pub note: Color,
    pub questions: Color,
}

impl Theme {
    pub fn by_name_with_config(name: &str, config: &ThemeConfig) -> Self {
        if let Some(theme) = Self::load_toml(name, config) {
            return theme;
        }
        tracing::warn!(theme = name, "Theme not found, using fallback");
        Self::hardcoded_default(config)
    }

    /// Theme named in the app config
    pub fn from_config(config: &Config) -> Self {
        Self::by_name_with_config(
            &config.theme,
            &ThemeConfig {
                use_theme_background: config.use_theme_background,
            },
        )
    }

    /// Load from TOML theme file or bundled theme
    fn load_toml(name: &str, config: &ThemeConfig) -> Option<Self> {
        let normalized = name.replace(' ', "_");

        if let Some(themes_dir) = Self::themes_dir() {
            for candidate in [name, normalized.as_str()] {
                let path = themes_dir.join(format!("{}.toml", candidate));
                let Ok(contents) = std::fs::read_to_string(&path) else {
                    continue;
                };
                match TomlTheme::parse(&contents) {
                    Ok(toml_theme) => return Some(Self::from_toml(toml_theme, config)),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Skipping invalid theme file")
                    }
                }
            }
        }

        let filename = format!("{}.toml", normalized);
        bundled::BUNDLED_THEMES
            .iter()
            .filter(|t| t.filename.eq_ignore_ascii_case(&filename))
            .find_map(|t| TomlTheme::parse(t.content).ok())
            .map(|toml_theme| Self::from_toml(toml_theme, config))
    }

    fn themes_dir() -> Option<PathBuf> {
        Config::config_dir().map(|d| d.join("themes"))
    }

    fn parse_border_type(value: Option<&String>) -> BorderType {
        match value.map(|s| s.as_str()) {
            Some("rounded") => BorderType::Rounded,
            Some("double") => BorderType::Double,
            Some("thick") => BorderType::Thick,
            _ => BorderType::Plain,
        }
    }

    fn from_toml(toml: TomlTheme, config: &ThemeConfig) -> Self {
        let parse = TomlTheme::parse_color;

        tracing::debug!(
            theme = %toml.meta.name,
            author = toml.meta.author.as_deref().unwrap_or("unknown"),
            "Loaded theme"
        );

        let background = if config.use_theme_background {
            parse(&toml.ui.background)
        } else {
            Color::Reset
        };

        Self {
            name: toml.meta.name.clone(),

            background,
            foreground: parse(&toml.ui.foreground),
            muted: toml
                .ui
                .muted
                .as_deref()
                .map(parse)
                .unwrap_or_else(|| parse(&toml.ui.border)),
            border: parse(&toml.ui.border),
            highlight: parse(&toml.ui.border_focused),
            title: parse(&toml.ui.title),
            status_bar: parse(&toml.ui.status_bar),
            selection: parse(&toml.ui.selection_bg),
            selection_fg: parse(&toml.ui.selection_fg),
            border_type: Self::parse_border_type(toml.ui.border_type.as_ref()),

            normal: parse(&toml.findings.normal),
            abnormal: parse(&toml.findings.abnormal),

            issue: parse(&toml.bill.issue),
            savings: parse(&toml.bill.savings),
            score: parse(&toml.bill.score),

            reminder: parse(&toml.callouts.reminder),
            note: parse(&toml.callouts.note),
            questions: parse(&toml.callouts.questions),
        }
    }

    /// Hardcoded fallback when no themes can be loaded
    fn hardcoded_default(config: &ThemeConfig) -> Self {
        let background = if config.use_theme_background {
            Color::Rgb(29, 35, 42)
        } else {
            Color::Reset
        };

        Self {
            name: "Clinic Dark (Fallback)".to_string(),

            background,
            foreground: Color::Rgb(216, 222, 230),
            muted: Color::Rgb(123, 135, 148),
            border: Color::Rgb(58, 68, 80),
            highlight: Color::Rgb(90, 169, 230),
            title: Color::Rgb(90, 169, 230),
            status_bar: Color::Rgb(159, 179, 200),
            selection: Color::Rgb(44, 58, 74),
            selection_fg: Color::Rgb(241, 245, 249),
            border_type: BorderType::Plain,

            normal: Color::Rgb(79, 191, 127),
            abnormal: Color::Rgb(229, 103, 107),

            issue: Color::Rgb(229, 103, 107),
            savings: Color::Rgb(79, 191, 127),
            score: Color::Rgb(242, 193, 78),

            reminder: Color::Rgb(167, 139, 250),
            note: Color::Rgb(90, 169, 230),
            questions: Color::Rgb(216, 222, 230),
        }
    }

    /// List all available themes (bundled + external)
    pub fn list_available() -> Vec<String> {
        let mut themes: Vec<String> = bundled::list_bundled_themes()
            .into_iter()
            .map(str::to_string)
            .collect();

        let Some(themes_dir) = Self::themes_dir() else {
            return themes;
        };
        let Ok(entries) = std::fs::read_dir(themes_dir) else {
            return themes;
        };

        let mut external: Vec<String> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().replace('_', " ")))
            .filter(|name| !themes.iter().any(|t| t.eq_ignore_ascii_case(name)))
            .collect();
        external.sort();
        themes.extend(external);
        themes
    }

    /// Theme name that follows `current` in `list_available`
    pub fn next_name(current: &str) -> String {
        let themes = Self::list_available();
        let next = themes
            .iter()
            .position(|t| t.eq_ignore_ascii_case(current))
            .map(|i| (i + 1) % themes.len())
            .unwrap_or(0);
        themes
            .get(next)
            .cloned()
            .unwrap_or_else(|| current.to_string())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::by_name_with_config(crate::config::DEFAULT_THEME, &ThemeConfig::default())
    }
}

/// Ensure themes directory exists and extract bundled themes on first run
pub fn ensure_themes_extracted() {
    let Some(themes_dir) = Theme::themes_dir() else {
        return;
    };

    if std::fs::create_dir_all(&themes_dir).is_err() {
        return;
    }

    let marker = themes_dir.join(".extracted_v1");
    if marker.exists() {
        return;
    }

    for theme in bundled::BUNDLED_THEMES {
        let path = themes_dir.join(theme.filename);
        // Don't overwrite user modifications
        if !path.exists() {
            let _ = std::fs::write(&path, theme.content);
        }
    }

    let _ = std::fs::write(&marker, "1");
}

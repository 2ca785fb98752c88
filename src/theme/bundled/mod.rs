//! Bundled TOML themes (compiled into binary, extracted on first run)
//!
//! These themes are written to ~/.config/health-decoded/themes/ on first run.
//! Users can then modify them freely.

mod clinic_dark;
mod clinic_light;
mod nord;
mod terminal_ansi;

pub use clinic_dark::THEME as CLINIC_DARK;
pub use clinic_light::THEME as CLINIC_LIGHT;
pub use nord::THEME as NORD;
pub use terminal_ansi::THEME as TERMINAL_ANSI;

/// Bundled theme: display name, file name and TOML content
pub struct BundledTheme {
    pub name: &'static str,
    pub filename: &'static str,
    pub content: &'static str,
}

/// All bundled themes, in cycling order
pub const BUNDLED_THEMES: &[BundledTheme] = &[
    BundledTheme {
        name: "Clinic Dark",
        filename: "Clinic_Dark.toml",
        content: CLINIC_DARK,
    },
    BundledTheme {
        name: "Clinic Light",
        filename: "Clinic_Light.toml",
        content: CLINIC_LIGHT,
    },
    BundledTheme {
        name: "Nord",
        filename: "Nord.toml",
        content: NORD,
    },
    BundledTheme {
        name: "Terminal ANSI",
        filename: "Terminal_ANSI.toml",
        content: TERMINAL_ANSI,
    },
];

/// List bundled theme names (for display)
pub fn list_bundled_themes() -> Vec<&'static str> {
    BUNDLED_THEMES.iter().map(|t| t.name).collect()
}

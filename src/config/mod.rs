//! Configuration for the analysis client
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (`--api-url`, highest priority)
//! 2. Environment variables
//! 3. Config file (~/.config/health-decoded/config.toml)
//! 4. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::analysis::Language;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name, used for the config directory
pub const APP_NAME: &str = "health-decoded";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_THEME: &str = "Clinic Dark";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Analysis backend base URL, trailing slashes stripped
    pub api_base_url: String,

    /// Whole-request timeout in seconds (0 = no timeout)
    pub request_timeout_secs: u64,

    /// Language preselected in the upload dialog
    pub language: Language,

    /// Directory the file picker opens in (None = current directory)
    pub start_dir: Option<PathBuf>,

    /// Theme name: "Clinic Dark", "Clinic Light", "Nord", "Terminal ANSI"
    pub theme: String,

    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Problems found while loading (unknown language etc.), logged at startup
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            language: Language::default(),
            start_dir: None,
            theme: DEFAULT_THEME.to_string(),
            use_theme_background: true,
            logging: LoggingConfig::default(),
            warnings: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub language: Option<String>,
    pub start_dir: Option<String>,
    pub theme: Option<String>,
    pub use_theme_background: Option<bool>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Strip trailing slashes so paths can be appended with a single `/`
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config directory: ~/.config/health-decoded
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(APP_NAME))
    }

    /// Get the config file path: ~/.config/health-decoded/config.toml
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Parse config file contents
    pub(crate) fn parse_file(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load file config if it exists.
    ///
    /// A file that exists but cannot be read or parsed is an error: a broken
    /// config should fail loudly, not silently fall back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(FileConfig::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Cannot read config file {}", path.display()));
            }
        };

        Self::parse_file(&contents).with_context(|| {
            format!(
                "Failed to parse config file {}\n\n  \
                 Check for missing quotes around strings, invalid booleans (use true/false)\n  \
                 or typos in section names. Run `{} config --reset` to start over.",
                path.display(),
                APP_NAME
            )
        })
    }

    /// Load configuration: env vars > file > defaults
    pub fn load() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();

        // API base URL: env > file > default
        let api_base_url = env("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .or(file.api_base_url)
            .map(|u| normalize_base_url(&u))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        // Timeout: env > file > default
        let env_timeout = env("HEALTH_DECODED_TIMEOUT").and_then(|v| match v.trim().parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(_) => {
                warnings.push(format!("Ignoring HEALTH_DECODED_TIMEOUT={:?}: not a number", v));
                None
            }
        });
        let request_timeout_secs = env_timeout
            .or(file.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        // Language: env > file > default
        let language = match env("HEALTH_DECODED_LANG").or(file.language) {
            Some(raw) => raw.parse::<Language>().unwrap_or_else(|e: String| {
                warnings.push(format!("{}; using English", e));
                Language::default()
            }),
            None => Language::default(),
        };

        // Theme: env > file > default
        let theme = env("HEALTH_DECODED_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // File-only settings
        let start_dir = file.start_dir.map(|d| expand_home(&d));
        let use_theme_background = file.use_theme_background.unwrap_or(true);
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_base_url,
            request_timeout_secs,
            language,
            start_dir,
            theme,
            use_theme_background,
            logging,
            warnings,
        }
    }

    /// Apply the `--api-url` flag
    pub fn with_api_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url {
            self.api_base_url = normalize_base_url(url);
        }
        self
    }
}

/// `~/scans` -> `/home/me/scans`
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

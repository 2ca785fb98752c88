//! Config serialization to TOML
//!
//! Single source of truth for the config file format: the first-run template,
//! `config --reset` and `config --show` all come from here.

use super::Config;

impl Config {
    /// Serialize config to a commented TOML document
    pub fn to_toml(&self) -> String {
        let start_dir = match &self.start_dir {
            Some(dir) => format!("start_dir = {:?}", dir.display().to_string()),
            None => "# start_dir = \"~/Documents/scans\"".to_string(),
        };

        format!(
            r#"# health-decoded configuration

# Analysis backend (API_BASE_URL env var overrides)
api_base_url = "{api}"

# Whole-request timeout in seconds, 0 disables it (HEALTH_DECODED_TIMEOUT)
request_timeout_secs = {timeout}

# Default explanation language: English, Hindi, Spanish, French (HEALTH_DECODED_LANG)
language = "{language}"

# Directory the file picker opens in (defaults to the current directory)
{start_dir}

# Theme: Clinic Dark, Clinic Light, Nord, Terminal ANSI (HEALTH_DECODED_THEME)
# Press 't' in the TUI to cycle
theme = "{theme}"

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Logging configuration (RUST_LOG env var overrides level)
[logging]
level = "{log_level}"
# JSON file logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api = self.api_base_url,
            timeout = self.request_timeout_secs,
            language = self.language,
            start_dir = start_dir,
            theme = self.theme,
            use_bg = self.use_theme_background,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}

// Startup module - boot sequence shown in the log panel
//
// The TUI owns the screen from the first frame, so the banner goes through
// tracing and lands in the log buffer instead of stdout.

use crate::config::{Config, VERSION};

/// Module status line for the boot sequence
struct ModuleStatus {
    name: &'static str,
    enabled: bool,
    description: String,
}

fn module_status(config: &Config) -> Vec<ModuleStatus> {
    vec![
        ModuleStatus {
            name: "client",
            enabled: true,
            description: format!("{}/analyze", config.api_base_url),
        },
        ModuleStatus {
            name: "timeout",
            enabled: config.request_timeout_secs > 0,
            description: match config.request_timeout_secs {
                0 => "disabled".to_string(),
                secs => format!("{}s", secs),
            },
        },
        ModuleStatus {
            name: "language",
            enabled: true,
            description: config.language.to_string(),
        },
        ModuleStatus {
            name: "file-log",
            enabled: config.logging.file_enabled,
            description: config.logging.file_dir.display().to_string(),
        },
    ]
}

/// Print startup messages to the TUI log panel
pub fn log_startup(config: &Config) {
    tracing::info!("═══════════════════════════════════");
    tracing::info!("  HEALTH-DECODED v{}", VERSION);
    tracing::info!("═══════════════════════════════════");

    match Config::config_path() {
        Some(path) if path.exists() => tracing::info!("Config: {}", path.display()),
        _ => tracing::info!("Config: (using defaults)"),
    }

    for module in module_status(config) {
        let icon = if module.enabled { "✓" } else { "○" };
        tracing::info!("  {} {:<9} {}", icon, module.name, module.description);
    }

    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!("Ready. Press 'u' to upload a report or bill.");
}

// Health-Decoded - medical reports and hospital bills in plain language
//
// A terminal client for an external document-analysis backend: the user
// picks an image of a lab report or a bill, it is uploaded as multipart to
// `{API_BASE_URL}/analyze`, and the structured answer is rendered.
//
// Architecture:
// - analysis: request/response types, HTTP client, image preview
// - upload: the upload interaction state machine (category, busy, stale)
// - render: terminal-independent result view model + plain text
// - tui (ratatui): shell, overlays, result panel
// - cli: headless `analyze` and `config` subcommands

mod analysis;
mod cli;
mod config;
mod logging;
mod render;
mod startup;
mod theme;
mod tui;
mod upload;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config subcommands print and exit, no logging needed
    if let Some(Commands::Config(args)) = &cli.command {
        cli::handle_config(args);
        return Ok(());
    }

    let headless = matches!(cli.command, Some(Commands::Analyze(_)));

    if !headless {
        // First run: write the config template and theme files
        Config::ensure_config_exists();
        theme::ensure_themes_extracted();
    }

    let config = match &cli.command {
        Some(Commands::Analyze(args)) => Config::load()?.with_api_url(args.api_url.as_deref()),
        _ => Config::load()?,
    };

    let log_buffer = LogBuffer::new();
    let file_guard = init_tracing(&config.logging, &log_buffer, headless);

    match cli.command {
        Some(Commands::Analyze(args)) => {
            for warning in &config.warnings {
                tracing::warn!("{}", warning);
            }
            match cli::run_analyze(&args, &config).await {
                Ok(output) => {
                    println!("{}", output);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Analysis failed: {:#}", e);
                    // Flush file logs before exiting
                    drop(file_guard);
                    std::process::exit(1);
                }
            }
        }
        _ => {
            startup::log_startup(&config);
            let result = tui::run_tui(config, log_buffer).await;
            if let Err(e) = &result {
                tracing::error!(error = %format!("{:#}", e), "TUI exited with error");
            }
            result
        }
    }
}

/// Install the global subscriber.
///
/// TUI mode captures logs into the buffer (stdout belongs to the screen);
/// headless mode writes them to stderr so stdout only carries the result.
/// File logging is JSON, non-blocking, with rotation; the returned guard
/// must live until exit for the last lines to flush.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(
    logging: &LoggingConfig,
    log_buffer: &LogBuffer,
    headless: bool,
) -> Option<WorkerGuard> {
    let default_filter = format!("health_decoded={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = if logging.file_enabled {
        match std::fs::create_dir_all(&logging.file_dir) {
            Ok(()) => {
                let appender = match logging.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
                    }
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let tui_layer = (!headless).then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer =
        headless.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

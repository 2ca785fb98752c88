// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the TUI starts. Subcommands:
// - analyze <FILE>: one-shot analysis, result on stdout
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Show config file path

use crate::analysis::{
    AnalysisClient, AnalysisRequest, AnalysisResponse, Category, Language, SelectedFile,
};
use crate::config::{Config, VERSION};
use crate::render;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// Health-Decoded - plain-language medical reports and bill audits
#[derive(Parser, Debug)]
#[command(name = "health-decoded")]
#[command(version = VERSION)]
#[command(about = "Decode medical reports and audit hospital bills", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one document without the TUI
    Analyze(AnalyzeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Image of the report or bill
    pub file: PathBuf,

    /// Document category: report or bill
    #[arg(long, short)]
    pub category: Category,

    /// Explanation language (defaults to the configured one)
    #[arg(long, short)]
    pub lang: Option<Language>,

    /// Analysis backend base URL (overrides API_BASE_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Print the classified response as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Show effective configuration
    #[arg(long)]
    pub show: bool,

    /// Reset config file to defaults
    #[arg(long)]
    pub reset: bool,

    /// Show config file path
    #[arg(long)]
    pub path: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// analyze
// ─────────────────────────────────────────────────────────────────────────────

/// Upload `args.file` and render the answer.
///
/// The error is what follows "Analysis failed: " on stderr.
pub async fn run_analyze(args: &AnalyzeArgs, config: &Config) -> Result<String> {
    let file = SelectedFile::load(&args.file)?;
    if file.is_empty() {
        bail!("{} is empty", file.name);
    }
    if !file.is_image() {
        bail!("not an image: {}", file.name);
    }

    let language = args.lang.unwrap_or(config.language);
    let request = AnalysisRequest::new(args.category, language, &file);
    let client = AnalysisClient::new(&config.api_base_url, config.request_timeout_secs)?;

    tracing::info!(
        file = %file.name,
        category = %args.category,
        lang = %language,
        url = %client.endpoint(),
        "Submitting document for analysis"
    );

    let response = client.analyze(&request).await.map_err(|e| {
        tracing::warn!(kind = e.kind().as_str(), detail = %e.detail(), "Analysis failed");
        anyhow::Error::new(e)
    })?;

    format_response(&response, args.json)
}

fn format_response(response: &AnalysisResponse, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(response).context("Failed to serialize response");
    }
    Ok(render::to_plain_text(&render::render(Some(response))))
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(args: &ConfigArgs) {
    if args.path {
        handle_config_path();
    } else if args.show {
        handle_config_show();
    } else if args.reset {
        handle_config_reset();
    } else {
        println!("Usage: health-decoded config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    for warning in &config.warnings {
        println!("# Warning: {}", warning);
    }

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

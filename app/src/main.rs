// In app/src/main.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use app_config::Settings;
use clap::Parser;
use core_types::RecordKind;
use registry::ConfigRegistry;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

mod bootstrap;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Builds, freezes and prints the Bands parameter registry."
)]
struct Cli {
    /// Directory holding `base.toml` and the per-environment files.
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Environment file to layer over `base.toml`. Defaults to `APP_ENVIRONMENT`, then "development".
    #[arg(long)]
    environment: Option<String>,
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let environment = cli
        .environment
        .or_else(|| std::env::var("APP_ENVIRONMENT").ok())
        .unwrap_or_else(|| "development".to_string());

    let settings = app_config::load_settings_from(&cli.config_dir, &environment)
        .with_context(|| format!("Failed to load settings from {}", cli.config_dir.display()))?;

    init_tracing(&settings.app.log_level);
    tracing::info!(
        environment = %environment,
        config_dir = %cli.config_dir.display(),
        "Starting Bands parameter registry"
    );
    report_settings(&settings, &cli.config_dir, &environment);

    let registry = ConfigRegistry::global();
    bootstrap::populate(registry, &settings)?;
    let variants = registry.freeze();

    for kind in RecordKind::ALL {
        for timeframe in registry.timeframes(kind) {
            let record = registry.resolve(kind, timeframe)?;
            let json = serde_json::to_string(&record)?;
            tracing::info!(%kind, %timeframe, record = %json, "Resolved parameters");
        }
    }

    tracing::info!(variants, "Parameter registry is ready.");
    Ok(())
}

/// Default-level filter for `log_level`, or `None` if the level is not recognised.
fn log_filter(log_level: &str) -> Option<Targets> {
    log_level
        .parse::<tracing::Level>()
        .ok()
        .map(|level| Targets::new().with_default(level))
}

/// Installs the fmt subscriber, filtered at `log_level` (falls back to INFO).
fn init_tracing(log_level: &str) {
    let filter = log_filter(log_level);
    let recognised = filter.is_some();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(filter.unwrap_or_else(|| Targets::new().with_default(tracing::Level::INFO)));
    tracing_subscriber::registry().with(fmt_layer).init();

    if !recognised {
        tracing::warn!(log_level, "Unrecognised log level, using INFO.");
    }
}

/// Logs the loaded settings. Called once the subscriber is installed.
fn report_settings(settings: &Settings, config_dir: &Path, environment: &str) {
    tracing::debug!(
        config_dir = %config_dir.display(),
        environment,
        override_tables = settings.overrides.len(),
        presets = settings.app.use_builtin_presets,
        "Configuration loaded."
    );
}

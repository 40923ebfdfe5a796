// In crates/app-config/src/lib.rs

use std::collections::HashMap;
use std::path::Path;

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, FieldTable, OverrideSet, Settings};

const ENV_PREFIX: &str = "APP";
const DEFAULT_ENVIRONMENT: &str = "development";

/// Loads the application settings from `./config` and the process environment.
///
/// The environment name comes from `APP_ENVIRONMENT` and defaults to "development".
pub fn load_settings() -> Result<Settings> {
    let environment =
        std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.into());
    load_settings_from(Path::new("config"), &environment)
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from `<config_dir>/base.toml`, if present.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables (e.g., `APP_APP__LOG_LEVEL=debug`).
pub fn load_settings_from(config_dir: &Path, environment: &str) -> Result<Settings> {
    let base = config_dir.join("base");
    let env_file = config_dir.join(environment);

    let builder = Config::builder()
        .add_source(File::with_name(&base.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
        .add_source(environment_source(None));

    finish(builder)
}

/// Builds settings from in-memory TOML layers, later layers winning, with
/// `env` standing in for the process environment.
pub fn settings_from_layers(layers: &[&str], env: HashMap<String, String>) -> Result<Settings> {
    let builder = layers.iter().fold(Config::builder(), |builder, layer| {
        builder.add_source(File::from_str(layer, FileFormat::Toml))
    });
    let builder = builder.add_source(environment_source(Some(env)));
    finish(builder)
}

/// Parses a single TOML document into settings.
pub fn settings_from_toml(toml: &str) -> Result<Settings> {
    finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
}

// `APP_` prefix, `__` between nested keys, scalar values parsed.
fn environment_source(env: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(env.map(|vars| vars.into_iter().collect()))
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{ConfigError, FieldValue, RecordKind, Timeframe};

    const BASE: &str = r#"
        [app]
        log_level = "warn"

        [overrides.indicator_bands.H1]
        period = 30
        deviation = 2.0

        [overrides.strategy_bands.M5]
        lot_size = 0.1
        tick_filter_method = 1
    "#;

    const PRODUCTION: &str = r#"
        [app]
        environment = "production"
        use_builtin_presets = false

        [overrides.indicator_bands.H1]
        period = 40
    "#;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = settings_from_layers(&[], no_env()).unwrap();
        assert_eq!(settings.app.environment, "development");
        assert_eq!(settings.app.log_level, "info");
        assert!(settings.app.use_builtin_presets);
        assert!(settings.override_sets().unwrap().is_empty());
    }

    #[test]
    fn test_later_layer_wins_per_key() {
        let settings = settings_from_layers(&[BASE, PRODUCTION], no_env()).unwrap();
        assert_eq!(settings.app.environment, "production");
        assert_eq!(settings.app.log_level, "warn");
        assert!(!settings.app.use_builtin_presets);

        let sets = settings.override_sets().unwrap();
        let h1 = sets
            .iter()
            .find(|set| set.kind == RecordKind::IndicatorBands && set.timeframe == Timeframe::H1)
            .unwrap();
        let value = |field: &str| {
            h1.overrides
                .iter()
                .find(|o| o.field == field)
                .map(|o| o.value.clone())
        };
        assert_eq!(value("period"), Some(FieldValue::Int(40)));
        assert_eq!(value("deviation"), Some(FieldValue::Float(2.0)));
    }

    #[test]
    fn test_environment_overrides_files() {
        let env = HashMap::from([
            ("APP_APP__LOG_LEVEL".to_string(), "debug".to_string()),
            ("APP_APP__USE_BUILTIN_PRESETS".to_string(), "false".to_string()),
        ]);
        let settings = settings_from_layers(&[BASE], env).unwrap();
        assert_eq!(settings.app.log_level, "debug");
        assert!(!settings.app.use_builtin_presets);
    }

    #[test]
    fn test_override_sets_are_typed_and_ordered() {
        let settings = settings_from_toml(BASE).unwrap();
        let sets = settings.override_sets().unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].kind, RecordKind::IndicatorBands);
        assert_eq!(sets[0].timeframe, Timeframe::H1);
        assert_eq!(sets[0].overrides.len(), 2);
        assert_eq!(sets[1].kind, RecordKind::StrategyBands);
        assert_eq!(sets[1].timeframe, Timeframe::M5);
        assert_eq!(settings.timeframes().unwrap(), vec![Timeframe::M5, Timeframe::H1]);
    }

    #[test]
    fn test_timeframe_spellings_are_merged() {
        let settings = settings_from_toml(
            r#"
            [overrides.indicator_bands.h1]
            period = 12
            [overrides.indicator_bands.PERIOD_H1]
            shift = 1
            "#,
        )
        .unwrap();

        let sets = settings.override_sets().unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].timeframe, Timeframe::H1);
        assert_eq!(sets[0].overrides.len(), 2);
    }

    #[test]
    fn test_unknown_timeframe_is_rejected() {
        let settings = settings_from_toml("[overrides.indicator_bands.H5]\nperiod = 3").unwrap();
        assert!(matches!(
            settings.override_sets(),
            Err(Error::UnknownTimeframe(tf)) if tf == "H5"
        ));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let settings = settings_from_toml("[overrides.macd.H1]\nperiod = 3").unwrap();
        assert!(matches!(
            settings.override_sets(),
            Err(Error::Params(ConfigError::UnknownKind(kind))) if kind == "macd"
        ));
    }

    #[test]
    fn test_environment_table_wins_over_file_table() {
        // Environment keys arrive lowercased, so `h1` lands next to the file's `H1`.
        let env = HashMap::from([(
            "APP_OVERRIDES__INDICATOR_BANDS__H1__PERIOD".to_string(),
            "50".to_string(),
        )]);
        let settings = settings_from_layers(&[BASE], env).unwrap();
        let sets = settings.override_sets().unwrap();

        let h1 = &sets[0];
        assert_eq!(h1.timeframe, Timeframe::H1);
        let last_period = h1.overrides.iter().rev().find(|o| o.field == "period").unwrap();
        assert_eq!(last_period.value, FieldValue::Int(50));
    }
}

// In crates/app-config/src/types.rs

use std::collections::BTreeMap;

use core_types::{FieldValue, Override, RecordKind, Timeframe};
use serde::Deserialize;

use crate::error::{Error, Result};

/// `field = value` assignments for one record kind on one timeframe.
pub type FieldTable = BTreeMap<String, FieldValue>;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,

    /// Override tables, addressed as `overrides.<kind>.<timeframe>.<field>`.
    #[serde(default)]
    pub overrides: BTreeMap<String, BTreeMap<String, FieldTable>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Register the shipped per-timeframe presets underneath the file overrides.
    #[serde(default = "default_use_builtin_presets")]
    pub use_builtin_presets: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
            use_builtin_presets: default_use_builtin_presets(),
        }
    }
}

/// Helper functions for serde defaults
fn default_environment() -> String { "development".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_use_builtin_presets() -> bool { true }

/// The overrides for one `(kind, timeframe)` registration.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideSet {
    pub kind: RecordKind,
    pub timeframe: Timeframe,
    pub overrides: Vec<Override>,
}

impl Settings {
    /// Turns the raw override tables into typed override sets.
    ///
    /// Tables naming the same timeframe with different spellings (`H1`, `h1`,
    /// `PERIOD_H1`) are merged. Sets come out ordered by kind, then timeframe.
    pub fn override_sets(&self) -> Result<Vec<OverrideSet>> {
        let mut merged: BTreeMap<(RecordKind, Timeframe), Vec<Override>> = BTreeMap::new();

        for (kind_name, by_timeframe) in &self.overrides {
            let kind: RecordKind = kind_name.parse()?;

            for (timeframe_name, fields) in by_timeframe {
                let timeframe: Timeframe = timeframe_name
                    .parse()
                    .map_err(|_| Error::UnknownTimeframe(timeframe_name.clone()))?;

                merged.entry((kind, timeframe)).or_default().extend(
                    fields
                        .iter()
                        .map(|(field, value)| Override::new(field.clone(), value.clone())),
                );
            }
        }

        Ok(merged
            .into_iter()
            .map(|((kind, timeframe), overrides)| OverrideSet {
                kind,
                timeframe,
                overrides,
            })
            .collect())
    }

    /// Every timeframe that has at least one override table, in ascending order.
    pub fn timeframes(&self) -> Result<Vec<Timeframe>> {
        let mut timeframes: Vec<Timeframe> = self
            .override_sets()?
            .into_iter()
            .map(|set| set.timeframe)
            .collect();
        timeframes.sort();
        timeframes.dedup();
        Ok(timeframes)
    }
}

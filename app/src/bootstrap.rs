// In app/src/bootstrap.rs

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use app_config::Settings;
use core_types::{Override, RecordKind, Timeframe};
use params::presets;
use registry::ConfigRegistry;

/// Registers every `(kind, timeframe)` variant that has a built-in preset
/// (when enabled) or an override table in the settings.
///
/// A variant gets its preset overrides first and the file overrides after
/// them, so file values win. Pairs with neither stay unregistered and resolve
/// to `NotConfigured`. Returns the number of registered variants.
pub fn populate(registry: &ConfigRegistry, settings: &Settings) -> Result<usize> {
    let use_presets = settings.app.use_builtin_presets;
    let mut plan: BTreeMap<(RecordKind, Timeframe), Vec<Override>> = BTreeMap::new();

    if use_presets {
        for &timeframe in presets::timeframes() {
            for kind in RecordKind::ALL {
                if let Some(list) = presets::overrides(kind, timeframe) {
                    plan.insert((kind, timeframe), list);
                }
            }
        }
    }

    for set in settings
        .override_sets()
        .context("Invalid parameter override tables")?
    {
        plan.entry((set.kind, set.timeframe))
            .or_default()
            .extend(set.overrides);
    }

    for ((kind, timeframe), list) in &plan {
        registry
            .register(*kind, *timeframe, list)
            .with_context(|| format!("Failed to register {kind} parameters for {timeframe}"))?;
    }

    tracing::info!(
        variants = plan.len(),
        presets = use_presets,
        "Parameter variants registered."
    );
    Ok(plan.len())
}

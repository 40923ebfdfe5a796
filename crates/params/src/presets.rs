// In crates/params/src/presets.rs

//! Tuned per-timeframe overrides shipped with the Bands strategy.

use core_types::{Override, RecordKind, Timeframe, overrides};

const PRESET_TIMEFRAMES: [Timeframe; 3] = [Timeframe::M1, Timeframe::M30, Timeframe::H1];

/// Timeframes that have a preset.
pub fn timeframes() -> &'static [Timeframe] {
    &PRESET_TIMEFRAMES
}

/// Preset overrides for `kind` on `timeframe`, or `None` when no preset exists.
pub fn overrides(kind: RecordKind, timeframe: Timeframe) -> Option<Vec<Override>> {
    match kind {
        RecordKind::IndicatorBands => indicator(timeframe),
        RecordKind::StrategyBands => PRESET_TIMEFRAMES
            .contains(&timeframe)
            .then(strategy),
    }
}

fn indicator(timeframe: Timeframe) -> Option<Vec<Override>> {
    let list = match timeframe {
        Timeframe::M1 => overrides![
            "applied_price" => 2,
            "bshift" => 0,
            "deviation" => 0.5,
            "period" => 7,
            "shift" => 0,
        ],
        Timeframe::M30 => overrides![
            "applied_price" => 2,
            "bshift" => 3,
            "deviation" => 0.35,
            "period" => 2,
            "shift" => 0,
        ],
        Timeframe::H1 => overrides![
            "applied_price" => 0,
            "bshift" => 0,
            "deviation" => 1.7,
            "period" => 22,
            "shift" => 0,
        ],
        _ => return None,
    };
    Some(list)
}

// All preset timeframes currently share the same strategy tuning.
fn strategy() -> Vec<Override> {
    overrides![
        "lot_size" => 0.0,
        "signal_open_method" => 2,
        "signal_open_level" => 0.0,
        "signal_open_boost" => 0,
        "signal_close_method" => 2,
        "signal_close_level" => 0.0,
        "price_profit_method" => 60,
        "price_profit_level" => 6.0,
        "price_stop_method" => 60,
        "price_stop_level" => 6.0,
        "tick_filter_method" => 1,
        "max_spread" => 0.0,
    ]
}

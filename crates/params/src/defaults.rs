// In crates/params/src/defaults.rs

use std::sync::OnceLock;

use core_types::RecordKind;

use crate::{IndicatorParams, Record, StrategyParams};

/// The baseline record of every kind, used as the starting point for variants.
///
/// Only one instance exists, reachable through [`baselines`].
#[derive(Debug, PartialEq)]
pub struct Baselines {
    indicator: IndicatorParams,
    strategy: StrategyParams,
}

impl Baselines {
    /// The compiled-in Bands defaults.
    fn bands() -> Self {
        Self {
            indicator: IndicatorParams::default(),
            strategy: StrategyParams::default(),
        }
    }

    /// Returns a copy of the indicator baseline.
    pub fn indicator(&self) -> IndicatorParams {
        self.indicator.clone()
    }

    /// Returns a copy of the strategy baseline.
    pub fn strategy(&self) -> StrategyParams {
        self.strategy.clone()
    }

    pub fn get(&self, kind: RecordKind) -> Record {
        match kind {
            RecordKind::IndicatorBands => Record::Indicator(self.indicator()),
            RecordKind::StrategyBands => Record::Strategy(self.strategy()),
        }
    }
}

static BASELINES: OnceLock<Baselines> = OnceLock::new();

/// The process-wide baselines, built on first access.
pub fn baselines() -> &'static Baselines {
    BASELINES.get_or_init(Baselines::bands)
}

/// Returns a snapshot of the process-wide baseline for `kind`.
pub fn get_baseline(kind: RecordKind) -> Record {
    baselines().get(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_baselines_are_shared() {
        assert!(std::ptr::eq(baselines(), baselines()));
        assert_eq!(baselines(), &Baselines::bands());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let snapshot = get_baseline(RecordKind::IndicatorBands);
        drop(snapshot);
        assert_eq!(baselines().indicator(), IndicatorParams::default());
        assert_eq!(
            get_baseline(RecordKind::StrategyBands),
            Record::Strategy(StrategyParams::default())
        );
    }
}

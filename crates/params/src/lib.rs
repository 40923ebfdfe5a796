// In crates/params/src/lib.rs

//! Bands indicator and strategy parameter records.
//!
//! Every record kind has one compiled-in baseline. Timeframe variants are
//! produced by copying that baseline and applying a short list of overrides,
//! then validating the result as a whole.

pub mod builder;
pub mod defaults;
mod field;
pub mod indicator;
pub mod presets;
pub mod strategy;

use core_types::{FieldValue, RecordKind, Result, Timeframe};
use serde::Serialize;

pub use builder::{build, build_params};
pub use defaults::{Baselines, baselines, get_baseline};
pub use indicator::IndicatorParams;
pub use strategy::StrategyParams;

/// A resolved parameter record of either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Record {
    #[serde(rename = "indicator_bands")]
    Indicator(IndicatorParams),
    #[serde(rename = "strategy_bands")]
    Strategy(StrategyParams),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Indicator(_) => RecordKind::IndicatorBands,
            Record::Strategy(_) => RecordKind::StrategyBands,
        }
    }

    pub fn as_indicator(&self) -> Option<&IndicatorParams> {
        match self {
            Record::Indicator(params) => Some(params),
            Record::Strategy(_) => None,
        }
    }

    pub fn as_strategy(&self) -> Option<&StrategyParams> {
        match self {
            Record::Strategy(params) => Some(params),
            Record::Indicator(_) => None,
        }
    }
}

mod sealed {
    use super::*;

    /// Mutation hooks used while a variant is being composed.
    ///
    /// Kept out of reach of other crates so a finished record can never be
    /// changed or rebound to another timeframe.
    pub trait Compose: Sized {
        fn baseline(baselines: &Baselines) -> Self;

        fn bind_timeframe(&mut self, _timeframe: Timeframe) {}

        fn set_field(&mut self, field: &str, value: &FieldValue) -> Result<()>;
    }
}

/// The interface shared by all parameter record kinds.
pub trait ParamSet: sealed::Compose + Clone + PartialEq + Send + Sync + 'static {
    /// The record kind this type represents.
    const KIND: RecordKind;

    /// Field names accepted in override tables.
    const FIELDS: &'static [&'static str];

    /// Checks every field against its domain constraint.
    ///
    /// Returns the first violation as `ConfigError::InvalidField`.
    fn validate(&self) -> Result<()>;

    fn into_record(self) -> Record;

    fn from_record(record: Record) -> Option<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_and_views() {
        let record = get_baseline(RecordKind::IndicatorBands);
        assert_eq!(record.kind(), RecordKind::IndicatorBands);
        assert!(record.as_indicator().is_some());
        assert!(record.as_strategy().is_none());

        let record = get_baseline(RecordKind::StrategyBands);
        assert_eq!(record.kind(), RecordKind::StrategyBands);
        assert!(record.as_strategy().is_some());
    }

    #[test]
    fn test_record_serializes_with_kind_tag() {
        let record = build(
            RecordKind::IndicatorBands,
            Timeframe::H1,
            &core_types::overrides!["period" => 22],
        )
        .unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["kind"], "indicator_bands");
        assert_eq!(json["period"], 22);
        assert_eq!(json["timeframe"], "H1");
        assert_eq!(json["applied_price"], "close");
    }

    #[test]
    fn test_from_record_rejects_other_kind() {
        let record = get_baseline(RecordKind::StrategyBands);
        assert!(IndicatorParams::from_record(record.clone()).is_none());
        assert!(StrategyParams::from_record(record).is_some());
    }
}

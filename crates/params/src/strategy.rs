// In crates/params/src/strategy.rs

use std::ops::RangeInclusive;

use core_types::{ConfigError, FieldValue, RecordKind, Result};
use serde::Serialize;

use crate::defaults::Baselines;
use crate::sealed::Compose;
use crate::{ParamSet, Record, field};

/// Signal methods are signed bitmasks. A negative code inverts the method.
pub const SIGNAL_METHOD_CODES: RangeInclusive<i32> = -127..=127;

/// Take-profit and stop-loss placement methods.
pub const PRICE_METHOD_CODES: RangeInclusive<i32> = 0..=255;

/// Tick filters are signed bitmasks like the signal methods.
pub const TICK_FILTER_CODES: RangeInclusive<i32> = -255..=255;

/// Parameters of the strategy trading on the Bands indicator.
///
/// Method fields are opaque codes; only the strategy engine knows what they
/// select. This type checks that they fall in the known code ranges.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StrategyParams {
    lot_size: f64,
    signal_open_method: i32,
    signal_open_level: f64,
    signal_open_boost: u32,
    signal_close_method: i32,
    signal_close_level: f64,
    price_profit_method: i32,
    price_profit_level: f64,
    price_stop_method: i32,
    price_stop_level: f64,
    tick_filter_method: i32,
    max_spread: f64,
}

impl StrategyParams {
    /// Position size; `0` lets the engine pick its default.
    pub fn lot_size(&self) -> f64 {
        self.lot_size
    }

    pub fn signal_open_method(&self) -> i32 {
        self.signal_open_method
    }

    pub fn signal_open_level(&self) -> f64 {
        self.signal_open_level
    }

    /// Non-zero when signal strength scales the position size.
    pub fn signal_open_boost(&self) -> u32 {
        self.signal_open_boost
    }

    pub fn signal_close_method(&self) -> i32 {
        self.signal_close_method
    }

    pub fn signal_close_level(&self) -> f64 {
        self.signal_close_level
    }

    pub fn price_profit_method(&self) -> i32 {
        self.price_profit_method
    }

    pub fn price_profit_level(&self) -> f64 {
        self.price_profit_level
    }

    pub fn price_stop_method(&self) -> i32 {
        self.price_stop_method
    }

    pub fn price_stop_level(&self) -> f64 {
        self.price_stop_level
    }

    pub fn tick_filter_method(&self) -> i32 {
        self.tick_filter_method
    }

    /// Spread cap in points; `0` means no explicit cap.
    pub fn max_spread(&self) -> f64 {
        self.max_spread
    }
}

impl Compose for StrategyParams {
    fn baseline(baselines: &Baselines) -> Self {
        baselines.strategy()
    }

    fn set_field(&mut self, name: &str, value: &FieldValue) -> Result<()> {
        match name {
            "lot_size" => self.lot_size = field::number(name, value)?,
            "signal_open_method" => self.signal_open_method = field::code(name, value)?,
            "signal_open_level" => self.signal_open_level = field::number(name, value)?,
            "signal_open_boost" => self.signal_open_boost = field::flag(name, value)?,
            "signal_close_method" => self.signal_close_method = field::code(name, value)?,
            "signal_close_level" => self.signal_close_level = field::number(name, value)?,
            "price_profit_method" => self.price_profit_method = field::code(name, value)?,
            "price_profit_level" => self.price_profit_level = field::number(name, value)?,
            "price_stop_method" => self.price_stop_method = field::code(name, value)?,
            "price_stop_level" => self.price_stop_level = field::number(name, value)?,
            "tick_filter_method" => self.tick_filter_method = field::code(name, value)?,
            "max_spread" => self.max_spread = field::number(name, value)?,
            _ => {
                return Err(ConfigError::UnknownField {
                    kind: Self::KIND,
                    field: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl ParamSet for StrategyParams {
    const KIND: RecordKind = RecordKind::StrategyBands;

    const FIELDS: &'static [&'static str] = &[
        "lot_size",
        "signal_open_method",
        "signal_open_level",
        "signal_open_boost",
        "signal_close_method",
        "signal_close_level",
        "price_profit_method",
        "price_profit_level",
        "price_stop_method",
        "price_stop_level",
        "tick_filter_method",
        "max_spread",
    ];

    fn validate(&self) -> Result<()> {
        const SIGNAL: &str = "must be a signal method code in -127..=127";
        const PRICE: &str = "must be a price method code in 0..=255";

        field::check_non_negative("lot_size", self.lot_size)?;
        field::check_code("signal_open_method", self.signal_open_method, &SIGNAL_METHOD_CODES, SIGNAL)?;
        field::check_finite("signal_open_level", self.signal_open_level)?;
        field::check_code("signal_close_method", self.signal_close_method, &SIGNAL_METHOD_CODES, SIGNAL)?;
        field::check_finite("signal_close_level", self.signal_close_level)?;
        field::check_code("price_profit_method", self.price_profit_method, &PRICE_METHOD_CODES, PRICE)?;
        field::check_finite("price_profit_level", self.price_profit_level)?;
        field::check_code("price_stop_method", self.price_stop_method, &PRICE_METHOD_CODES, PRICE)?;
        field::check_finite("price_stop_level", self.price_stop_level)?;
        field::check_code(
            "tick_filter_method",
            self.tick_filter_method,
            &TICK_FILTER_CODES,
            "must be a tick filter code in -255..=255",
        )?;
        field::check_non_negative("max_spread", self.max_spread)?;
        Ok(())
    }

    fn into_record(self) -> Record {
        Record::Strategy(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Strategy(params) => Some(params),
            Record::Indicator(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_is_all_zero() {
        let params = StrategyParams::default();
        assert_eq!(params.lot_size(), 0.0);
        assert_eq!(params.signal_open_method(), 0);
        assert_eq!(params.signal_open_boost(), 0);
        assert_eq!(params.price_profit_method(), 0);
        assert_eq!(params.tick_filter_method(), 0);
        assert_eq!(params.max_spread(), 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_levels_accept_integers() {
        let mut params = StrategyParams::default();
        params.set_field("price_profit_level", &FieldValue::Int(6)).unwrap();
        params.set_field("signal_open_level", &FieldValue::Float(-0.5)).unwrap();
        assert_eq!(params.price_profit_level(), 6.0);
        assert_eq!(params.signal_open_level(), -0.5);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_method_codes_reject_floats() {
        let mut params = StrategyParams::default();
        let err = params
            .set_field("signal_open_method", &FieldValue::Float(2.0))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { constraint: "expected an integer", .. }));
    }

    #[test]
    fn test_validate_code_ranges() {
        let mut params = StrategyParams::default();
        params.set_field("signal_close_method", &FieldValue::Int(-2)).unwrap();
        assert!(params.validate().is_ok());

        params.set_field("price_stop_method", &FieldValue::Int(-1)).unwrap();
        assert_eq!(
            params.validate(),
            Err(ConfigError::invalid_field(
                "price_stop_method",
                FieldValue::Int(-1),
                "must be a price method code in 0..=255"
            ))
        );
    }

    #[test]
    fn test_validate_reports_first_violation() {
        let mut params = StrategyParams::default();
        params.set_field("max_spread", &FieldValue::Float(-1.0)).unwrap();
        params.set_field("lot_size", &FieldValue::Float(-0.1)).unwrap();

        let err = params.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { ref field, .. } if field == "lot_size"));
    }

    #[test]
    fn test_unknown_field() {
        let mut params = StrategyParams::default();
        assert_eq!(
            params.set_field("period", &FieldValue::Int(14)),
            Err(ConfigError::UnknownField {
                kind: RecordKind::StrategyBands,
                field: "period".to_string(),
            })
        );
    }
}

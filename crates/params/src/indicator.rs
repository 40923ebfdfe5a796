// In crates/params/src/indicator.rs

use core_types::{AppliedPrice, ConfigError, FieldValue, RecordKind, Result, Timeframe};
use serde::Serialize;

use crate::defaults::Baselines;
use crate::sealed::Compose;
use crate::{ParamSet, Record, field};

/// Parameters of the Bands indicator.
///
/// Instances come either from [`Baselines`] or from the variant builder and
/// cannot be modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorParams {
    applied_price: AppliedPrice,
    bshift: u32,
    deviation: f64,
    period: u32,
    shift: u32,
    /// `None` only on the baseline.
    #[serde(skip_serializing_if = "Option::is_none")]
    timeframe: Option<Timeframe>,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            applied_price: AppliedPrice::Close,
            bshift: 0,
            deviation: 1.0,
            period: 14,
            shift: 0,
            timeframe: None,
        }
    }
}

impl IndicatorParams {
    /// Price series fed into the bands.
    pub fn applied_price(&self) -> AppliedPrice {
        self.applied_price
    }

    /// Bar shift of the base line.
    pub fn bshift(&self) -> u32 {
        self.bshift
    }

    /// Standard deviation multiplier of the band width.
    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    /// Lookback window in bars.
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Shift applied to the indicator output.
    pub fn shift(&self) -> u32 {
        self.shift
    }

    pub fn timeframe(&self) -> Option<Timeframe> {
        self.timeframe
    }
}

fn applied_price(value: &FieldValue) -> Result<AppliedPrice> {
    let parsed = match value {
        FieldValue::Int(code) => AppliedPrice::from_code(*code),
        FieldValue::Text(name) => AppliedPrice::from_name(name),
        _ => None,
    };
    parsed.ok_or_else(|| {
        ConfigError::invalid_field(
            "applied_price",
            value.clone(),
            "expected a price code in 0..=6 or a price name",
        )
    })
}

impl Compose for IndicatorParams {
    fn baseline(baselines: &Baselines) -> Self {
        baselines.indicator()
    }

    fn bind_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = Some(timeframe);
    }

    fn set_field(&mut self, name: &str, value: &FieldValue) -> Result<()> {
        match name {
            "applied_price" => self.applied_price = applied_price(value)?,
            "bshift" => self.bshift = field::non_negative(name, value)?,
            "deviation" => self.deviation = field::number(name, value)?,
            "period" => self.period = field::non_negative(name, value)?,
            "shift" => self.shift = field::non_negative(name, value)?,
            "timeframe" => {
                return Err(ConfigError::invalid_field(
                    name,
                    value.clone(),
                    "timeframe is bound by the registration key",
                ));
            }
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

impl ParamSet for IndicatorParams {
    const KIND: RecordKind = RecordKind::IndicatorBands;

    const FIELDS: &'static [&'static str] =
        &["applied_price", "bshift", "deviation", "period", "shift"];

    fn validate(&self) -> Result<()> {
        if self.period == 0 {
            return Err(ConfigError::invalid_field(
                "period",
                self.period.into(),
                "must be > 0",
            ));
        }
        if !(self.deviation.is_finite() && self.deviation > 0.0) {
            return Err(ConfigError::invalid_field(
                "deviation",
                self.deviation.into(),
                "must be a finite number > 0",
            ));
        }
        Ok(())
    }

    fn into_record(self) -> Record {
        Record::Indicator(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Indicator(params) => Some(params),
            Record::Strategy(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_values() {
        let params = IndicatorParams::default();
        assert_eq!(params.applied_price(), AppliedPrice::Close);
        assert_eq!(params.bshift(), 0);
        assert_eq!(params.deviation(), 1.0);
        assert_eq!(params.period(), 14);
        assert_eq!(params.shift(), 0);
        assert_eq!(params.timeframe(), None);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_set_applied_price_by_code_and_name() {
        let mut params = IndicatorParams::default();
        params.set_field("applied_price", &FieldValue::Int(2)).unwrap();
        assert_eq!(params.applied_price(), AppliedPrice::High);

        params
            .set_field("applied_price", &FieldValue::Text("typical".into()))
            .unwrap();
        assert_eq!(params.applied_price(), AppliedPrice::Typical);

        let err = params
            .set_field("applied_price", &FieldValue::Int(9))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { ref field, .. } if field == "applied_price"));
    }

    #[test]
    fn test_unknown_field() {
        let mut params = IndicatorParams::default();
        let err = params.set_field("lot_size", &FieldValue::Int(1)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownField {
                kind: RecordKind::IndicatorBands,
                field: "lot_size".to_string(),
            }
        );
    }

    #[test]
    fn test_timeframe_is_not_an_override() {
        let mut params = IndicatorParams::default();
        params.bind_timeframe(Timeframe::M1);
        assert!(params
            .set_field("timeframe", &FieldValue::Text("H1".into()))
            .is_err());
        assert_eq!(params.timeframe(), Some(Timeframe::M1));
    }

    #[test]
    fn test_validate_rejects_zero_period_and_bad_deviation() {
        let mut params = IndicatorParams::default();
        params.set_field("period", &FieldValue::Int(0)).unwrap();
        assert_eq!(
            params.validate(),
            Err(ConfigError::invalid_field("period", FieldValue::Int(0), "must be > 0"))
        );

        let mut params = IndicatorParams::default();
        params.set_field("deviation", &FieldValue::Float(0.0)).unwrap();
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidField { ref field, .. }) if field == "deviation"
        ));

        let mut params = IndicatorParams::default();
        params.set_field("deviation", &FieldValue::Float(f64::INFINITY)).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_every_listed_field_is_settable() {
        for name in IndicatorParams::FIELDS {
            let mut params = IndicatorParams::default();
            params
                .set_field(name, &FieldValue::Int(1))
                .unwrap_or_else(|e| panic!("{name}: {e}"));
        }
    }
}

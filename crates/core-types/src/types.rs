// In crates/core-types/src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ConfigError;

/// Chart timeframe a parameter variant is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// 1 minute
    M1,
    /// 5 minutes
    M5,
    /// 15 minutes
    M15,
    /// 30 minutes
    M30,
    /// 1 hour
    H1,
    /// 2 hours
    H2,
    /// 3 hours
    H3,
    /// 4 hours
    H4,
    /// 6 hours
    H6,
    /// 8 hours
    H8,
    /// 12 hours
    H12,
    /// 1 day
    D1,
    /// 1 week
    W1,
    /// 1 month
    MN1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 14] = [
        Timeframe::M1,
        Timeframe::M5,
        Timeframe::M15,
        Timeframe::M30,
        Timeframe::H1,
        Timeframe::H2,
        Timeframe::H3,
        Timeframe::H4,
        Timeframe::H6,
        Timeframe::H8,
        Timeframe::H12,
        Timeframe::D1,
        Timeframe::W1,
        Timeframe::MN1,
    ];

    /// Bar length in minutes. A month counts as 30 days.
    #[must_use]
    pub fn minutes(&self) -> u32 {
        match self {
            Timeframe::M1 => 1,
            Timeframe::M5 => 5,
            Timeframe::M15 => 15,
            Timeframe::M30 => 30,
            Timeframe::H1 => 60,
            Timeframe::H2 => 120,
            Timeframe::H3 => 180,
            Timeframe::H4 => 240,
            Timeframe::H6 => 360,
            Timeframe::H8 => 480,
            Timeframe::H12 => 720,
            Timeframe::D1 => 1_440,
            Timeframe::W1 => 10_080,
            Timeframe::MN1 => 43_200,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M1 => "M1",
            Timeframe::M5 => "M5",
            Timeframe::M15 => "M15",
            Timeframe::M30 => "M30",
            Timeframe::H1 => "H1",
            Timeframe::H2 => "H2",
            Timeframe::H3 => "H3",
            Timeframe::H4 => "H4",
            Timeframe::H6 => "H6",
            Timeframe::H8 => "H8",
            Timeframe::H12 => "H12",
            Timeframe::D1 => "D1",
            Timeframe::W1 => "W1",
            Timeframe::MN1 => "MN1",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing timeframe
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid timeframe string")]
pub struct ParseTimeframeError;

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    /// Accepts `H1`, `h1` and the platform spelling `PERIOD_H1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let name = upper.strip_prefix("PERIOD_").unwrap_or(&upper);
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str() == name)
            .ok_or(ParseTimeframeError)
    }
}

/// Price series an indicator is computed on.
///
/// Discriminants follow the trading platform's numeric codes, which is how
/// override tables usually refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppliedPrice {
    #[default]
    Close = 0,
    Open = 1,
    High = 2,
    Low = 3,
    /// (high + low) / 2
    Median = 4,
    /// (high + low + close) / 3
    Typical = 5,
    /// (high + low + 2 * close) / 4
    Weighted = 6,
}

impl AppliedPrice {
    pub const ALL: [AppliedPrice; 7] = [
        AppliedPrice::Close,
        AppliedPrice::Open,
        AppliedPrice::High,
        AppliedPrice::Low,
        AppliedPrice::Median,
        AppliedPrice::Typical,
        AppliedPrice::Weighted,
    ];

    #[must_use]
    pub fn code(&self) -> i64 {
        *self as i64
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        AppliedPrice::ALL.into_iter().find(|p| p.code() == code)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AppliedPrice::Close => "close",
            AppliedPrice::Open => "open",
            AppliedPrice::High => "high",
            AppliedPrice::Low => "low",
            AppliedPrice::Median => "median",
            AppliedPrice::Typical => "typical",
            AppliedPrice::Weighted => "weighted",
        }
    }

    /// Looks a price mode up by name, with or without the `price_` prefix.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        let name = lower.strip_prefix("price_").unwrap_or(&lower);
        AppliedPrice::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for AppliedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parameter record families the registry knows how to compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Bands indicator parameters.
    IndicatorBands,
    /// Parameters of the strategy trading on the Bands indicator.
    StrategyBands,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::IndicatorBands, RecordKind::StrategyBands];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::IndicatorBands => "indicator_bands",
            RecordKind::StrategyBands => "strategy_bands",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ConfigError;

    /// Accepts `indicator_bands` as well as `IndicatorBands`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "");
        match normalized.as_str() {
            "indicatorbands" => Ok(RecordKind::IndicatorBands),
            "strategybands" => Ok(RecordKind::StrategyBands),
            _ => Err(ConfigError::UnknownKind(s.to_string())),
        }
    }
}

// In crates/core-types/src/error.rs

use thiserror::Error;

use crate::overrides::FieldValue;
use crate::types::{RecordKind, Timeframe};

/// Failures raised while composing or looking up parameter records.
///
/// Every variant describes a deployment or programming mistake. None of them
/// is transient, so callers are expected to stop at startup instead of retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown parameter record kind: '{0}'")]
    UnknownKind(String),

    #[error("Unknown field '{field}' for {kind} parameters")]
    UnknownField { kind: RecordKind, field: String },

    #[error("Invalid value {value} for field '{field}': {constraint}")]
    InvalidField {
        field: String,
        value: FieldValue,
        constraint: &'static str,
    },

    #[error("{kind} parameters for {timeframe} are already registered")]
    DuplicateRegistration {
        kind: RecordKind,
        timeframe: Timeframe,
    },

    #[error("No {kind} parameters configured for {timeframe}")]
    NotConfigured {
        kind: RecordKind,
        timeframe: Timeframe,
    },

    #[error("Parameter registry is frozen, no further registrations are accepted")]
    RegistryFrozen,
}

impl ConfigError {
    /// Creates an `InvalidField` error for `field` holding `value`.
    pub fn invalid_field(
        field: impl Into<String>,
        value: FieldValue,
        constraint: &'static str,
    ) -> Self {
        ConfigError::InvalidField {
            field: field.into(),
            value,
            constraint,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_display() {
        let err = ConfigError::invalid_field("period", FieldValue::Int(0), "must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid value 0 for field 'period': must be > 0"
        );
    }

    #[test]
    fn test_lookup_errors_name_the_key() {
        let err = ConfigError::NotConfigured {
            kind: RecordKind::IndicatorBands,
            timeframe: Timeframe::M30,
        };
        assert_eq!(
            err.to_string(),
            "No indicator_bands parameters configured for M30"
        );

        let err = ConfigError::DuplicateRegistration {
            kind: RecordKind::StrategyBands,
            timeframe: Timeframe::H1,
        };
        assert_eq!(
            err.to_string(),
            "strategy_bands parameters for H1 are already registered"
        );
    }
}

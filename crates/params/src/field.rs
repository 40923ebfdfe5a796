// In crates/params/src/field.rs

//! Conversions from raw override values into typed record fields.

use std::ops::RangeInclusive;

use core_types::{ConfigError, FieldValue, Result};

pub(crate) fn integer(field: &str, value: &FieldValue) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| ConfigError::invalid_field(field, value.clone(), "expected an integer"))
}

pub(crate) fn non_negative(field: &str, value: &FieldValue) -> Result<u32> {
    let raw = integer(field, value)?;
    u32::try_from(raw).map_err(|_| {
        ConfigError::invalid_field(field, value.clone(), "must be an integer >= 0")
    })
}

pub(crate) fn code(field: &str, value: &FieldValue) -> Result<i32> {
    let raw = integer(field, value)?;
    i32::try_from(raw).map_err(|_| {
        ConfigError::invalid_field(field, value.clone(), "must fit a 32-bit method code")
    })
}

pub(crate) fn number(field: &str, value: &FieldValue) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| ConfigError::invalid_field(field, value.clone(), "expected a number"))
}

/// Accepts `true`/`false` as well as plain non-negative integers.
pub(crate) fn flag(field: &str, value: &FieldValue) -> Result<u32> {
    match value.as_bool() {
        Some(enabled) => Ok(u32::from(enabled)),
        None => non_negative(field, value),
    }
}

pub(crate) fn check_code(
    field: &str,
    code: i32,
    allowed: &RangeInclusive<i32>,
    constraint: &'static str,
) -> Result<()> {
    if allowed.contains(&code) {
        Ok(())
    } else {
        Err(ConfigError::invalid_field(field, code.into(), constraint))
    }
}

pub(crate) fn check_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid_field(field, value.into(), "must be a finite number"))
    }
}

pub(crate) fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid_field(field, value.into(), "must be a finite number >= 0"))
    }
}

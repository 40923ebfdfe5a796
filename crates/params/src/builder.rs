// In crates/params/src/builder.rs

use core_types::{Override, RecordKind, Result, Timeframe};

use crate::defaults::baselines;
use crate::sealed::Compose;
use crate::{IndicatorParams, ParamSet, Record, StrategyParams};

/// Builds the `kind` variant for `timeframe` on top of the process-wide baselines.
///
/// Overrides are applied in order, so a repeated field keeps its last value.
/// Nothing is returned unless the complete record passes validation.
pub fn build(kind: RecordKind, timeframe: Timeframe, overrides: &[Override]) -> Result<Record> {
    match kind {
        RecordKind::IndicatorBands => {
            build_params::<IndicatorParams>(timeframe, overrides).map(ParamSet::into_record)
        }
        RecordKind::StrategyBands => {
            build_params::<StrategyParams>(timeframe, overrides).map(ParamSet::into_record)
        }
    }
}

/// Typed variant of [`build`].
pub fn build_params<P: ParamSet>(timeframe: Timeframe, overrides: &[Override]) -> Result<P> {
    let mut params = P::baseline(baselines());
    params.bind_timeframe(timeframe);

    for Override { field, value } in overrides {
        params.set_field(field, value)?;
    }

    params.validate()?;
    Ok(params)
}

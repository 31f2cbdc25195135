//! Indicator precomputation — every extracted indicator, once, over
//! the full candle series, before the bar loop starts.
//!
//! Columns are computed in parallel (they are independent of each
//! other) and the fill policy is applied in exactly one place here:
//! any non-finite value becomes 0.0. Warm-up NaN is expected and
//! silent; a non-finite value past the indicator's lookback is
//! suspicious and logged.

use crate::domain::Candle;
use crate::engine::columns::IndicatorColumns;
use crate::error::ConfigError;
use crate::indicators::build_indicator;
use crate::strategy::IndicatorRef;
use rayon::prelude::*;
use tracing::warn;

/// Compute every referenced indicator into a named column set.
pub fn precompute(
    refs: &[IndicatorRef],
    candles: &[Candle],
) -> Result<IndicatorColumns, ConfigError> {
    let indicators = refs
        .iter()
        .map(build_indicator)
        .collect::<Result<Vec<_>, _>>()?;

    let computed: Vec<(String, Vec<f64>)> = indicators
        .par_iter()
        .map(|indicator| {
            let mut values = indicator.compute(candles);
            for (i, value) in values.iter_mut().enumerate() {
                if !value.is_finite() {
                    if i >= indicator.lookback() {
                        warn!(
                            column = indicator.name(),
                            index = i,
                            "non-finite indicator value past warm-up, zero-filled"
                        );
                    }
                    *value = 0.0;
                }
            }
            (indicator.name().to_string(), values)
        })
        .collect();

    let mut columns = IndicatorColumns::new();
    for (name, values) in computed {
        columns.insert(name, values);
    }
    Ok(columns)
}

//! Merge the candle series with its indicator columns.
//!
//! Alignment is by index position, never by date lookup, so the bar
//! loop gets O(1) access to every value.

use crate::domain::{AugmentedCandle, Candle};
use crate::engine::columns::IndicatorColumns;
use crate::error::ConfigError;
use std::collections::BTreeMap;

/// Build the augmented series the evaluator and simulator run over.
pub fn augment(
    candles: &[Candle],
    columns: &IndicatorColumns,
) -> Result<Vec<AugmentedCandle>, ConfigError> {
    for (name, series) in columns.iter() {
        if series.len() != candles.len() {
            return Err(ConfigError::SeriesLengthMismatch {
                column: name.to_string(),
                expected: candles.len(),
                actual: series.len(),
            });
        }
    }

    Ok(candles
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let indicators: BTreeMap<String, f64> = columns
                .iter()
                .map(|(name, series)| (name.to_string(), series[i]))
                .collect();
            AugmentedCandle {
                candle: candle.clone(),
                indicators,
            }
        })
        .collect())
}

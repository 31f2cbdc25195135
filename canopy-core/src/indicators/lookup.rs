//! Per-bar lookups — indicator kinds that read candle fields directly.
//!
//! These never go through the precompute stage: they are resolved at
//! evaluation time against the bar under the cursor. PREV_HIGH and
//! PREV_LOW clamp to the current bar at index 0 (no previous bar).

use crate::domain::AugmentedCandle;
use crate::strategy::IndicatorKind;

/// Resolve a lookup kind against bar `i` of the augmented series.
///
/// USDINR presence is validated before the bar loop, so a missing rate
/// here reads as 0.0 rather than failing mid-simulation.
pub fn lookup_value(series: &[AugmentedCandle], kind: IndicatorKind, i: usize) -> f64 {
    let candle = &series[i].candle;
    match kind {
        IndicatorKind::Price => candle.close,
        IndicatorKind::Open => candle.open,
        IndicatorKind::High => candle.high,
        IndicatorKind::Low => candle.low,
        IndicatorKind::Volume => candle.volume,
        IndicatorKind::PrevHigh => {
            if i == 0 {
                candle.high
            } else {
                series[i - 1].candle.high
            }
        }
        IndicatorKind::PrevLow => {
            if i == 0 {
                candle.low
            } else {
                series[i - 1].candle.low
            }
        }
        IndicatorKind::Usdinr => candle.usd_inr.unwrap_or(0.0),
        other => unreachable!("{other} is precomputed, not a per-bar lookup"),
    }
}

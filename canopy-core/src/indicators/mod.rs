//! Concrete indicator implementations.
//!
//! Every computed indicator kind implements the `Indicator` trait and
//! is precomputed once over the full candle series before the bar loop
//! (see `engine::precompute`). Lookup kinds (PRICE, PREV_HIGH, ...)
//! are direct per-bar reads and live in `lookup`.
//!
//! Internally the calculators emit `f64::NAN` during warm-up and keep
//! the formulas honest; the engine's fill policy replaces non-finite
//! values with 0.0 in one place, after computation.
//!
//! # Look-ahead contamination guard
//! No indicator value at bar t may depend on candles after bar t.
//! Every calculator must pass the truncated-vs-full series test.

pub mod atr;
pub mod bollinger;
pub mod cpr;
pub mod ema;
pub mod factory;
pub mod lookup;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use atr::Atr;
pub use bollinger::{Bollinger, BollingerBand};
pub use cpr::{Cpr, CprLevel};
pub use ema::Ema;
pub use factory::build_indicator;
pub use lookup::lookup_value;
pub use macd::{Macd, MacdOutput};
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::{Stochastic, StochOutput};

use crate::domain::Candle;

/// Trait for computed indicators.
///
/// Calculators take the full candle series and produce a numeric
/// series of the same length, causally: the value at index i depends
/// only on candles at indices <= i. The first `lookback()` values are
/// `f64::NAN` (warm-up).
pub trait Indicator: Send + Sync + std::fmt::Debug {
    /// Column name in the augmented series (e.g., "sma_20", "cpr_tc").
    fn name(&self) -> &str;

    /// Number of bars before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the entire candle series.
    fn compute(&self, candles: &[Candle]) -> Vec<f64>;
}

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first
/// bar), high = max(open, close) + 1.0, low = min(open, close) - 1.0.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Candle {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000.0,
                usd_inr: None,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

//! Stochastic oscillator (%K and %D).
//!
//! %K = 100 * (close - lowest_low(period)) / (highest_high(period) - lowest_low(period))
//! %D = SMA(%K, 3)
//!
//! A zero-width high/low range leaves %K undefined (NaN); the engine's
//! fill policy downgrades that to 0.0 with a warning.
//! Lookback: period - 1 for %K, period + 1 for %D.

use crate::domain::Candle;
use crate::indicators::sma::sma_of_series;
use crate::indicators::Indicator;

const SMOOTH_SPAN: usize = 3;

/// Which stochastic series to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochOutput {
    PercentK,
    PercentD,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    output: StochOutput,
    name: String,
}

impl Stochastic {
    pub fn percent_k(period: usize) -> Self {
        assert!(period >= 1, "stochastic period must be >= 1");
        Self {
            period,
            output: StochOutput::PercentK,
            name: format!("stoch_k_{period}"),
        }
    }

    pub fn percent_d(period: usize) -> Self {
        assert!(period >= 1, "stochastic period must be >= 1");
        Self {
            period,
            output: StochOutput::PercentD,
            name: format!("stoch_d_{period}"),
        }
    }

    fn percent_k_series(&self, candles: &[Candle]) -> Vec<f64> {
        let n = candles.len();
        let mut result = vec![f64::NAN; n];

        for i in (self.period - 1)..n {
            let window = &candles[(i + 1 - self.period)..=i];
            let highest = window.iter().map(|c| c.high).fold(f64::MIN, f64::max);
            let lowest = window.iter().map(|c| c.low).fold(f64::MAX, f64::min);
            let range = highest - lowest;
            if range == 0.0 {
                // Degenerate flat window; left undefined here, zeroed
                // by the fill policy downstream.
                continue;
            }
            result[i] = 100.0 * (candles[i].close - lowest) / range;
        }

        result
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            StochOutput::PercentK => self.period - 1,
            StochOutput::PercentD => self.period - 1 + SMOOTH_SPAN - 1,
        }
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        if candles.len() < self.period {
            return vec![f64::NAN; candles.len()];
        }
        let k = self.percent_k_series(candles);
        match self.output {
            StochOutput::PercentK => k,
            StochOutput::PercentD => sma_of_series(&k, SMOOTH_SPAN),
        }
    }
}

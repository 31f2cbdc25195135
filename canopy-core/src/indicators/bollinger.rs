//! Bollinger Bands — SMA +/- a standard-deviation multiplier.
//!
//! Three bands (separate Indicator instances):
//! - middle: SMA(close, period)
//! - upper: middle + K * stddev(close, period)
//! - lower: middle - K * stddev(close, period)
//!
//! K = 2, population stddev (divide by N). Lookback: period - 1.

use crate::domain::Candle;
use crate::indicators::Indicator;

const STDDEV_MULT: f64 = 2.0;

/// Which band to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn upper(period: usize) -> Self {
        Self::new(period, BollingerBand::Upper, "bb_upper")
    }

    pub fn middle(period: usize) -> Self {
        Self::new(period, BollingerBand::Middle, "bb_middle")
    }

    pub fn lower(period: usize) -> Self {
        Self::new(period, BollingerBand::Lower, "bb_lower")
    }

    fn new(period: usize, band: BollingerBand, prefix: &str) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            band,
            name: format!("{prefix}_{period}"),
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let n = candles.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &candles[(i + 1 - self.period)..=i];
            let mean = window.iter().map(|c| c.close).sum::<f64>() / self.period as f64;

            result[i] = match self.band {
                BollingerBand::Middle => mean,
                BollingerBand::Upper | BollingerBand::Lower => {
                    let variance = window
                        .iter()
                        .map(|c| {
                            let diff = c.close - mean;
                            diff * diff
                        })
                        .sum::<f64>()
                        / self.period as f64;
                    let offset = STDDEV_MULT * variance.sqrt();
                    match self.band {
                        BollingerBand::Upper => mean + offset,
                        BollingerBand::Lower => mean - offset,
                        BollingerBand::Middle => unreachable!(),
                    }
                }
            };
        }

        result
    }
}

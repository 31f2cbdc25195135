//! MACD — Moving Average Convergence/Divergence.
//!
//! Three series, exposed as separate named instances:
//! - line: EMA(close, 12) - EMA(close, 26)
//! - signal: EMA(line, 9)
//! - histogram: line - signal
//!
//! The 12/26/9 spans are the standard constants. The `period` a
//! strategy document declares on a MACD reference is kept for column
//! naming and dedup identity only; it does not change the spans.
//! Lookback: 25 for the line, 33 for signal and histogram.

use crate::domain::Candle;
use crate::indicators::ema::{ema_of_partial_series, ema_of_series};
use crate::indicators::Indicator;

const FAST_SPAN: usize = 12;
const SLOW_SPAN: usize = 26;
const SIGNAL_SPAN: usize = 9;

/// Which MACD series to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    output: MacdOutput,
    name: String,
}

impl Macd {
    pub fn line(declared_period: usize) -> Self {
        Self {
            output: MacdOutput::Line,
            name: format!("macd_{declared_period}"),
        }
    }

    pub fn signal(declared_period: usize) -> Self {
        Self {
            output: MacdOutput::Signal,
            name: format!("macd_signal_{declared_period}"),
        }
    }

    pub fn histogram(declared_period: usize) -> Self {
        Self {
            output: MacdOutput::Histogram,
            name: format!("macd_hist_{declared_period}"),
        }
    }
}

/// MACD line over raw closes: EMA(12) - EMA(26).
fn macd_line(closes: &[f64]) -> Vec<f64> {
    let fast = ema_of_series(closes, FAST_SPAN);
    let slow = ema_of_series(closes, SLOW_SPAN);
    fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            MacdOutput::Line => SLOW_SPAN - 1,
            MacdOutput::Signal | MacdOutput::Histogram => SLOW_SPAN - 1 + SIGNAL_SPAN - 1,
        }
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let line = macd_line(&closes);
        match self.output {
            MacdOutput::Line => line,
            MacdOutput::Signal => ema_of_partial_series(&line, SIGNAL_SPAN),
            MacdOutput::Histogram => {
                let signal = ema_of_partial_series(&line, SIGNAL_SPAN);
                line.iter().zip(&signal).map(|(l, s)| l - s).collect()
            }
        }
    }
}

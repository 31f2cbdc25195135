//! Candle — the fundamental market data unit.

use crate::error::DataError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Daily OHLCV candle.
///
/// `usd_inr` is an optional extra column for strategies that compare
/// against the USD/INR rate; data sources that don't carry it simply
/// omit the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_inr: Option<f64>,
}

impl Candle {
    /// Basic OHLC sanity check: high >= low, both bracket open and close.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}

/// A candle merged with every indicator column the strategy needs,
/// index-aligned with the raw series.
///
/// Columns live in a `BTreeMap` so serialization order is stable —
/// required for the byte-identical determinism contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedCandle {
    #[serde(flatten)]
    pub candle: Candle,
    pub indicators: BTreeMap<String, f64>,
}

impl AugmentedCandle {
    /// Value of a precomputed indicator column at this bar.
    pub fn indicator(&self, column: &str) -> Option<f64> {
        self.indicators.get(column).copied()
    }
}

/// Validate a candle series before any computation touches it.
///
/// Rules: non-empty, strictly ascending unique dates, every OHLCV
/// value finite (a present `usd_inr` must be finite too), and every
/// price strictly positive — position sizing divides by the close, and
/// percent-based stop/target levels are meaningless at or below zero.
pub fn validate_candles(candles: &[Candle]) -> Result<(), DataError> {
    if candles.is_empty() {
        return Err(DataError::EmptySeries);
    }

    for (i, candle) in candles.iter().enumerate() {
        let prices: [(&'static str, f64); 4] = [
            ("open", candle.open),
            ("high", candle.high),
            ("low", candle.low),
            ("close", candle.close),
        ];
        for (field, value) in prices {
            if !value.is_finite() {
                return Err(DataError::NonFiniteValue { index: i, field });
            }
            if value <= 0.0 {
                return Err(DataError::NonPositivePrice { index: i, field });
            }
        }
        if !candle.volume.is_finite() {
            return Err(DataError::NonFiniteValue {
                index: i,
                field: "volume",
            });
        }
        if let Some(rate) = candle.usd_inr {
            if !rate.is_finite() {
                return Err(DataError::NonFiniteValue {
                    index: i,
                    field: "usd_inr",
                });
            }
        }

        if i > 0 {
            let prev = candles[i - 1].date;
            if candle.date == prev {
                return Err(DataError::DuplicateDate {
                    index: i,
                    date: candle.date,
                });
            }
            if candle.date < prev {
                return Err(DataError::UnsortedDates {
                    index: i,
                    date: candle.date,
                });
            }
        }
    }

    Ok(())
}

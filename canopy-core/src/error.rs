//! Structured error types for the engine.
//!
//! Two fatal families, both raised before the bar loop starts:
//! - `ConfigError` — the strategy document is malformed.
//! - `DataError` — the candle series is unusable.
//!
//! Non-finite indicator output is not an error: the precompute stage
//! degrades it to 0.0 and logs a warning (see `engine::precompute`).

use crate::strategy::IndicatorKind;
use chrono::NaiveDate;
use thiserror::Error;

/// A malformed strategy document. Fatal; no simulation is attempted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("indicator {kind} requires a period{}", node_id.as_deref().map(|id| format!(" (condition '{id}')")).unwrap_or_default())]
    MissingPeriod {
        kind: IndicatorKind,
        node_id: Option<String>,
    },

    #[error("indicator {kind} is a per-bar lookup, not a computed series")]
    NotComputed { kind: IndicatorKind },

    #[error("condition '{node_id}' has both 'right' and 'value' set")]
    AmbiguousOperand { node_id: String },

    #[error("condition '{node_id}' has neither 'right' nor 'value' set")]
    MissingOperand { node_id: String },

    #[error("duplicate node id '{node_id}' in strategy tree")]
    DuplicateNodeId { node_id: String },

    #[error("strategy references USDINR but the candle data carries no usd_inr rate")]
    MissingUsdInrSeries,

    #[error("stop-loss/take-profit percentage must be finite and non-negative, got {value}")]
    InvalidRiskPct { value: f64 },

    #[error("indicator column '{column}' has {actual} values for {expected} candles")]
    SeriesLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// An unusable candle series. Fatal; reported before the bar loop.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("candle series is empty")]
    EmptySeries,

    #[error("candle series not in ascending date order at index {index} ({date})")]
    UnsortedDates { index: usize, date: NaiveDate },

    #[error("duplicate candle date {date} at index {index}")]
    DuplicateDate { index: usize, date: NaiveDate },

    #[error("non-finite {field} at index {index}")]
    NonFiniteValue { index: usize, field: &'static str },

    #[error("non-positive {field} at index {index}")]
    NonPositivePrice { index: usize, field: &'static str },
}

/// Top-level engine error surfaced to callers of `run`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("run cancelled at bar {bar_index}; partial results discarded")]
    Cancelled { bar_index: usize },
}

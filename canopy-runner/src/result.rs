//! The backtest result document returned to callers.

use crate::metrics::Metrics;
use canopy_core::domain::{AugmentedCandle, EquityPoint, Trade};
use serde::{Deserialize, Serialize};

/// Complete result of one backtest run.
///
/// Contains everything a caller needs to render the run: the trade
/// log (last entry possibly still OPEN), the per-bar equity curve,
/// the summary metrics, and the augmented price series the charts
/// plot indicator overlays from.
///
/// Serialization is deterministic: identical inputs produce
/// byte-identical JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    pub trades: Vec<Trade>,
    pub initial_equity: f64,
    pub final_equity: f64,
    pub metrics: Metrics,
    pub equity_curve: Vec<EquityPoint>,
    pub price_data: Vec<AugmentedCandle>,
}

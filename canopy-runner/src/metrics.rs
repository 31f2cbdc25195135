//! Performance metrics — pure functions that compute run statistics.
//!
//! Every metric is a pure reduction: equity curve and/or trade list
//! in, scalar out. No dependencies on the runner or the engine. Every
//! degenerate input (no trades, constant equity, single bar) produces
//! 0.0, never NaN or infinity.

use canopy_core::domain::{EquityPoint, Trade};
use serde::{Deserialize, Serialize};

/// Aggregate performance metrics for a single run.
///
/// Open trades at series end are excluded from `win_rate` and
/// `trades_count` but their unrealized mark is part of the equity
/// curve the return metrics see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_return: f64,
    pub win_rate: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub trades_count: usize,
}

impl Metrics {
    /// Compute all metrics from the simulation output.
    pub fn compute(trades: &[Trade], equity_curve: &[EquityPoint], initial_equity: f64) -> Self {
        let equity: Vec<f64> = equity_curve.iter().map(|p| p.equity).collect();
        let final_equity = equity.last().copied().unwrap_or(initial_equity);
        Self {
            total_return: total_return(initial_equity, final_equity),
            win_rate: win_rate(trades),
            max_drawdown: max_drawdown(&equity),
            sharpe_ratio: sharpe_ratio(&equity),
            trades_count: trades.iter().filter(|t| t.is_closed()).count(),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return as a fraction: (final - initial) / initial.
pub fn total_return(initial_equity: f64, final_equity: f64) -> f64 {
    if initial_equity <= 0.0 {
        return 0.0;
    }
    (final_equity - initial_equity) / initial_equity
}

/// Fraction of CLOSED trades with positive profit. Zero closed trades
/// means 0.0, not NaN; open trades are excluded entirely.
pub fn win_rate(trades: &[Trade]) -> f64 {
    let closed = trades.iter().filter(|t| t.is_closed()).count();
    if closed == 0 {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / closed as f64
}

/// Maximum drawdown as a non-positive fraction (-0.15 = 15% drawdown).
///
/// Minimum over all bars of (equity - running peak) / running peak.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let mut peak = equity[0];
    let mut max_dd = 0.0_f64;

    for &eq in equity {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio from daily returns.
///
/// Sharpe = mean(daily returns) / std(daily returns) * sqrt(252).
/// Returns 0.0 if variance is zero or fewer than 2 bars.
pub fn sharpe_ratio(equity: &[f64]) -> f64 {
    let returns = daily_returns(equity);
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(&returns);
    let std = std_dev(&returns);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * (252.0_f64).sqrt()
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Compute daily returns from an equity series.
pub fn daily_returns(equity: &[f64]) -> Vec<f64> {
    if equity.len() < 2 {
        return Vec::new();
    }
    equity
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

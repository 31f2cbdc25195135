//! The run pipeline: validate, extract, precompute, augment, simulate,
//! reduce.
//!
//! This is the single operation the engine exposes to its callers. It
//! performs no I/O itself; candles and the strategy document come in
//! by reference, the result document goes out owned.

use crate::metrics::Metrics;
use crate::result::BacktestResult;
use canopy_core::domain::{validate_candles, Candle};
use canopy_core::engine::{augment, precompute, simulate};
use canopy_core::error::{ConfigError, EngineError};
use canopy_core::strategy::{extract_indicators, uses_usd_inr, validate_strategy, Strategy};
use std::sync::atomic::AtomicBool;
use tracing::info;

/// Run a backtest to completion.
pub fn run(
    strategy: &Strategy,
    candles: &[Candle],
    initial_capital: f64,
) -> Result<BacktestResult, EngineError> {
    run_with_cancel(strategy, candles, initial_capital, None)
}

/// Run a backtest with a cooperative cancellation flag.
///
/// The flag is polled at bar boundaries; a cancelled run returns
/// `EngineError::Cancelled` and never a partial result.
pub fn run_with_cancel(
    strategy: &Strategy,
    candles: &[Candle],
    initial_capital: f64,
    cancel: Option<&AtomicBool>,
) -> Result<BacktestResult, EngineError> {
    validate_candles(candles)?;
    validate_strategy(strategy)?;
    if uses_usd_inr(strategy) && candles.iter().any(|c| c.usd_inr.is_none()) {
        return Err(ConfigError::MissingUsdInrSeries.into());
    }

    let refs = extract_indicators(strategy);
    info!(
        asset = strategy.asset.as_str(),
        bars = candles.len(),
        indicators = refs.len(),
        "starting run"
    );

    let columns = precompute(&refs, candles)?;
    let series = augment(candles, &columns)?;
    let out = simulate(strategy, &series, initial_capital, cancel)?;

    let metrics = Metrics::compute(&out.trades, &out.equity_curve, initial_capital);
    info!(
        trades = metrics.trades_count,
        total_return = metrics.total_return,
        "run complete"
    );

    Ok(BacktestResult {
        trades: out.trades,
        initial_equity: initial_capital,
        final_equity: out.final_equity,
        metrics,
        equity_curve: out.equity_curve,
        price_data: series,
    })
}

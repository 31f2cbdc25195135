//! The bar-by-bar position loop.
//!
//! Two states, FLAT and IN_POSITION, with a fixed per-bar check order
//! that is part of the contract: stop-loss, then take-profit, then the
//! exit tree, then (only if the bar started flat) the entry tree. A
//! bar that closes a position does not re-enter on the same bar.
//!
//! Entries and signal-driven exits fill at the bar's Close. Stop and
//! target fill at their own level, triggered intrabar by Low/High.
//! An equity point is appended at every bar regardless of transitions.

use crate::domain::{AugmentedCandle, EquityPoint, Trade};
use crate::error::EngineError;
use crate::eval::evaluate_group;
use crate::strategy::Strategy;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// What the simulation hands back: the trade list (last one possibly
/// still OPEN) and one equity point per bar.
#[derive(Debug, Clone, PartialEq)]
pub struct SimOutput {
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub final_equity: f64,
}

/// Levels fixed at entry for the open position.
#[derive(Debug, Clone, Copy)]
struct OpenPosition {
    entry_price: f64,
    quantity: f64,
    stop_price: f64,
    target_price: f64,
    /// Index of the trade record in the output list.
    trade: usize,
}

#[derive(Debug, Clone, Copy)]
enum PositionState {
    Flat,
    InPosition(OpenPosition),
}

/// Run the position loop over an augmented series.
///
/// `cancel` is polled once per bar; a set flag aborts the run with
/// `EngineError::Cancelled` and discards partial output.
pub fn simulate(
    strategy: &Strategy,
    series: &[AugmentedCandle],
    initial_capital: f64,
    cancel: Option<&AtomicBool>,
) -> Result<SimOutput, EngineError> {
    let mut trades: Vec<Trade> = Vec::new();
    let mut equity_curve: Vec<EquityPoint> = Vec::with_capacity(series.len());
    let mut state = PositionState::Flat;
    // Realized equity: initial capital plus closed-trade PnL.
    let mut realized = initial_capital;

    for (bar, augmented) in series.iter().enumerate() {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(EngineError::Cancelled { bar_index: bar });
            }
        }

        let candle = &augmented.candle;

        match state {
            PositionState::InPosition(position) => {
                let exit_price = if candle.low <= position.stop_price {
                    Some(position.stop_price)
                } else if candle.high >= position.target_price {
                    Some(position.target_price)
                } else if evaluate_group(series, &strategy.exit_logic, bar) {
                    Some(candle.close)
                } else {
                    None
                };

                if let Some(price) = exit_price {
                    let trade = &mut trades[position.trade];
                    trade.close(candle.date, price);
                    realized += trade.profit;
                    debug!(bar, price, profit = trade.profit, "position closed");
                    state = PositionState::Flat;
                }
            }
            PositionState::Flat => {
                // Sizing divides by the close. validate_candles rejects
                // non-positive prices upstream, but simulate accepts raw
                // series too, so a zero close suppresses the entry
                // instead of producing an infinite quantity.
                if evaluate_group(series, &strategy.entry_logic, bar) && candle.close > 0.0 {
                    let quantity = realized / candle.close;
                    trades.push(Trade::open(candle.date, candle.close, quantity));
                    state = PositionState::InPosition(OpenPosition {
                        entry_price: candle.close,
                        quantity,
                        stop_price: candle.close * (1.0 - strategy.stop_loss_pct / 100.0),
                        target_price: candle.close * (1.0 + strategy.take_profit_pct / 100.0),
                        trade: trades.len() - 1,
                    });
                    debug!(bar, price = candle.close, quantity, "position opened");
                }
            }
        }

        let unrealized = match state {
            PositionState::InPosition(position) => {
                position.quantity * (candle.close - position.entry_price)
            }
            PositionState::Flat => 0.0,
        };
        equity_curve.push(EquityPoint {
            date: candle.date,
            equity: realized + unrealized,
        });
    }

    // A still-open trade stays OPEN; carry its unrealized mark so the
    // output is self-describing.
    if let PositionState::InPosition(position) = state {
        if let Some(last) = series.last() {
            let trade = &mut trades[position.trade];
            trade.profit = position.quantity * (last.candle.close - position.entry_price);
            trade.profit_pct = if position.entry_price != 0.0 {
                (last.candle.close - position.entry_price) / position.entry_price * 100.0
            } else {
                0.0
            };
        }
    }

    let final_equity = equity_curve.last().map_or(initial_capital, |p| p.equity);

    Ok(SimOutput {
        trades,
        equity_curve,
        final_equity,
    })
}

//! Trade and equity-curve records produced by the simulation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a trade has been closed out or is still held at series end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

/// One round trip (or a still-open position at series end).
///
/// Created when an entry signal fires, mutated exactly once when the
/// position closes, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    /// Fractional share count (full-equity allocation at entry).
    pub quantity: f64,
    pub exit_date: Option<NaiveDate>,
    pub exit_price: Option<f64>,
    /// Realized currency PnL for closed trades, unrealized mark for open ones.
    pub profit: f64,
    /// Per-unit return in percent: (exit - entry) / entry * 100.
    pub profit_pct: f64,
    pub status: TradeStatus,
}

impl Trade {
    /// Open a new trade at the given bar's close.
    pub fn open(entry_date: NaiveDate, entry_price: f64, quantity: f64) -> Self {
        Self {
            entry_date,
            entry_price,
            quantity,
            exit_date: None,
            exit_price: None,
            profit: 0.0,
            profit_pct: 0.0,
            status: TradeStatus::Open,
        }
    }

    /// Close the trade, filling the exit fields and realizing PnL.
    pub fn close(&mut self, exit_date: NaiveDate, exit_price: f64) {
        self.exit_date = Some(exit_date);
        self.exit_price = Some(exit_price);
        self.profit = self.quantity * (exit_price - self.entry_price);
        self.profit_pct = if self.entry_price != 0.0 {
            (exit_price - self.entry_price) / self.entry_price * 100.0
        } else {
            0.0
        };
        self.status = TradeStatus::Closed;
    }

    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    pub fn is_winner(&self) -> bool {
        self.is_closed() && self.profit > 0.0
    }
}

/// Equity value at one bar's close. Append-only, one per bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn open_trade_has_no_exit() {
        let trade = Trade::open(date(2), 100.0, 50.0);
        assert_eq!(trade.status, TradeStatus::Open);
        assert!(trade.exit_date.is_none());
        assert!(trade.exit_price.is_none());
        assert_eq!(trade.profit, 0.0);
    }

    #[test]
    fn close_fills_exit_and_pnl() {
        let mut trade = Trade::open(date(2), 100.0, 50.0);
        trade.close(date(5), 110.0);
        assert_eq!(trade.status, TradeStatus::Closed);
        assert_eq!(trade.exit_price, Some(110.0));
        assert!((trade.profit - 500.0).abs() < 1e-10);
        assert!((trade.profit_pct - 10.0).abs() < 1e-10);
        assert!(trade.is_winner());
    }

    #[test]
    fn losing_trade_pct() {
        let mut trade = Trade::open(date(2), 100.0, 100.0);
        trade.close(date(4), 95.0);
        assert!((trade.profit_pct - (-5.0)).abs() < 1e-10);
        assert!(!trade.is_winner());
    }

    #[test]
    fn open_trade_is_never_a_winner() {
        let mut trade = Trade::open(date(2), 100.0, 50.0);
        trade.profit = 1_000.0; // unrealized mark
        assert!(!trade.is_winner());
    }

    #[test]
    fn trade_serialization_uses_camel_case() {
        let trade = Trade::open(date(2), 100.0, 50.0);
        let json = serde_json::to_string(&trade).unwrap();
        assert!(json.contains("entryDate"));
        assert!(json.contains("profitPct"));
        assert!(json.contains("\"status\":\"OPEN\""));
        let deser: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, deser);
    }
}

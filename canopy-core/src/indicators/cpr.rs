//! Central Pivot Range (CPR) — weekly pivot levels.
//!
//! Computed once per calendar (ISO) week from the PRIOR week's
//! aggregated high/low/close and held constant across the current
//! week's bars:
//! - pivot = (H + L + C) / 3
//! - bc    = (H + L) / 2
//! - tc    = 2 * pivot - bc
//!
//! Bars of the first week in the series have no prior week and stay
//! NaN (zeroed by the fill policy). The current week's still-forming
//! high/low/close are never used — that would be look-ahead.

use crate::domain::Candle;
use crate::indicators::Indicator;
use chrono::Datelike;

/// Which CPR level to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CprLevel {
    Pivot,
    Tc,
    Bc,
}

#[derive(Debug, Clone)]
pub struct Cpr {
    level: CprLevel,
}

impl Cpr {
    pub fn pivot() -> Self {
        Self {
            level: CprLevel::Pivot,
        }
    }

    pub fn tc() -> Self {
        Self { level: CprLevel::Tc }
    }

    pub fn bc() -> Self {
        Self { level: CprLevel::Bc }
    }
}

/// Running aggregate of one week's bars.
#[derive(Debug, Clone, Copy)]
struct WeekAgg {
    high: f64,
    low: f64,
    close: f64,
}

impl WeekAgg {
    fn from_candle(c: &Candle) -> Self {
        Self {
            high: c.high,
            low: c.low,
            close: c.close,
        }
    }

    fn absorb(&mut self, c: &Candle) {
        self.high = self.high.max(c.high);
        self.low = self.low.min(c.low);
        self.close = c.close; // last close of the week wins
    }

    fn level(&self, level: CprLevel) -> f64 {
        let pivot = (self.high + self.low + self.close) / 3.0;
        let bc = (self.high + self.low) / 2.0;
        match level {
            CprLevel::Pivot => pivot,
            CprLevel::Bc => bc,
            CprLevel::Tc => 2.0 * pivot - bc,
        }
    }
}

fn iso_week_key(candle: &Candle) -> (i32, u32) {
    let week = candle.date.iso_week();
    (week.year(), week.week())
}

impl Indicator for Cpr {
    fn name(&self) -> &str {
        match self.level {
            CprLevel::Pivot => "cpr_pivot",
            CprLevel::Tc => "cpr_tc",
            CprLevel::Bc => "cpr_bc",
        }
    }

    // One trading week of warm-up before the first prior-week levels exist.
    fn lookback(&self) -> usize {
        5
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let n = candles.len();
        let mut result = vec![f64::NAN; n];

        let mut prior_week: Option<WeekAgg> = None;
        let mut current_week: Option<((i32, u32), WeekAgg)> = None;

        for (i, candle) in candles.iter().enumerate() {
            let key = iso_week_key(candle);

            match &mut current_week {
                Some((current_key, agg)) if *current_key == key => {
                    // Same week: this bar only feeds NEXT week's levels.
                    agg.absorb(candle);
                }
                Some((_, agg)) => {
                    prior_week = Some(*agg);
                    current_week = Some((key, WeekAgg::from_candle(candle)));
                }
                None => {
                    current_week = Some((key, WeekAgg::from_candle(candle)));
                }
            }

            if let Some(prior) = prior_week {
                result[i] = prior.level(self.level);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use chrono::NaiveDate;

    /// Ten weekday bars spanning two ISO weeks (Mon 2024-01-01 .. Fri 2024-01-12).
    fn two_weeks() -> Vec<Candle> {
        let days = [1, 2, 3, 4, 5, 8, 9, 10, 11, 12];
        days.iter()
            .enumerate()
            .map(|(i, &day)| Candle {
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                open: 100.0,
                high: 100.0 + i as f64,
                low: 90.0 - i as f64,
                close: 95.0 + i as f64,
                volume: 1000.0,
                usd_inr: None,
            })
            .collect()
    }

    #[test]
    fn first_week_is_undefined() {
        let candles = two_weeks();
        let result = Cpr::pivot().compute(&candles);
        for v in result.iter().take(5) {
            assert!(v.is_nan());
        }
    }

    #[test]
    fn second_week_uses_first_week_aggregate() {
        let candles = two_weeks();
        // Week 1 aggregate: high = 104, low = 86, close = 99 (Friday).
        let pivot = (104.0 + 86.0 + 99.0) / 3.0;
        let bc = (104.0 + 86.0) / 2.0;
        let tc = 2.0 * pivot - bc;

        let p = Cpr::pivot().compute(&candles);
        let b = Cpr::bc().compute(&candles);
        let t = Cpr::tc().compute(&candles);

        for i in 5..10 {
            assert_approx(p[i], pivot, DEFAULT_EPSILON);
            assert_approx(b[i], bc, DEFAULT_EPSILON);
            assert_approx(t[i], tc, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn level_is_constant_within_a_week() {
        let candles = two_weeks();
        let result = Cpr::tc().compute(&candles);
        for i in 6..10 {
            assert_approx(result[i], result[5], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn tc_above_pivot_above_bc_when_close_above_midpoint() {
        let candles = two_weeks();
        // Week 1: close (99) above the high/low midpoint (95) → TC > P > BC.
        let p = Cpr::pivot().compute(&candles)[5];
        let b = Cpr::bc().compute(&candles)[5];
        let t = Cpr::tc().compute(&candles)[5];
        assert!(t > p);
        assert!(p > b);
    }
}

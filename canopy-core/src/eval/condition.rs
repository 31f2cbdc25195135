//! Leaf condition evaluation at a single bar.
//!
//! Both sides of a comparison resolve to an f64 at the bar under the
//! cursor: lookup kinds read the candle directly, computed kinds read
//! their precomputed column. Crossovers additionally need bar i-1 and
//! are false at the first bar.

use crate::domain::AugmentedCandle;
use crate::indicators::lookup_value;
use crate::strategy::{Comparator, Condition, IndicatorRef, Operand};

/// Absolute tolerance of the EQ comparator. The bound is exclusive:
/// a difference of exactly the tolerance does not compare equal.
pub const EQ_TOLERANCE: f64 = 0.01;

fn resolve(series: &[AugmentedCandle], r: &IndicatorRef, bar: usize) -> f64 {
    if r.kind.is_lookup() {
        lookup_value(series, r.kind, bar)
    } else {
        let column = r.key().column();
        series[bar]
            .indicator(&column)
            .expect("every computed reference has a precomputed column")
    }
}

fn operand_value(series: &[AugmentedCandle], operand: &Operand, bar: usize) -> f64 {
    match operand {
        Operand::Value(v) => *v,
        Operand::Indicator(r) => resolve(series, r, bar),
    }
}

/// Evaluate one condition at bar `bar`.
pub fn evaluate_condition(series: &[AugmentedCandle], cond: &Condition, bar: usize) -> bool {
    let left = resolve(series, &cond.left, bar);
    let right = operand_value(series, &cond.operand, bar);

    match cond.comparator {
        Comparator::Gt => left > right,
        Comparator::Lt => left < right,
        Comparator::Eq => (left - right).abs() < EQ_TOLERANCE,
        Comparator::CrossAbove => {
            if bar == 0 {
                return false;
            }
            let prev_left = resolve(series, &cond.left, bar - 1);
            let prev_right = operand_value(series, &cond.operand, bar - 1);
            prev_left <= prev_right && left > right
        }
        Comparator::CrossBelow => {
            if bar == 0 {
                return false;
            }
            let prev_left = resolve(series, &cond.left, bar - 1);
            let prev_right = operand_value(series, &cond.operand, bar - 1);
            prev_left >= prev_right && left < right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candle, NodeId};
    use crate::strategy::{IndicatorKind, IndicatorRef};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    /// Series with closes and one precomputed column "sma_2".
    fn series_with_sma(closes: &[f64], sma: &[f64]) -> Vec<AugmentedCandle> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        closes
            .iter()
            .zip(sma)
            .enumerate()
            .map(|(i, (&close, &sma))| AugmentedCandle {
                candle: Candle {
                    date: base_date + chrono::Duration::days(i as i64),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1000.0,
                    usd_inr: None,
                },
                indicators: BTreeMap::from([("sma_2".to_string(), sma)]),
            })
            .collect()
    }

    fn cond(left: IndicatorRef, comparator: Comparator, operand: Operand) -> Condition {
        Condition::new(NodeId::new("c1"), left, comparator, operand)
    }

    fn price() -> IndicatorRef {
        IndicatorRef::new(IndicatorKind::Price)
    }

    fn sma2() -> IndicatorRef {
        IndicatorRef::with_period(IndicatorKind::Sma, 2)
    }

    #[test]
    fn gt_and_lt_against_value() {
        let series = series_with_sma(&[100.0], &[0.0]);
        let gt = cond(price(), Comparator::Gt, Operand::Value(99.0));
        let lt = cond(price(), Comparator::Lt, Operand::Value(99.0));
        assert!(evaluate_condition(&series, &gt, 0));
        assert!(!evaluate_condition(&series, &lt, 0));
    }

    #[test]
    fn gt_is_strict() {
        let series = series_with_sma(&[100.0], &[0.0]);
        let gt = cond(price(), Comparator::Gt, Operand::Value(100.0));
        assert!(!evaluate_condition(&series, &gt, 0));
    }

    #[test]
    fn eq_uses_absolute_tolerance() {
        let series = series_with_sma(&[100.0], &[0.0]);
        let near = cond(price(), Comparator::Eq, Operand::Value(100.009));
        let far = cond(price(), Comparator::Eq, Operand::Value(100.02));
        assert!(evaluate_condition(&series, &near, 0));
        assert!(!evaluate_condition(&series, &far, 0));
    }

    #[test]
    fn eq_excludes_the_tolerance_boundary() {
        // close - value == EQ_TOLERANCE exactly (same f64 bit pattern),
        // which must fall outside the strict bound.
        let series = series_with_sma(&[EQ_TOLERANCE], &[0.0]);
        let at_boundary = cond(price(), Comparator::Eq, Operand::Value(0.0));
        assert!(!evaluate_condition(&series, &at_boundary, 0));
    }

    #[test]
    fn condition_reads_precomputed_column() {
        let series = series_with_sma(&[100.0], &[42.0]);
        let c = cond(sma2(), Comparator::Gt, Operand::Value(41.0));
        assert!(evaluate_condition(&series, &c, 0));
    }

    #[test]
    fn cross_above_fires_only_on_the_crossing_bar() {
        // close: 98 (below sma), 103 (above), 104 (still above)
        let series = series_with_sma(&[98.0, 103.0, 104.0], &[100.0, 100.0, 100.0]);
        let c = cond(price(), Comparator::CrossAbove, Operand::Indicator(sma2()));
        assert!(!evaluate_condition(&series, &c, 0));
        assert!(evaluate_condition(&series, &c, 1));
        assert!(!evaluate_condition(&series, &c, 2));
    }

    #[test]
    fn cross_below_mirrors_cross_above() {
        let series = series_with_sma(&[103.0, 98.0, 97.0], &[100.0, 100.0, 100.0]);
        let c = cond(price(), Comparator::CrossBelow, Operand::Indicator(sma2()));
        assert!(!evaluate_condition(&series, &c, 0));
        assert!(evaluate_condition(&series, &c, 1));
        assert!(!evaluate_condition(&series, &c, 2));
    }

    #[test]
    fn cross_from_exact_touch_counts() {
        // prev left == prev right, then left > right
        let series = series_with_sma(&[100.0, 103.0], &[100.0, 100.0]);
        let c = cond(price(), Comparator::CrossAbove, Operand::Indicator(sma2()));
        assert!(evaluate_condition(&series, &c, 1));
    }

    #[test]
    fn crossovers_are_false_at_the_first_bar() {
        let series = series_with_sma(&[200.0], &[100.0]);
        let above = cond(price(), Comparator::CrossAbove, Operand::Value(100.0));
        let below = cond(price(), Comparator::CrossBelow, Operand::Value(300.0));
        assert!(!evaluate_condition(&series, &above, 0));
        assert!(!evaluate_condition(&series, &below, 0));
    }
}

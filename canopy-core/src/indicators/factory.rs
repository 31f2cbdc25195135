//! Indicator factory — maps an extracted reference to its calculator.
//!
//! The returned calculator's `name()` always equals the reference's
//! `key().column()`, so precompute output lines up with the column
//! names the evaluator reads.

use crate::error::ConfigError;
use crate::indicators::{Atr, Bollinger, Cpr, Ema, Indicator, Macd, Rsi, Sma, Stochastic};
use crate::strategy::{IndicatorKind, IndicatorRef};

/// Build the calculator for one computed indicator reference.
///
/// Windowed kinds without a period fail here as well as in strategy
/// validation; lookup kinds are rejected outright since they never go
/// through the precompute stage.
pub fn build_indicator(r: &IndicatorRef) -> Result<Box<dyn Indicator>, ConfigError> {
    let period = || {
        r.period.ok_or(ConfigError::MissingPeriod {
            kind: r.kind,
            node_id: None,
        })
    };

    let indicator: Box<dyn Indicator> = match r.kind {
        IndicatorKind::Sma => Box::new(Sma::new(period()?)),
        IndicatorKind::Ema => Box::new(Ema::new(period()?)),
        IndicatorKind::Rsi => Box::new(Rsi::new(period()?)),
        IndicatorKind::Macd => Box::new(Macd::line(period()?)),
        IndicatorKind::MacdSignal => Box::new(Macd::signal(period()?)),
        IndicatorKind::MacdHist => Box::new(Macd::histogram(period()?)),
        IndicatorKind::StochK => Box::new(Stochastic::percent_k(period()?)),
        IndicatorKind::StochD => Box::new(Stochastic::percent_d(period()?)),
        IndicatorKind::Atr => Box::new(Atr::new(period()?)),
        IndicatorKind::BbUpper => Box::new(Bollinger::upper(period()?)),
        IndicatorKind::BbMiddle => Box::new(Bollinger::middle(period()?)),
        IndicatorKind::BbLower => Box::new(Bollinger::lower(period()?)),
        IndicatorKind::CprPivot => Box::new(Cpr::pivot()),
        IndicatorKind::CprTc => Box::new(Cpr::tc()),
        IndicatorKind::CprBc => Box::new(Cpr::bc()),
        kind => return Err(ConfigError::NotComputed { kind }),
    };

    Ok(indicator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use IndicatorKind::*;

    #[test]
    fn name_matches_column_for_every_computed_kind() {
        let refs = [
            IndicatorRef::with_period(Sma, 20),
            IndicatorRef::with_period(Ema, 50),
            IndicatorRef::with_period(Rsi, 14),
            IndicatorRef::with_period(Macd, 12),
            IndicatorRef::with_period(MacdSignal, 12),
            IndicatorRef::with_period(MacdHist, 12),
            IndicatorRef::with_period(StochK, 14),
            IndicatorRef::with_period(StochD, 14),
            IndicatorRef::with_period(Atr, 14),
            IndicatorRef::with_period(BbUpper, 20),
            IndicatorRef::with_period(BbMiddle, 20),
            IndicatorRef::with_period(BbLower, 20),
            IndicatorRef::new(CprPivot),
            IndicatorRef::new(CprTc),
            IndicatorRef::new(CprBc),
        ];
        for r in refs {
            let indicator = build_indicator(&r).unwrap();
            assert_eq!(indicator.name(), r.key().column());
        }
    }

    #[test]
    fn built_indicators_are_debuggable() {
        // `Result<Box<dyn Indicator>, _>` must format for unwrap_err
        // and error reporting, so `Debug` is part of the trait contract.
        let indicator = build_indicator(&IndicatorRef::with_period(Sma, 20)).unwrap();
        assert!(!format!("{indicator:?}").is_empty());
    }

    #[test]
    fn missing_period_is_rejected() {
        let err = build_indicator(&IndicatorRef::new(Sma)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPeriod { kind: Sma, .. }));
    }

    #[test]
    fn lookup_kinds_are_rejected() {
        let err = build_indicator(&IndicatorRef::new(Price)).unwrap_err();
        assert!(matches!(err, ConfigError::NotComputed { kind: Price }));
    }
}

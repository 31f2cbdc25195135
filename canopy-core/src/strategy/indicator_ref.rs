//! Indicator references — what a condition's operand points at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every indicator kind a condition may reference.
///
/// Two families:
/// - *lookup* kinds are direct per-bar reads of candle fields and are
///   never precomputed (PRICE..VOLUME, PREV_HIGH/PREV_LOW, USDINR);
/// - *computed* kinds are precomputed as full series before the bar
///   loop. The windowed ones require a `period`; the weekly CPR levels
///   take none but still need series context, so they are computed,
///   not looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorKind {
    Price,
    Open,
    High,
    Low,
    Volume,
    PrevHigh,
    PrevLow,
    Usdinr,
    CprPivot,
    CprTc,
    CprBc,
    Sma,
    Ema,
    Rsi,
    Macd,
    MacdSignal,
    MacdHist,
    StochK,
    StochD,
    Atr,
    BbUpper,
    BbMiddle,
    BbLower,
}

impl IndicatorKind {
    /// True for direct per-bar candle field reads.
    pub fn is_lookup(self) -> bool {
        matches!(
            self,
            Self::Price
                | Self::Open
                | Self::High
                | Self::Low
                | Self::Volume
                | Self::PrevHigh
                | Self::PrevLow
                | Self::Usdinr
        )
    }

    /// True for kinds that go through the precompute stage.
    pub fn is_computed(self) -> bool {
        !self.is_lookup()
    }

    /// True for windowed kinds that require a `period` on the wire.
    pub fn requires_period(self) -> bool {
        matches!(
            self,
            Self::Sma
                | Self::Ema
                | Self::Rsi
                | Self::Macd
                | Self::MacdSignal
                | Self::MacdHist
                | Self::StochK
                | Self::StochD
                | Self::Atr
                | Self::BbUpper
                | Self::BbMiddle
                | Self::BbLower
        )
    }

    /// Lowercase base of the column name ("sma", "cpr_pivot", ...).
    pub fn base_name(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Volume => "volume",
            Self::PrevHigh => "prev_high",
            Self::PrevLow => "prev_low",
            Self::Usdinr => "usd_inr",
            Self::CprPivot => "cpr_pivot",
            Self::CprTc => "cpr_tc",
            Self::CprBc => "cpr_bc",
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::MacdSignal => "macd_signal",
            Self::MacdHist => "macd_hist",
            Self::StochK => "stoch_k",
            Self::StochD => "stoch_d",
            Self::Atr => "atr",
            Self::BbUpper => "bb_upper",
            Self::BbMiddle => "bb_middle",
            Self::BbLower => "bb_lower",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_name())
    }
}

/// A reference to one indicator as it appears in a strategy document.
///
/// `period` is meaningful only for windowed kinds; for everything else
/// it is ignored (and normalized to 0 in the dedup key).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRef {
    pub kind: IndicatorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<usize>,
}

impl IndicatorRef {
    pub fn new(kind: IndicatorKind) -> Self {
        Self { kind, period: None }
    }

    pub fn with_period(kind: IndicatorKind, period: usize) -> Self {
        Self {
            kind,
            period: Some(period),
        }
    }

    /// Identity for dedup and column naming: `(kind, period-or-0)`.
    pub fn key(&self) -> IndicatorKey {
        IndicatorKey {
            kind: self.kind,
            period: if self.kind.requires_period() {
                self.period.unwrap_or(0)
            } else {
                0
            },
        }
    }
}

/// Dedup/column identity of an indicator reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndicatorKey {
    pub kind: IndicatorKind,
    pub period: usize,
}

impl IndicatorKey {
    /// Column name used in the augmented series ("sma_20", "cpr_pivot").
    pub fn column(&self) -> String {
        if self.kind.requires_period() {
            format!("{}_{}", self.kind.base_name(), self.period)
        } else {
            self.kind.base_name().to_string()
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

//! Core domain types: candles, trades, equity points, node ids.

pub mod candle;
pub mod ids;
pub mod trade;

pub use candle::{validate_candles, AugmentedCandle, Candle};
pub use ids::{IdGen, NodeId};
pub use trade::{EquityPoint, Trade, TradeStatus};

//! The backtest pipeline: precompute, augment, simulate.

pub mod augment;
pub mod columns;
pub mod precompute;
pub mod sim;

pub use augment::augment;
pub use columns::IndicatorColumns;
pub use precompute::precompute;
pub use sim::{simulate, SimOutput};

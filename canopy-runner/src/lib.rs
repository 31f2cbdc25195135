//! Canopy Runner — backtest orchestration around `canopy-core`.
//!
//! - `run`/`run_with_cancel`: the full pipeline, strategy + candles in,
//!   result document out
//! - `metrics`: pure performance reductions
//! - `data_loader`/`config`: file-based inputs for the CLI
//! - `fingerprint`: content-addressable run identity

pub mod config;
pub mod data_loader;
pub mod fingerprint;
pub mod metrics;
pub mod result;
pub mod runner;

pub use config::RunSpec;
pub use data_loader::{load_candles, load_strategy, LoadError};
pub use fingerprint::RunFingerprint;
pub use metrics::Metrics;
pub use result::BacktestResult;
pub use runner::{run, run_with_cancel};

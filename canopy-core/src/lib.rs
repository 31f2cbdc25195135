//! Canopy Core — strategy trees, indicators, evaluation, simulation.
//!
//! This crate contains the heart of the backtest engine:
//! - Domain types (candles, trades, equity points, node ids)
//! - Strategy tree model with its wire format and validation
//! - Indicator calculators behind the `Indicator` trait
//! - Condition and group-tree evaluation at a single bar
//! - Precompute/augment/simulate pipeline with cooperative cancellation
//!
//! The pipeline is strictly causal: every indicator value at bar t
//! depends only on bars up to t, and the bar loop never reads ahead.

pub mod domain;
pub mod engine;
pub mod error;
pub mod eval;
pub mod indicators;
pub mod strategy;

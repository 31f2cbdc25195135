//! File loading for strategy documents and candle data.
//!
//! The runner itself performs no I/O; these helpers exist for the CLI
//! and for callers that keep their inputs on disk. Strategy documents
//! are JSON (the editor's wire format); candles are CSV with a header
//! row of `date,open,high,low,close,volume` and an optional `usd_inr`
//! column.

use canopy_core::domain::Candle;
use canopy_core::strategy::Strategy;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid strategy document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid candle data: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid run spec: {0}")]
    Toml(#[from] toml::de::Error),
}

pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load a strategy document from a JSON file.
pub fn load_strategy(path: &Path) -> Result<Strategy, LoadError> {
    let text = read_file(path)?;
    let strategy: Strategy = serde_json::from_str(&text)?;
    debug!(path = %path.display(), asset = strategy.asset.as_str(), "loaded strategy");
    Ok(strategy)
}

/// Load a candle series from a CSV file.
pub fn load_candles(path: &Path) -> Result<Vec<Candle>, LoadError> {
    let text = read_file(path)?;
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let candles = reader
        .deserialize::<Candle>()
        .collect::<Result<Vec<_>, _>>()?;
    debug!(path = %path.display(), bars = candles.len(), "loaded candles");
    Ok(candles)
}

//! Content-addressable run fingerprints.
//!
//! Two runs with the same strategy document, candle series, and
//! initial capital share a fingerprint, so callers can cache or
//! deduplicate results. The hash covers the canonical JSON of the
//! inputs, which is deterministic by construction.

use canopy_core::domain::Candle;
use canopy_core::strategy::Strategy;
use serde::{Deserialize, Serialize};

/// blake3 hash of a run's complete input, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunFingerprint(String);

impl RunFingerprint {
    pub fn compute(strategy: &Strategy, candles: &[Candle], initial_capital: f64) -> Self {
        let mut hasher = blake3::Hasher::new();
        let strategy_json =
            serde_json::to_vec(strategy).expect("strategy serialization is infallible");
        hasher.update(&strategy_json);
        let candles_json =
            serde_json::to_vec(candles).expect("candle serialization is infallible");
        hasher.update(&candles_json);
        hasher.update(&initial_capital.to_le_bytes());
        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// First 12 hex chars, for log lines and filenames.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl std::fmt::Display for RunFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

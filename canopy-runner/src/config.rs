//! Serializable run specification for file-driven invocations.

use crate::data_loader::{read_file, LoadError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_capital() -> f64 {
    100_000.0
}

/// A complete run described in one TOML file: where the inputs live,
/// how much capital to start with, where to write the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    /// Path to the strategy JSON document.
    pub strategy: PathBuf,

    /// Path to the candle CSV file.
    pub data: PathBuf,

    #[serde(default = "default_capital")]
    pub initial_capital: f64,

    /// Where to write the result JSON; stdout when omitted.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl RunSpec {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = read_file(path)?;
        Ok(toml::from_str(&text)?)
    }
}

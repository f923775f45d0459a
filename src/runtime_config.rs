// =============================================================================
// Screener Configuration — serde-defaulted JSON settings
// =============================================================================
//
// Every field carries a serde default so adding new fields never breaks
// loading an older config file, and an entirely missing file falls back to
// defaults with a warning at startup.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::filters::ScreenerFilter;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_universe_file() -> String {
    "universe.json".to_string()
}

fn default_range() -> String {
    "1y".to_string()
}

fn default_interval() -> String {
    "1d".to_string()
}

fn default_min_volume() -> f64 {
    1_000_000.0
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_filter() -> ScreenerFilter {
    ScreenerFilter {
        min_volume: default_min_volume(),
        ..Default::default()
    }
}

// =============================================================================
// ScreenerConfig
// =============================================================================

/// Top-level configuration for a screener run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Path to the universe constituents JSON file.
    #[serde(default = "default_universe_file")]
    pub universe_file: String,

    /// Explicit symbol override; empty means "use the universe file".
    #[serde(default)]
    pub symbols: Vec<String>,

    /// Lookback expression passed to the history provider.
    #[serde(default = "default_range")]
    pub range: String,

    /// Bar interval; the indicator battery assumes daily bars.
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Where to write the filtered table; stdout when absent.
    #[serde(default)]
    pub output_file: Option<String>,

    /// Volume floor plus optional categorical constraints.
    #[serde(default = "default_filter")]
    pub filter: ScreenerFilter,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            universe_file: default_universe_file(),
            symbols: Vec::new(),
            range: default_range(),
            interval: default_interval(),
            request_timeout_secs: default_request_timeout_secs(),
            output_file: None,
            filter: default_filter(),
        }
    }
}

impl ScreenerConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// Returns an error when the file is missing or malformed so the caller
    /// can fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read screener config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse screener config from {}", path.display()))?;

        info!(
            path = %path.display(),
            range = %config.range,
            min_volume = config.filter.min_volume,
            "screener config loaded"
        );

        Ok(config)
    }
}

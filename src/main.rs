// =============================================================================
// Atlas Screener — Main Entry Point
// =============================================================================
//
// One run = load universe, fetch one year of daily bars per symbol, reduce
// each history to an indicator snapshot, join metadata, filter, emit JSON.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod filters;
mod indicators;
mod market_data;
mod pipeline;
mod providers;
mod runtime_config;
mod series;
mod snapshot;
mod types;
mod universe;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::providers::YahooClient;
use crate::runtime_config::ScreenerConfig;
use crate::universe::Universe;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var("SCREENER_CONFIG").unwrap_or_else(|_| "screener_config.json".to_string());
    let mut config = ScreenerConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        ScreenerConfig::default()
    });

    // Override symbols from env if available.
    if let Ok(syms) = std::env::var("SCREENER_SYMBOLS") {
        config.symbols = syms
            .split(',')
            .map(universe::normalize_symbol)
            .filter(|s| !s.is_empty())
            .collect();
    }

    // ── 2. Universe ──────────────────────────────────────────────────────
    let universe = if config.symbols.is_empty() {
        Universe::load(&config.universe_file)?
    } else {
        info!(count = config.symbols.len(), "using explicit symbol override");
        Universe::from_symbols(config.symbols.clone())
    };

    if universe.is_empty() {
        anyhow::bail!("universe is empty — nothing to screen");
    }

    info!(
        symbols = universe.len(),
        range = %config.range,
        min_volume = config.filter.min_volume,
        "screener starting"
    );

    // ── 3. Batch pipeline ────────────────────────────────────────────────
    let provider = YahooClient::new(config.interval.clone(), config.request_timeout_secs)?;
    let snapshots = pipeline::run_batch(&provider, universe.symbols(), &config.range).await?;

    // ── 4. Join + filter ─────────────────────────────────────────────────
    let rows = filters::join_metadata(snapshots, universe.meta());
    let joined = rows.len();
    let table = filters::apply(rows, &config.filter);

    info!(
        joined,
        matched = table.len(),
        "filters applied"
    );

    // ── 5. Output ────────────────────────────────────────────────────────
    let json = serde_json::to_string_pretty(&table).context("failed to serialise result table")?;

    match &config.output_file {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write result table to {path}"))?;
            info!(path = %path, rows = table.len(), "result table written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

// =============================================================================
// Batch Pipeline — per-symbol fetch + reduce over the whole universe
// =============================================================================
//
// The pipeline is the only component aware of the full symbol universe; the
// calculators and the reducer stay symbol-agnostic. Per-symbol failures are
// absorbed here: a failed fetch or an empty history shrinks the output table
// and is never an aggregate error. The single exception is a systemic
// provider failure — every symbol errored — which is surfaced upward once.
// =============================================================================

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::market_data::PriceHistory;
use crate::snapshot::{build_snapshot, Snapshot};

/// Capability seam for per-symbol history retrieval.
///
/// `range` is the provider's lookback expression (e.g. "1y" of daily bars).
/// One call is made per symbol; implementations may be remote (Yahoo) or
/// in-memory (tests).
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn fetch(&self, symbol: &str, range: &str) -> Result<PriceHistory>;
}

/// Run the snapshot reducer over every symbol in `symbols`, preserving input
/// order in the output table.
///
/// Skip rules:
/// - fetch error => warn + skip that symbol only
/// - empty history => debug + skip (normal outcome, not an error)
///
/// Returns an error only when the universe is non-empty and *every* fetch
/// failed, which indicates a systemic provider outage rather than bad symbols.
pub async fn run_batch(
    provider: &dyn HistoryProvider,
    symbols: &[String],
    range: &str,
) -> Result<Vec<Snapshot>> {
    let mut table = Vec::with_capacity(symbols.len());
    let mut fetch_errors = 0usize;

    for symbol in symbols {
        let history = match provider.fetch(symbol, range).await {
            Ok(history) => history,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "history fetch failed — skipping symbol");
                fetch_errors += 1;
                continue;
            }
        };

        match build_snapshot(symbol, &history) {
            Some(snapshot) => table.push(snapshot),
            None => debug!(symbol = %symbol, "empty history — skipping symbol"),
        }
    }

    if !symbols.is_empty() && fetch_errors == symbols.len() {
        bail!(
            "history provider failed for all {} symbols — aborting batch",
            symbols.len()
        );
    }

    info!(
        universe = symbols.len(),
        snapshots = table.len(),
        skipped = symbols.len() - table.len(),
        "batch pipeline complete"
    );
    Ok(table)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::PriceBar;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    /// In-memory provider: symbols map to canned histories; unknown symbols
    /// error like a failed remote call.
    struct MockProvider {
        histories: HashMap<String, PriceHistory>,
    }

    #[async_trait]
    impl HistoryProvider for MockProvider {
        async fn fetch(&self, symbol: &str, _range: &str) -> Result<PriceHistory> {
            self.histories
                .get(symbol)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no data for {symbol}"))
        }
    }

    fn history(closes: &[f64]) -> PriceHistory {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceHistory::new(
            closes
                .iter()
                .enumerate()
                .map(|(i, &c)| PriceBar {
                    date: start + chrono::Days::new(i as u64),
                    open: c,
                    high: c + 1.0,
                    low: c - 1.0,
                    close: c,
                    volume: 1_500_000.0,
                })
                .collect(),
        )
    }

    fn symbols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn preserves_universe_order() {
        let provider = MockProvider {
            histories: HashMap::from([
                ("C".to_string(), history(&[1.0, 2.0])),
                ("A".to_string(), history(&[1.0, 2.0])),
                ("B".to_string(), history(&[1.0, 2.0])),
            ]),
        };
        let table = run_batch(&provider, &symbols(&["C", "A", "B"]), "1y")
            .await
            .unwrap();
        let tickers: Vec<&str> = table.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn empty_histories_shrink_the_table() {
        let provider = MockProvider {
            histories: HashMap::from([
                ("FULL".to_string(), history(&[1.0, 2.0, 3.0])),
                ("EMPTY".to_string(), PriceHistory::default()),
            ]),
        };
        let universe = symbols(&["FULL", "EMPTY"]);
        let table = run_batch(&provider, &universe, "1y").await.unwrap();
        assert_eq!(table.len(), universe.len() - 1);
        assert_eq!(table[0].ticker, "FULL");
    }

    #[tokio::test]
    async fn fetch_errors_skip_only_that_symbol() {
        let provider = MockProvider {
            histories: HashMap::from([("OK".to_string(), history(&[1.0, 2.0]))]),
        };
        let table = run_batch(&provider, &symbols(&["MISSING", "OK"]), "1y")
            .await
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].ticker, "OK");
    }

    #[tokio::test]
    async fn all_symbols_failing_is_systemic() {
        let provider = MockProvider {
            histories: HashMap::new(),
        };
        let result = run_batch(&provider, &symbols(&["X", "Y"]), "1y").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn empty_universe_is_an_empty_table() {
        let provider = MockProvider {
            histories: HashMap::new(),
        };
        let table = run_batch(&provider, &[], "1y").await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn rerun_is_byte_identical() {
        let mut histories = HashMap::new();
        for (i, sym) in ["AAA", "BBB", "CCC"].iter().enumerate() {
            let closes: Vec<f64> = (1..=80).map(|j| (i + 1) as f64 * 10.0 + j as f64).collect();
            histories.insert(sym.to_string(), history(&closes));
        }
        let provider = MockProvider { histories };
        let universe = symbols(&["AAA", "BBB", "CCC"]);

        let first = run_batch(&provider, &universe, "1y").await.unwrap();
        let second = run_batch(&provider, &universe, "1y").await.unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

// =============================================================================
// Price history — daily OHLCV bars for a single symbol
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily trading session for one symbol. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Share volume; integer-valued but carried as f64 like the other columns.
    pub volume: f64,
}

/// An ordered sequence of [`PriceBar`] for a single symbol, ascending by date.
///
/// Calendar gaps are not filled — every rolling window downstream operates on
/// the sequence index, not on calendar days. The constructor sorts and
/// de-duplicates by date so that invariant holds regardless of provider order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    bars: Vec<PriceBar>,
}

impl PriceHistory {
    /// Build a history from provider bars, enforcing ascending unique dates.
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self { bars }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    // --- Column views --------------------------------------------------------

    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }
}

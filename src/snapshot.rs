// =============================================================================
// Snapshot Reducer — one symbol's history collapsed to a flat record
// =============================================================================
//
// Every snapshot carries the same key set regardless of symbol so the batch
// output assembles into a uniform table. Fields whose window requirements are
// not met are `None` (serialised as null), never zero-filled.
//
// Serde names are the table's column names and form the wire contract for
// the downstream filter/join stage.
// =============================================================================

use serde::Serialize;

use crate::indicators::{awesome, cahold, ema, ichimoku, macd, returns, rsi, vwap};
use crate::market_data::PriceHistory;
use crate::types::{AoMovement, Bias, CloudStatus};

/// Last-available value of every indicator for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Returns")]
    pub returns: Option<f64>,
    #[serde(rename = "Previous_Close")]
    pub previous_close: f64,
    #[serde(rename = "Volume")]
    pub volume: f64,
    #[serde(rename = "Cloud_Status")]
    pub cloud_status: CloudStatus,
    #[serde(rename = "Awesome_Oscillator")]
    pub awesome_oscillator: Option<f64>,
    #[serde(rename = "AO_Interpretation")]
    pub ao_interpretation: Option<Bias>,
    #[serde(rename = "AO_Movement")]
    pub ao_movement: Option<AoMovement>,
    #[serde(rename = "VWAP")]
    pub vwap: f64,
    #[serde(rename = "RSI_Smoothed")]
    pub rsi_smoothed: Option<f64>,
    #[serde(rename = "RSI_Trad")]
    pub rsi_trad: Option<f64>,
    #[serde(rename = "Cahold_Status")]
    pub cahold_status: Option<Bias>,
    #[serde(rename = "EMA_21")]
    pub ema_21: f64,
    #[serde(rename = "EMA_36")]
    pub ema_36: f64,
    #[serde(rename = "EMA_50")]
    pub ema_50: f64,
    #[serde(rename = "EMA_95")]
    pub ema_95: f64,
    #[serde(rename = "EMA_200")]
    pub ema_200: f64,
    #[serde(rename = "MACD")]
    pub macd: f64,
    #[serde(rename = "Signal_Line")]
    pub signal_line: f64,
}

/// Reduce one symbol's history to its snapshot record.
///
/// Returns `None` for an empty history — a normal skip outcome, not an error.
/// A single-bar history still produces a snapshot: `Returns` and
/// `Cahold_Status` are absent and window-starved indicators are `None`, but
/// the EMA/MACD recursions (seeded on the first close) and VWAP are defined.
pub fn build_snapshot(ticker: &str, history: &PriceHistory) -> Option<Snapshot> {
    let last_bar = history.last()?;
    let closes = history.closes();

    let ao_series = awesome::awesome_oscillator(history);
    let ao_value = ao_series.last().copied().flatten();
    let ao_movement = match &ao_series[..] {
        [.., Some(previous), Some(current)] => {
            Some(awesome::interpret_ao_movement(*current, *previous))
        }
        _ => None,
    };

    let [ema_21, ema_36, ema_50, ema_95, ema_200] =
        ema::latest_emas(&closes).map(|v| v.unwrap_or(f64::NAN));
    let (macd_value, signal_value) = macd::latest_macd(&closes);

    Some(Snapshot {
        ticker: ticker.to_string(),
        returns: returns::latest_return(&closes),
        previous_close: last_bar.close,
        volume: last_bar.volume,
        cloud_status: ichimoku::cloud_status(history),
        awesome_oscillator: ao_value,
        ao_interpretation: ao_value.map(awesome::interpret_ao),
        ao_movement,
        vwap: vwap::vwap(history).unwrap_or(f64::NAN),
        rsi_smoothed: rsi::rsi_smoothed(&closes, rsi::RSI_PERIOD)
            .last()
            .copied()
            .flatten(),
        rsi_trad: rsi::rsi_traditional(&closes, rsi::RSI_PERIOD)
            .last()
            .copied()
            .flatten(),
        cahold_status: cahold::latest_cahold(&closes),
        ema_21,
        ema_36,
        ema_50,
        ema_95,
        ema_200,
        macd: macd_value.unwrap_or(f64::NAN),
        signal_line: signal_value.unwrap_or(f64::NAN),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::PriceBar;
    use chrono::NaiveDate;

    fn history(closes: &[f64]) -> PriceHistory {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar {
                date: start + chrono::Days::new(i as u64),
                open: c,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
                volume: 2_000_000.0,
            })
            .collect();
        PriceHistory::new(bars)
    }

    #[test]
    fn empty_history_yields_no_snapshot() {
        assert!(build_snapshot("AAPL", &PriceHistory::default()).is_none());
    }

    #[test]
    fn single_bar_omits_returns_and_cahold() {
        let snap = build_snapshot("AAPL", &history(&[100.0])).unwrap();
        assert!(snap.returns.is_none());
        assert!(snap.cahold_status.is_none());
        // Window-starved oscillator fields are undefined too.
        assert!(snap.awesome_oscillator.is_none());
        assert!(snap.ao_interpretation.is_none());
        assert!(snap.ao_movement.is_none());
        assert!(snap.rsi_smoothed.is_none());
        // Recursive indicators seed on the first close and are defined.
        assert_eq!(snap.ema_21, 100.0);
        assert_eq!(snap.ema_200, 100.0);
        assert_eq!(snap.macd, 0.0);
        assert_eq!(snap.vwap, 100.0);
    }

    #[test]
    fn previous_close_and_volume_track_last_bar() {
        let snap = build_snapshot("MSFT", &history(&[10.0, 11.0, 12.5])).unwrap();
        assert_eq!(snap.previous_close, 12.5);
        assert_eq!(snap.volume, 2_000_000.0);
        assert!(snap.volume >= 0.0);
    }

    #[test]
    fn rising_history_is_fully_bullish() {
        let closes: Vec<f64> = (1..=120).map(|i| 100.0 + i as f64).collect();
        let snap = build_snapshot("NVDA", &history(&closes)).unwrap();
        assert_eq!(snap.cloud_status, CloudStatus::AboveCloud);
        assert_eq!(snap.ao_interpretation, Some(Bias::Bullish));
        assert_eq!(snap.cahold_status, Some(Bias::Bullish));
        assert_eq!(snap.rsi_smoothed, Some(100.0));
        assert_eq!(snap.rsi_trad, Some(100.0));
        assert!(snap.returns.unwrap() > 0.0);
        assert!(snap.macd > snap.signal_line);
    }

    #[test]
    fn ao_movement_reflects_last_two_series_entries() {
        // Rising midpoints keep AO positive and growing on a convex series.
        let closes: Vec<f64> = (1..=60).map(|i| (i * i) as f64).collect();
        let snap = build_snapshot("AMD", &history(&closes)).unwrap();
        assert_eq!(snap.ao_movement, Some(AoMovement::BullishIncreasing));
    }

    #[test]
    fn two_bars_have_returns_but_no_oscillator() {
        let snap = build_snapshot("KO", &history(&[50.0, 49.0])).unwrap();
        assert_eq!(snap.cahold_status, Some(Bias::Bearish));
        assert!((snap.returns.unwrap() + 0.02).abs() < 1e-12);
        assert!(snap.awesome_oscillator.is_none());
        assert!(snap.ao_movement.is_none());
    }

    #[test]
    fn serialized_key_set_is_stable() {
        let snap = build_snapshot("AAPL", &history(&[100.0])).unwrap();
        let json = serde_json::to_value(&snap).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "Ticker",
            "Returns",
            "Previous_Close",
            "Volume",
            "Cloud_Status",
            "Awesome_Oscillator",
            "AO_Interpretation",
            "AO_Movement",
            "VWAP",
            "RSI_Smoothed",
            "RSI_Trad",
            "Cahold_Status",
            "EMA_21",
            "EMA_36",
            "EMA_50",
            "EMA_95",
            "EMA_200",
            "MACD",
            "Signal_Line",
        ] {
            assert!(obj.contains_key(key), "missing column {key}");
        }
        assert_eq!(obj.len(), 19);
        // Absent values serialise as null, not as a fabricated zero.
        assert!(obj["Returns"].is_null());
        assert!(obj["Cahold_Status"].is_null());
    }
}

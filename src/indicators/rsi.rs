// =============================================================================
// Relative Strength Index — two rolling-mean variants
// =============================================================================
//
// Both variants use a plain rolling mean of gains and losses, NOT Wilder's
// recursive smoothing. They differ only in how the undefined first delta is
// treated:
//
//   smoothed:    delta[0] stays undefined, so the first full averaging window
//                is undefined too (defined from index `period + 1`).
//   traditional: delta[0] is zero-filled before averaging (defined from index
//                `period`).
//
// RS = avg_gain / avg_loss and RSI = 100 - 100 / (1 + RS) are computed with
// untrapped float division: avg_loss == 0 makes RS infinite and RSI saturate
// to exactly 100; a dead-flat window gives 0/0 and an RSI of NaN. Both
// outcomes are part of the contract and must not be special-cased.
// =============================================================================

use crate::series::{diff, simple_moving_average, zip_with, DerivedSeries};

/// Default look-back used by the snapshot reducer.
pub const RSI_PERIOD: usize = 14;

fn rsi_from_deltas(deltas: &[Option<f64>], period: usize) -> DerivedSeries {
    let gains: DerivedSeries = deltas.iter().map(|d| d.map(|d| d.max(0.0))).collect();
    let losses: DerivedSeries = deltas.iter().map(|d| d.map(|d| (-d).max(0.0))).collect();

    let rs = zip_with(
        &simple_moving_average(&gains, period),
        &simple_moving_average(&losses, period),
        |gain, loss| gain / loss,
    );

    rs.iter()
        .map(|rs| rs.map(|rs| 100.0 - 100.0 / (1.0 + rs)))
        .collect()
}

/// Smoothed-variant RSI series: the undefined first delta propagates through
/// the first averaging window.
pub fn rsi_smoothed(closes: &[f64], period: usize) -> DerivedSeries {
    rsi_from_deltas(&diff(closes), period)
}

/// Traditional-variant RSI series: the first delta is zero-filled before the
/// rolling mean, one index earlier than the smoothed variant.
pub fn rsi_traditional(closes: &[f64], period: usize) -> DerivedSeries {
    let mut deltas = diff(closes);
    if let Some(first) = deltas.first_mut() {
        *first = Some(0.0);
    }
    rsi_from_deltas(&deltas, period)
}

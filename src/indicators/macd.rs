// =============================================================================
// MACD — Moving Average Convergence/Divergence
// =============================================================================
//
// macd_line   = EMA12(Close) - EMA26(Close)
// signal_line = EMA9(macd_line)
//
// Both EMAs seed on the first close, so both lines are defined from index 0
// for any non-empty input.
// =============================================================================

use crate::series::{exponential_moving_average, from_values, zip_with, DerivedSeries};

const FAST_PERIOD: usize = 12;
const SLOW_PERIOD: usize = 26;
const SIGNAL_PERIOD: usize = 9;

/// Full MACD and signal line series aligned with `closes`.
pub fn macd(closes: &[f64]) -> (DerivedSeries, DerivedSeries) {
    let series = from_values(closes);

    let macd_line = zip_with(
        &exponential_moving_average(&series, FAST_PERIOD),
        &exponential_moving_average(&series, SLOW_PERIOD),
        |fast, slow| fast - slow,
    );
    let signal_line = exponential_moving_average(&macd_line, SIGNAL_PERIOD);

    (macd_line, signal_line)
}

/// Last MACD and signal values; `None` only for an empty input.
pub fn latest_macd(closes: &[f64]) -> (Option<f64>, Option<f64>) {
    let (macd_line, signal_line) = macd(closes);
    (
        macd_line.last().copied().flatten(),
        signal_line.last().copied().flatten(),
    )
}

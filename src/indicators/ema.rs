// =============================================================================
// EMA set — the screener's five fixed exponential moving averages
// =============================================================================

use crate::series::{exponential_moving_average, from_values};

/// The spans reported in every snapshot, shortest first.
pub const EMA_SPANS: [usize; 5] = [21, 36, 50, 95, 200];

/// Last EMA value per span in [`EMA_SPANS`] order.
///
/// The recursion seeds on the first close, so every entry is defined for any
/// non-empty input; an empty input yields all-`None`.
pub fn latest_emas(closes: &[f64]) -> [Option<f64>; 5] {
    let series = from_values(closes);
    EMA_SPANS.map(|span| {
        exponential_moving_average(&series, span)
            .last()
            .copied()
            .flatten()
    })
}

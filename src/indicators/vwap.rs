// =============================================================================
// Volume-Weighted Average Price (VWAP)
// =============================================================================
//
// VWAP = cumsum(Close * Volume) / cumsum(Volume), evaluated at the last bar.
// The division is left to float semantics: an all-zero-volume history yields
// NaN rather than a substituted default.

use crate::market_data::PriceHistory;
use crate::series::cumulative_sum;

/// Last value of the cumulative VWAP series; `None` only for an empty history.
pub fn vwap(history: &PriceHistory) -> Option<f64> {
    if history.is_empty() {
        return None;
    }

    let closes = history.closes();
    let volumes = history.volumes();
    let weighted: Vec<f64> = closes
        .iter()
        .zip(volumes.iter())
        .map(|(c, v)| c * v)
        .collect();

    let cum_pv = cumulative_sum(&weighted);
    let cum_v = cumulative_sum(&volumes);

    match (cum_pv.last(), cum_v.last()) {
        (Some(pv), Some(v)) => Some(pv / v),
        _ => None,
    }
}

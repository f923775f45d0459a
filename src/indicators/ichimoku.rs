// =============================================================================
// Ichimoku Cloud — trend position classification
// =============================================================================
//
// conversion = (max9(High)  + min9(Low))  / 2
// base       = (max26(High) + min26(Low)) / 2
// span A     = shift_forward((conversion + base) / 2, 26)
// span B     = shift_forward((max52(High) + min52(Low)) / 2, 26)
//
// The spans are delayed by the base-line period, so the value read at the
// last index was computed 26 bars earlier. That delay also means the last 26
// *computed* span entries never land inside the series; only the last row is
// ever read here, so the practical effect is comparing today's close against
// cloud levels from 26 bars back.
// =============================================================================

use crate::market_data::PriceHistory;
use crate::series::{from_values, rolling_max, rolling_min, shift_forward, zip_with, DerivedSeries};
use crate::types::CloudStatus;

const CONVERSION_PERIOD: usize = 9;
const BASE_PERIOD: usize = 26;
const SPAN_B_PERIOD: usize = 52;

/// Midpoint of the rolling high/low range over `window` bars.
fn range_midpoint(highs: &[Option<f64>], lows: &[Option<f64>], window: usize) -> DerivedSeries {
    zip_with(
        &rolling_max(highs, window),
        &rolling_min(lows, window),
        |hi, lo| (hi + lo) / 2.0,
    )
}

/// Classify the latest close against the Ichimoku cloud.
///
/// `AboveCloud` requires the close to be at or above *both* span values at
/// the last index. Either span still undefined (insufficient history for the
/// 52-bar window plus the 26-bar delay) counts as not above the cloud.
pub fn cloud_status(history: &PriceHistory) -> CloudStatus {
    let Some(last_close) = history.last().map(|b| b.close) else {
        return CloudStatus::NotAboveCloud;
    };

    let highs = from_values(&history.highs());
    let lows = from_values(&history.lows());

    let conversion = range_midpoint(&highs, &lows, CONVERSION_PERIOD);
    let base = range_midpoint(&highs, &lows, BASE_PERIOD);

    let span_a = shift_forward(
        &zip_with(&conversion, &base, |c, b| (c + b) / 2.0),
        BASE_PERIOD,
    );
    let span_b = shift_forward(&range_midpoint(&highs, &lows, SPAN_B_PERIOD), BASE_PERIOD);

    let above = match (span_a.last().copied().flatten(), span_b.last().copied().flatten()) {
        (Some(a), Some(b)) => last_close >= a && last_close >= b,
        _ => false,
    };

    if above {
        CloudStatus::AboveCloud
    } else {
        CloudStatus::NotAboveCloud
    }
}

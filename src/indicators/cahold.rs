// =============================================================================
// Cahold — close-above-hold price direction
// =============================================================================

use crate::types::Bias;

/// Direction of the latest close relative to the previous session's close.
pub fn cahold(previous_close: f64, latest_close: f64) -> Bias {
    if latest_close >= previous_close {
        Bias::Bullish
    } else {
        Bias::Bearish
    }
}

/// Cahold from the last two entries of a close column; `None` when fewer than
/// two bars exist.
pub fn latest_cahold(closes: &[f64]) -> Option<Bias> {
    match closes {
        [.., previous, latest] => Some(cahold(*previous, *latest)),
        _ => None,
    }
}

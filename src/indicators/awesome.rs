// =============================================================================
// Awesome Oscillator (AO) — midpoint momentum
// =============================================================================
//
// AO = SMA5(midpoint) - SMA34(midpoint), where midpoint = (High + Low) / 2.
//
// The full series is returned (not just the last value) so the caller can
// compare the last two entries for the movement classification.
// =============================================================================

use crate::market_data::PriceHistory;
use crate::series::{from_values, simple_moving_average, zip_with, DerivedSeries};
use crate::types::{AoMovement, Bias};

const SHORT_PERIOD: usize = 5;
const LONG_PERIOD: usize = 34;

/// Full AO series aligned with the history; `None` until the 34-bar window fills.
pub fn awesome_oscillator(history: &PriceHistory) -> DerivedSeries {
    let midpoint = zip_with(
        &from_values(&history.highs()),
        &from_values(&history.lows()),
        |h, l| (h + l) / 2.0,
    );

    zip_with(
        &simple_moving_average(&midpoint, SHORT_PERIOD),
        &simple_moving_average(&midpoint, LONG_PERIOD),
        |short, long| short - long,
    )
}

/// Sign test on a single AO value.
pub fn interpret_ao(value: f64) -> Bias {
    if value >= 0.0 {
        Bias::Bullish
    } else {
        Bias::Bearish
    }
}

/// Classify the latest AO move from its last two values.
pub fn interpret_ao_movement(current: f64, previous: f64) -> AoMovement {
    if current >= 0.0 && previous < current {
        AoMovement::BullishIncreasing
    } else if current >= 0.0 && previous > current {
        AoMovement::BullishDecreasing
    } else if current < 0.0 && previous < current {
        AoMovement::BearishIncreasing
    } else if current < 0.0 && previous > current {
        AoMovement::BearishDecreasing
    } else {
        AoMovement::Stable
    }
}

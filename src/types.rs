// =============================================================================
// Shared types used across the Atlas screener
// =============================================================================

use serde::{Deserialize, Serialize};

/// Position of the latest close relative to the Ichimoku cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudStatus {
    AboveCloud,
    NotAboveCloud,
}

impl std::fmt::Display for CloudStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AboveCloud => write!(f, "ABOVE_CLOUD"),
            Self::NotAboveCloud => write!(f, "NOT_ABOVE_CLOUD"),
        }
    }
}

/// Two-state directional label shared by the AO interpretation and the
/// close-above-hold price-direction check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Bullish,
    Bearish,
}

impl std::fmt::Display for Bias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "BULLISH"),
            Self::Bearish => write!(f, "BEARISH"),
        }
    }
}

/// Four-way sign-and-direction classification of the Awesome Oscillator's
/// latest move, plus `Stable` when the last two values are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AoMovement {
    BullishIncreasing,
    BullishDecreasing,
    BearishIncreasing,
    BearishDecreasing,
    Stable,
}

impl std::fmt::Display for AoMovement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BullishIncreasing => write!(f, "BULLISH_INCREASING"),
            Self::BullishDecreasing => write!(f, "BULLISH_DECREASING"),
            Self::BearishIncreasing => write!(f, "BEARISH_INCREASING"),
            Self::BearishDecreasing => write!(f, "BEARISH_DECREASING"),
            Self::Stable => write!(f, "STABLE"),
        }
    }
}

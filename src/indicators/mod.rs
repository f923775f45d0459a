// =============================================================================
// Indicator Calculators
// =============================================================================
//
// Pure, side-effect-free calculators built on the series statistics library.
// Each consumes one symbol's price history (or a column view of it) and
// returns either a full derived series or a scalar summary; undefined-window
// entries surface as `None`, never as a substituted default.

pub mod awesome;
pub mod cahold;
pub mod ema;
pub mod ichimoku;
pub mod macd;
pub mod returns;
pub mod rsi;
pub mod vwap;

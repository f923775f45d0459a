// =============================================================================
// Returns — simple percent change between consecutive closes
// =============================================================================

use crate::series::{diff, DerivedSeries};

/// Percent-change series: `None` at index 0, `(c[i] - c[i-1]) / c[i-1]` after.
///
/// Division is untrapped: a zero previous close produces an infinite return.
pub fn returns(closes: &[f64]) -> DerivedSeries {
    diff(closes)
        .iter()
        .enumerate()
        .map(|(i, d)| d.map(|d| d / closes[i - 1]))
        .collect()
}

/// Last defined return; `None` when there are fewer than two closes.
pub fn latest_return(closes: &[f64]) -> Option<f64> {
    returns(closes).last().copied().flatten()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_known_values() {
        let out = returns(&[100.0, 110.0, 99.0]);
        assert_eq!(out[0], None);
        assert!((out[1].unwrap() - 0.10).abs() < 1e-12);
        assert!((out[2].unwrap() + 0.10).abs() < 1e-12);
    }

    #[test]
    fn latest_return_needs_two_bars() {
        assert!(latest_return(&[]).is_none());
        assert!(latest_return(&[100.0]).is_none());
        assert!(latest_return(&[100.0, 105.0]).is_some());
    }

    #[test]
    fn zero_previous_close_is_untrapped() {
        let out = returns(&[0.0, 5.0]);
        assert!(out[1].unwrap().is_infinite());
    }
}

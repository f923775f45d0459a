// =============================================================================
// Series Statistics — rolling and recursive primitives
// =============================================================================
//
// Every function here is pure: it takes an ordered slice and returns a new
// vector of the same length, never mutating its input.
//
// Undefined values are modelled as `None`, not as floating-point NaN:
//   - A window op yields `None` until the window is full, and whenever any
//     element inside the window is `None`.
//   - An EMA stays `None` until it sees its first defined input.
// NaN/infinity can still appear *inside* `Some` as the result of ordinary
// arithmetic (e.g. 0/0 in a downstream ratio); those are deliberately left
// to standard float semantics.
// =============================================================================

/// A derived series aligned index-for-index with its source column.
pub type DerivedSeries = Vec<Option<f64>>;

/// Lift a fully-defined column into the `Option` domain.
pub fn from_values(values: &[f64]) -> DerivedSeries {
    values.iter().map(|&v| Some(v)).collect()
}

/// Apply `fold` over each full trailing window of `window` elements.
///
/// Output[i] is `None` when `i < window - 1`, when `window == 0`, or when
/// any element of `series[i-window+1 ..= i]` is `None`.
fn rolling<F>(series: &[Option<f64>], window: usize, fold: F) -> DerivedSeries
where
    F: Fn(&[f64]) -> f64,
{
    let mut result = vec![None; series.len()];
    if window == 0 || series.len() < window {
        return result;
    }

    let mut buf = Vec::with_capacity(window);
    for i in (window - 1)..series.len() {
        buf.clear();
        for v in &series[i + 1 - window..=i] {
            match v {
                Some(x) => buf.push(*x),
                None => break,
            }
        }
        if buf.len() == window {
            result[i] = Some(fold(&buf));
        }
    }
    result
}

/// Rolling maximum over a trailing window.
pub fn rolling_max(series: &[Option<f64>], window: usize) -> DerivedSeries {
    rolling(series, window, |w| w.iter().copied().fold(f64::MIN, f64::max))
}

/// Rolling minimum over a trailing window.
pub fn rolling_min(series: &[Option<f64>], window: usize) -> DerivedSeries {
    rolling(series, window, |w| w.iter().copied().fold(f64::MAX, f64::min))
}

/// Rolling mean over a trailing window.
pub fn simple_moving_average(series: &[Option<f64>], window: usize) -> DerivedSeries {
    rolling(series, window, |w| {
        w.iter().sum::<f64>() / w.len() as f64
    })
}

/// Recursive exponential smoothing with smoothing factor `alpha = 2 / (span + 1)`.
///
/// The recursion seeds on the first defined input at its own index
/// (`ema[i0] = series[i0]`, no bias correction), then
/// `ema[i] = alpha * x[i] + (1 - alpha) * ema[i-1]`.
///
/// A `None` input after seeding emits `None` and leaves the accumulator
/// untouched, so a single undefined sample never corrupts the smoothed state.
///
/// # Edge cases
/// - `span == 0` => all-`None` output (alpha would exceed 1).
/// - All-`None` input => all-`None` output.
pub fn exponential_moving_average(series: &[Option<f64>], span: usize) -> DerivedSeries {
    let mut result = vec![None; series.len()];
    if span == 0 {
        return result;
    }

    let alpha = 2.0 / (span + 1) as f64;
    let mut state: Option<f64> = None;

    for (i, v) in series.iter().enumerate() {
        let Some(x) = v else { continue };
        let ema = match state {
            None => *x,
            Some(prev) => alpha * x + (1.0 - alpha) * prev,
        };
        state = Some(ema);
        result[i] = Some(ema);
    }
    result
}

/// Running total: `cum[0] = values[0]`, `cum[i] = cum[i-1] + values[i]`.
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    values
        .iter()
        .map(|v| {
            total += v;
            total
        })
        .collect()
}

/// Delay a series by `periods` indices: output[i] = input[i - periods].
///
/// The first `periods` entries are `None` and the tail of the input drops
/// off the end — this is a forward shift (delay), never a lookahead.
pub fn shift_forward(series: &[Option<f64>], periods: usize) -> DerivedSeries {
    let mut result = vec![None; series.len()];
    if periods < series.len() {
        result[periods..].clone_from_slice(&series[..series.len() - periods]);
    }
    result
}

/// Consecutive difference: `None` at index 0, `v[i] - v[i-1]` after.
pub fn diff(values: &[f64]) -> DerivedSeries {
    let mut result = vec![None; values.len()];
    for i in 1..values.len() {
        result[i] = Some(values[i] - values[i - 1]);
    }
    result
}

/// Combine two aligned series elementwise; `None` wins on either side.
pub fn zip_with<F>(a: &[Option<f64>], b: &[Option<f64>], f: F) -> DerivedSeries
where
    F: Fn(f64, f64) -> f64,
{
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(f(*x, *y)),
            _ => None,
        })
        .collect()
}

//! Mapping from continuous positions (pixel columns, normalized cursor
//! positions, sparkle phases) to fractional series indices, and linear
//! interpolation at those indices.

use crate::preprocess::finite_or_zero;

/// Number of sparkle markers per series.
pub const SPARKLE_COUNT: usize = 8;

/// Linearly interpolate `series` at fractional index `idx`.
///
/// Indices are clamped into `[0, n-1]`; at the last index the final sample
/// is held, nothing is extrapolated. An empty series yields 0 and
/// non-finite samples count as 0.
pub fn value_at_index(series: &[f64], idx: f64) -> f64 {
    let Some(last) = series.len().checked_sub(1) else {
        return 0.0;
    };
    let idx = if idx.is_finite() {
        idx.clamp(0.0, last as f64)
    } else {
        0.0
    };
    let i0 = (idx.floor() as usize).min(last);
    let frac = idx - i0 as f64;
    let v0 = finite_or_zero(series[i0]);
    let v1 = series.get(i0 + 1).copied().map_or(v0, finite_or_zero);
    v0 + (v1 - v0) * frac
}

/// Horizontal scroll phase in `[0, 1)` for clock time `t`.
pub fn scroll_phase(t: f64) -> f64 {
    (t * 0.5).rem_euclid(1.0)
}

/// Fractional data index drawn at pixel column `pixel` of a `width`-wide
/// canvas, shifted by `phase * (n-1)` and wrapped modulo `n-1`.
///
/// The result is always in `[0, n-1)` for `n >= 2`. For `n < 2` there is
/// nothing to scroll and the index is 0.
pub fn scroll_index(n: usize, pixel: usize, width: usize, phase: f64) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let span = (n - 1) as f64;
    let u = (pixel as f64 / width.saturating_sub(1).max(1) as f64) * span;
    let idx = (u + phase * span).rem_euclid(span);
    // rem_euclid can round up to `span` for tiny negative inputs
    if idx >= span { 0.0 } else { idx }
}

/// Value drawn at pixel column `pixel`, including the scroll phase.
pub fn value_at_pixel(series: &[f64], pixel: usize, width: usize, phase: f64) -> f64 {
    value_at_index(series, scroll_index(series.len(), pixel, width, phase))
}

/// Value at a normalized horizontal position `u01` with no scroll phase.
///
/// Used for hover lookups so the value under the cursor belongs to the
/// data's natural position rather than the animated one.
pub fn value_at_normalized(series: &[f64], u01: f64) -> f64 {
    let span = series.len().saturating_sub(1) as f64;
    value_at_index(series, u01.clamp(0.0, 1.0) * span)
}

/// Normalized positions of the sparkle markers at clock time `t`.
pub fn sparkle_positions(t: f64) -> [f64; SPARKLE_COUNT] {
    let offset = t.rem_euclid(1.0);
    std::array::from_fn(|s| (s as f64 / SPARKLE_COUNT as f64 + offset).rem_euclid(1.0))
}

/// Index into `dates` nearest to the normalized position `u01`.
pub fn date_index(num_dates: usize, u01: f64) -> Option<usize> {
    let last = num_dates.checked_sub(1)?;
    let idx = (u01.clamp(0.0, 1.0) * last as f64).round() as usize;
    Some(idx.min(last))
}

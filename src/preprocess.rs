//! Series preprocessing: optional moving-average smoothing and the shared
//! vertical scale for both series.

use crate::models::{ChartData, DisplayState};

/// Window of the trailing simple moving average.
pub const SMOOTHING_WINDOW: usize = 7;

/// Series ready for drawing, plus the scale they share.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreparedSeries {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    /// Denominator for vertical scaling, always `>= 1`.
    pub max_val: f64,
}

/// Trailing simple moving average.
///
/// For `i < window` the average covers the `i + 1` samples seen so far
/// instead of dividing by the full window. A window of 0 or 1 returns the
/// input unchanged. Non-finite samples count as 0.
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 {
        return data.to_vec();
    }
    let mut out = Vec::with_capacity(data.len());
    let mut acc = 0.0;
    for (i, &v) in data.iter().enumerate() {
        acc += finite_or_zero(v);
        if i >= window {
            acc -= finite_or_zero(data[i - window]);
        }
        let denom = if i < window { i + 1 } else { window };
        out.push(acc / denom as f64);
    }
    out
}

/// `max(1, max of the visible series' samples)`.
///
/// Hidden series do not contribute, so the remaining one rescales to fill
/// the vertical space.
pub fn shared_max(a: &[f64], b: &[f64], show_a: bool, show_b: bool) -> f64 {
    let visible_a = a.iter().filter(|_| show_a);
    let visible_b = b.iter().filter(|_| show_b);
    visible_a
        .chain(visible_b)
        .copied()
        .filter(|v| v.is_finite())
        .fold(1.0, f64::max)
}

/// Build the drawable series for the current data and display flags.
///
/// The scale is taken from the raw samples so toggling smoothing does not
/// make the chart jump vertically. Source data is never modified.
pub fn preprocess(data: &ChartData, display: &DisplayState) -> PreparedSeries {
    let raw_a = data.effective_a();
    let raw_b = data.effective_b();
    let max_val = shared_max(raw_a, raw_b, display.show_series_a, display.show_series_b);

    let prepare = |raw: &[f64]| {
        if display.smoothing_enabled {
            moving_average(raw, SMOOTHING_WINDOW)
        } else {
            raw.to_vec()
        }
    };

    PreparedSeries {
        a: prepare(raw_a),
        b: prepare(raw_b),
        max_val,
    }
}

pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_window_slides() {
        let data: Vec<f64> = (1..=9).map(f64::from).collect();
        let out = moving_average(&data, 7);
        // index 7 averages samples 2..=8
        assert!((out[7] - 5.0).abs() < 1e-12);
        assert!((out[8] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn window_of_one_is_identity() {
        let data = vec![3.0, 1.0, 4.0];
        assert_eq!(moving_average(&data, 1), data);
    }

    #[test]
    fn nan_samples_do_not_poison_scale() {
        assert_eq!(shared_max(&[f64::NAN, 4.0], &[], true, true), 4.0);
    }
}

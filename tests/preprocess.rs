use postwave::models::{ChartData, DisplayState};
use postwave::preprocess::{SMOOTHING_WINDOW, moving_average, preprocess, shared_max};

fn display(show_a: bool, show_b: bool, smoothing: bool) -> DisplayState {
    DisplayState {
        show_series_a: show_a,
        show_series_b: show_b,
        smoothing_enabled: smoothing,
        ..DisplayState::default()
    }
}

#[test]
fn scale_is_at_least_one() {
    assert_eq!(shared_max(&[], &[], true, true), 1.0);
    assert_eq!(shared_max(&[0.0, 0.0], &[0.0], true, true), 1.0);
    assert_eq!(shared_max(&[0.25, 0.5], &[], true, true), 1.0);
    let empty = preprocess(&ChartData::default(), &DisplayState::default());
    assert_eq!(empty.max_val, 1.0);
    assert!(empty.a.is_empty() && empty.b.is_empty());
}

#[test]
fn warm_up_uses_partial_window() {
    let out = moving_average(&[10.0, 20.0, 30.0, 40.0], SMOOTHING_WINDOW);
    assert_eq!(out[0], 10.0);
    assert_eq!(out[1], 15.0);
    assert_eq!(out[2], 20.0);
    assert_eq!(out[3], 25.0);
}

#[test]
fn disabling_smoothing_restores_raw_bits() {
    let raw = vec![3.3, 7.1, 0.2, 9.9, 4.4, 1.0, 8.8, 2.2, 6.6];
    let data = ChartData::dual(raw.clone(), vec![1.0, 2.0], Vec::new());

    let smoothed = preprocess(&data, &display(true, true, true));
    assert_ne!(smoothed.a, raw);

    let plain = preprocess(&data, &display(true, true, false));
    assert_eq!(plain.a.len(), raw.len());
    for (x, y) in plain.a.iter().zip(&raw) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
    assert_eq!(data.series_a, raw, "source is never modified");
}

#[test]
fn hiding_a_series_rescales_to_the_other() {
    let data = ChartData::dual(vec![1.0, 4.0, 2.0], vec![50.0, 80.0, 60.0], Vec::new());
    assert_eq!(preprocess(&data, &display(true, true, false)).max_val, 80.0);
    assert_eq!(preprocess(&data, &display(true, false, false)).max_val, 4.0);
    assert_eq!(preprocess(&data, &display(false, true, false)).max_val, 80.0);
    assert_eq!(preprocess(&data, &display(false, false, false)).max_val, 1.0);
}

#[test]
fn scale_ignores_smoothing() {
    let data = ChartData::dual(vec![0.0, 0.0, 90.0], Vec::new(), Vec::new());
    let smoothed = preprocess(&data, &display(true, true, true));
    assert_eq!(smoothed.max_val, 90.0);
    assert_eq!(smoothed.a[2], 30.0);
}

#[test]
fn single_mode_uses_points() {
    let data = ChartData::single(vec![2.0, 6.0], Vec::new());
    let p = preprocess(&data, &DisplayState::default());
    assert_eq!(p.a, vec![2.0, 6.0]);
    assert!(p.b.is_empty());
    assert_eq!(p.max_val, 6.0);
}

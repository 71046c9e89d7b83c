use postwave::models::{ChartData, DisplayState};
use postwave::preprocess::{PreparedSeries, preprocess};
use postwave::scene::{
    CanvasSize, DrawCommand, FrameInput, Palette, TextAnchor, glow_alpha, render_frame, tooltip_x,
};

fn dates(n: usize) -> Vec<String> {
    (1..=n).map(|d| format!("2024-01-{d:02}")).collect()
}

fn frame(
    prepared: &PreparedSeries,
    dates: &[String],
    display: &DisplayState,
    hover: Option<f64>,
    canvas: CanvasSize,
) -> Vec<DrawCommand> {
    let palette = Palette::default();
    render_frame(&FrameInput {
        prepared,
        dates,
        display,
        hover,
        time: 0.0,
        canvas,
        palette: &palette,
    })
}

fn kinds(cmds: &[DrawCommand]) -> Vec<&'static str> {
    cmds.iter()
        .map(|c| match c {
            DrawCommand::Clear { .. } => "clear",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Polyline { .. } => "poly",
            DrawCommand::Circle { .. } => "circle",
            DrawCommand::Rect { .. } => "rect",
            DrawCommand::Text { .. } => "text",
        })
        .collect()
}

fn texts(cmds: &[DrawCommand]) -> Vec<String> {
    cmds.iter()
        .filter_map(|c| match c {
            DrawCommand::Text { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn paint_order_is_fixed() {
    let data = ChartData::dual(vec![1.0, 3.0, 2.0], vec![2.0, 2.0, 5.0], Vec::new());
    let display = DisplayState::default();
    let prepared = preprocess(&data, &display);
    let cmds = frame(&prepared, &[], &display, None, CanvasSize::new(50.0, 40.0, 1.0));

    let k = kinds(&cmds);
    let mut expected = vec!["clear"];
    expected.extend(["line"; 6]);
    expected.extend(["poly"; 4]);
    expected.extend(["circle"; 16]);
    assert_eq!(k, expected);
}

#[test]
fn polyline_then_glow_per_series() {
    let data = ChartData::dual(vec![1.0, 3.0], Vec::new(), Vec::new());
    let display = DisplayState {
        speed_factor: 2.0,
        ..DisplayState::default()
    };
    let prepared = preprocess(&data, &display);
    let cmds = frame(&prepared, &[], &display, None, CanvasSize::new(30.0, 40.0, 1.0));
    let polys: Vec<_> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Polyline {
                points,
                color,
                width,
            } => Some((points.clone(), *color, *width)),
            _ => None,
        })
        .collect();
    assert_eq!(polys.len(), 2);
    assert_eq!(polys[0].0, polys[1].0, "glow strokes the same path");
    assert_eq!(polys[0].2, 1.5);
    assert_eq!(polys[1].2, 4.0);
    assert!((polys[1].1.a - glow_alpha(2.0)).abs() < 1e-12);
    assert_eq!(polys[0].0.len(), 30, "one point per backing column");
}

#[test]
fn hidden_and_empty_series_draw_nothing() {
    let data = ChartData::dual(vec![1.0, 3.0], Vec::new(), Vec::new());
    let display = DisplayState {
        show_series_a: false,
        ..DisplayState::default()
    };
    let prepared = preprocess(&data, &display);
    let cmds = frame(&prepared, &[], &display, None, CanvasSize::new(30.0, 40.0, 1.0));
    assert_eq!(kinds(&cmds).iter().filter(|k| **k == "poly").count(), 0);
    assert_eq!(kinds(&cmds).iter().filter(|k| **k == "circle").count(), 0);
}

#[test]
fn single_sample_is_a_flat_line() {
    let data = ChartData::single(vec![5.0], Vec::new());
    let display = DisplayState::default();
    let prepared = preprocess(&data, &display);
    let cmds = frame(&prepared, &[], &display, None, CanvasSize::new(20.0, 100.0, 1.0));
    let DrawCommand::Polyline { points, .. } = &cmds[7] else {
        panic!("expected the series polyline after the grid");
    };
    // 5 / 5 of the drawable band: 100 - 90 - 5
    assert!(points.iter().all(|p| (p.y - 5.0).abs() < 1e-9));
}

#[test]
fn ticks_every_seventh_date_with_month_day_labels() {
    let data = ChartData::dual(vec![1.0; 15], Vec::new(), dates(15));
    let display = DisplayState::default();
    let prepared = preprocess(&data, &display);
    let canvas = CanvasSize::new(140.0, 60.0, 1.0);
    let cmds = frame(&prepared, &data.dates, &display, None, canvas);
    assert_eq!(texts(&cmds), vec!["01-01", "01-08", "01-15"]);

    let tick_x: Vec<f64> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text {
                position, anchor, ..
            } => {
                assert_eq!(*anchor, TextAnchor::Center);
                Some(position.x)
            }
            _ => None,
        })
        .collect();
    // floor(i / 14 * 140)
    assert_eq!(tick_x, vec![0.0, 70.0, 140.0]);
}

#[test]
fn tooltip_lists_date_and_visible_values() {
    let data = ChartData::dual(vec![10.0, 20.0, 30.0], vec![4.0, 4.0, 4.0], dates(3));
    let display = DisplayState::default();
    let prepared = preprocess(&data, &display);
    let canvas = CanvasSize::new(300.0, 140.0, 1.0);
    let cmds = frame(&prepared, &data.dates, &display, Some(0.25), canvas);
    let t = texts(&cmds);
    // tick label first, then the tooltip lines
    assert_eq!(t, vec!["01-01", "2024-01-02", "IG: 15", "YT: 4"]);

    let hidden = DisplayState {
        show_series_b: false,
        ..DisplayState::default()
    };
    let prepared = preprocess(&data, &hidden);
    let cmds = frame(&prepared, &data.dates, &hidden, Some(0.25), canvas);
    assert!(!texts(&cmds).iter().any(|l| l.starts_with("YT")));
}

#[test]
fn fewer_dates_than_samples_label_only_known_dates() {
    let a: Vec<f64> = (0..20).map(|i| 2.0 * i as f64).collect();
    let data = ChartData::dual(a, Vec::new(), dates(9));
    let display = DisplayState::default();
    let prepared = preprocess(&data, &display);
    let canvas = CanvasSize::new(160.0, 140.0, 1.0);
    let cmds = frame(&prepared, &data.dates, &display, Some(0.5), canvas);
    // ticks at date indices 0 and 7; the tooltip date is the nearest of the 9
    // dates, the value comes from all 20 samples (index 9.5)
    assert_eq!(texts(&cmds), vec!["01-01", "01-08", "2024-01-05", "IG: 19"]);

    let tick_x: Vec<f64> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text {
                position,
                anchor: TextAnchor::Center,
                ..
            } => Some(position.x),
            _ => None,
        })
        .collect();
    // floor(i / 8 * 160)
    assert_eq!(tick_x, vec![0.0, 140.0]);
}

#[test]
fn more_dates_than_samples_hold_the_last_value() {
    let data = ChartData::dual(vec![1.0, 2.0, 7.0], Vec::new(), dates(12));
    let display = DisplayState::default();
    let prepared = preprocess(&data, &display);
    let canvas = CanvasSize::new(300.0, 140.0, 1.0);
    let cmds = frame(&prepared, &data.dates, &display, Some(1.0), canvas);
    assert_eq!(texts(&cmds), vec!["01-01", "01-08", "2024-01-12", "IG: 7"]);
}

#[test]
fn long_tooltip_lines_are_clipped_to_the_canvas() {
    let long_date = vec!["2024-01-01T00:00:00.000Z".to_string()];
    let data = ChartData::dual(vec![3.0], Vec::new(), long_date);
    let display = DisplayState::default();
    let prepared = preprocess(&data, &display);
    let canvas = CanvasSize::new(160.0, 140.0, 1.0);
    let cmds = frame(&prepared, &data.dates, &display, Some(0.5), canvas);

    let t = texts(&cmds);
    assert_eq!(t[0], "01-01");
    assert_eq!(t[1], "2024-01-01T00:00:00…");
    assert_eq!(t[2], "IG: 3");

    let (x, w) = cmds
        .iter()
        .find_map(|c| match c {
            DrawCommand::Rect { origin, width, .. } => Some((origin.x, *width)),
            _ => None,
        })
        .expect("tooltip box");
    assert!(x >= 4.0);
    assert!(x + w <= 160.0 - 4.0);
}

#[test]
fn tooltip_box_stays_inside_canvas() {
    let data = ChartData::dual(vec![1.0, 2.0], Vec::new(), Vec::new());
    let display = DisplayState::default();
    let prepared = preprocess(&data, &display);
    let cmds = frame(&prepared, &[], &display, Some(1.0), CanvasSize::new(300.0, 140.0, 1.0));
    let (x, w) = cmds
        .iter()
        .find_map(|c| match c {
            DrawCommand::Rect { origin, width, .. } => Some((origin.x, *width)),
            _ => None,
        })
        .expect("tooltip box");
    assert_eq!(w, 120.0);
    assert_eq!(x, 300.0 - 120.0 - 4.0);

    assert_eq!(tooltip_x(300.0, 120.0, 0.0), 8.0);
    assert_eq!(tooltip_x(300.0, 120.0, -50.0), 4.0);
}

#[test]
fn hover_without_anything_to_report_draws_only_the_guide() {
    let data = ChartData::default();
    let display = DisplayState::default();
    let prepared = preprocess(&data, &display);
    let cmds = frame(&prepared, &[], &display, Some(0.5), CanvasSize::new(40.0, 40.0, 1.0));
    let k = kinds(&cmds);
    assert_eq!(k.last(), Some(&"line"));
    assert!(!k.contains(&"rect"));
}

#[test]
fn device_ratio_scales_backing_store_and_strokes() {
    let data = ChartData::dual(vec![1.0, 2.0], Vec::new(), Vec::new());
    let display = DisplayState::default();
    let prepared = preprocess(&data, &display);
    let canvas = CanvasSize::new(40.0, 50.0, 2.0);
    let cmds = frame(&prepared, &[], &display, None, canvas);
    assert_eq!(
        cmds[0],
        DrawCommand::Clear {
            width: 80.0,
            height: 100.0
        }
    );
    let DrawCommand::Line { width, .. } = &cmds[1] else {
        panic!("grid line");
    };
    assert_eq!(*width, 2.0);
}

#[test]
fn empty_canvas_renders_nothing() {
    let prepared = preprocess(&ChartData::default(), &DisplayState::default());
    let cmds = frame(
        &prepared,
        &[],
        &DisplayState::default(),
        None,
        CanvasSize::new(0.0, 140.0, 1.0),
    );
    assert!(cmds.is_empty());
}

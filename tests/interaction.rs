use postwave::clock::ManualHost;
use postwave::interaction::HoverState;
use postwave::{
    ChartData, ChartEvent, ChartListener, ChartOptions, EventQueue, LiveChart, SeriesId, Toggle,
    ToggleMode,
};

fn ten_days() -> Vec<String> {
    (1..=10).map(|d| format!("2024-01-{d:02}")).collect()
}

fn dual() -> ChartData {
    ChartData::dual(vec![1.0; 10], vec![2.0; 10], ten_days())
}

#[test]
fn hover_round_trip_to_date_ends() {
    let dates = ten_days();
    let mut h = HoverState::new();
    h.set(Some(0.0));
    assert_eq!(h.resolve_date(&dates), Some((0, "2024-01-01")));
    h.set(Some(1.0));
    assert_eq!(h.resolve_date(&dates), Some((9, "2024-01-10")));
}

#[test]
fn pointer_leave_clears_hover() {
    let mut host = ManualHost::new();
    let mut chart = LiveChart::new(&mut host, EventQueue::new(), dual(), &ChartOptions::default());
    chart.pointer_move(150.0, 100.0, 200.0);
    assert_eq!(chart.hover(), Some(0.25));
    chart.pointer_leave();
    assert_eq!(chart.hover(), None);
}

#[test]
fn click_reports_the_date_under_the_cursor() {
    let mut host = ManualHost::new();
    let mut chart = LiveChart::new(&mut host, EventQueue::new(), dual(), &ChartOptions::default());
    assert_eq!(chart.click(), None, "no hover, no click target");

    chart.pointer_move(300.0, 0.0, 300.0);
    assert_eq!(chart.click(), Some(9));
    assert_eq!(
        chart.listener_mut().drain(),
        vec![ChartEvent::DateClicked {
            index: 9,
            date: "2024-01-10".into()
        }]
    );
}

#[test]
fn click_without_dates_does_nothing() {
    let mut host = ManualHost::new();
    let data = ChartData::dual(vec![1.0, 2.0], Vec::new(), Vec::new());
    let mut chart = LiveChart::new(&mut host, EventQueue::new(), data, &ChartOptions::default());
    chart.hover_at(Some(0.5));
    assert_eq!(chart.click(), None);
    assert!(chart.listener().is_empty());
}

#[test]
fn controlled_toggles_only_report() {
    let mut host = ManualHost::new();
    let mut chart = LiveChart::new(&mut host, EventQueue::new(), dual(), &ChartOptions::default());
    assert!(chart.toggle(Toggle::Series(SeriesId::B), false));
    assert!(chart.toggle(Toggle::Smoothing, true));

    assert!(chart.display().show_series_b, "caller owns the state");
    assert!(!chart.display().smoothing_enabled);
    assert_eq!(
        chart.listener_mut().drain(),
        vec![
            ChartEvent::SeriesToggled {
                series: SeriesId::B,
                show: false
            },
            ChartEvent::SmoothingToggled(true),
        ]
    );

    // the caller answers by pushing new state
    let mut display = *chart.display();
    display.show_series_b = false;
    chart.set_display(display);
    assert!(!chart.display().show_series_b);
    assert_eq!(chart.prepared().max_val, 1.0);
}

#[test]
fn uncontrolled_toggles_update_local_state() {
    let mut host = ManualHost::new();
    let opts = ChartOptions {
        toggles: ToggleMode::Uncontrolled,
        ..ChartOptions::default()
    };
    let data = ChartData::dual(vec![1.0, 9.0], vec![50.0, 40.0], Vec::new());
    let mut chart = LiveChart::new(&mut host, EventQueue::new(), data, &opts);
    assert_eq!(chart.prepared().max_val, 50.0);
    chart.toggle(Toggle::Series(SeriesId::B), false);
    assert!(!chart.display().show_series_b);
    assert_eq!(chart.prepared().max_val, 9.0);
    assert_eq!(chart.listener().len(), 1);
}

#[test]
fn single_mode_has_no_overlay() {
    let mut host = ManualHost::new();
    let mut chart = LiveChart::standalone(&mut host, ChartData::single(vec![1.0, 2.0], Vec::new()));
    assert!(chart.overlay().is_none());
    assert!(!chart.toggle(Toggle::Smoothing, true));
    assert!(!chart.display().smoothing_enabled);
}

#[test]
fn overlay_mirrors_display_state() {
    let mut host = ManualHost::new();
    let opts = ChartOptions {
        show_series_a: false,
        smoothing: true,
        ..ChartOptions::default()
    };
    let chart = LiveChart::new(&mut host, EventQueue::new(), dual(), &opts);
    let overlay = chart.overlay().expect("dual mode");
    assert_eq!(
        overlay,
        [
            (Toggle::Series(SeriesId::A), false),
            (Toggle::Series(SeriesId::B), true),
            (Toggle::Smoothing, true),
        ]
    );
}

#[derive(Default)]
struct OnlyClicks {
    clicked: Vec<String>,
}

impl ChartListener for OnlyClicks {
    fn on_date_click(&mut self, _index: usize, date: &str) {
        self.clicked.push(date.to_string());
    }
}

#[test]
fn listeners_implement_only_what_they_need() {
    let mut host = ManualHost::new();
    let mut listener = OnlyClicks::default();
    {
        let mut chart = LiveChart::new(&mut host, &mut listener, dual(), &ChartOptions::default());
        chart.toggle(Toggle::Smoothing, true);
        chart.hover_at(Some(0.0));
        chart.click();
    }
    assert_eq!(listener.clicked, vec!["2024-01-01".to_string()]);
}

#[test]
fn hover_events_are_opt_in() {
    let mut host = ManualHost::new();
    let mut chart = LiveChart::new(
        &mut host,
        EventQueue::new().with_hover(),
        dual(),
        &ChartOptions::default(),
    );
    chart.hover_at(Some(0.4));
    chart.pointer_leave();
    assert_eq!(
        chart.listener_mut().drain(),
        vec![ChartEvent::Hover(Some(0.4)), ChartEvent::Hover(None)]
    );
}

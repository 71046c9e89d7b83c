//! Pointer tracking and the outward callbacks of a chart.
//!
//! Nothing in here mutates series data. Pointer input becomes a normalized
//! hover position; clicks and overlay toggles become calls on a
//! [`ChartListener`].

use serde::{Deserialize, Serialize};

use crate::models::SeriesId;
use crate::resample::date_index;

/// Normalized horizontal pointer position over a container, in `[0, 1]`.
///
/// Widths below one pixel are treated as one pixel.
pub fn normalize_pointer(client_x: f64, rect_left: f64, rect_width: f64) -> f64 {
    let x = (client_x - rect_left) / rect_width.max(1.0);
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Hover position of one chart instance. `None` while the pointer is outside.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverState {
    x: Option<f64>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Option<f64> {
        self.x
    }

    /// Update from a pointer-move event and return the new position.
    pub fn pointer_move(&mut self, client_x: f64, rect_left: f64, rect_width: f64) -> f64 {
        let x = normalize_pointer(client_x, rect_left, rect_width);
        self.x = Some(x);
        x
    }

    /// Set an already-normalized position; out of range values are clamped.
    pub fn set(&mut self, x01: Option<f64>) {
        self.x = x01.map(|x| if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) });
    }

    pub fn pointer_leave(&mut self) {
        self.x = None;
    }

    /// Date under the cursor: `round(x * (len - 1))`. Needs both a hover
    /// position and at least one date.
    pub fn resolve_date<'a>(&self, dates: &'a [String]) -> Option<(usize, &'a str)> {
        let idx = date_index(dates.len(), self.x?)?;
        dates.get(idx).map(|d| (idx, d.as_str()))
    }
}

/// One checkbox of the dual-mode overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Series(SeriesId),
    Smoothing,
}

/// Who owns the toggle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleMode {
    /// The caller owns visibility and smoothing; toggles are only reported.
    #[default]
    Controlled,
    /// The chart keeps its own copy and updates it before reporting.
    Uncontrolled,
}

/// Outward callbacks. Every method defaults to a no-op, so a listener only
/// implements the affordances it cares about.
pub trait ChartListener {
    fn on_toggle_series(&mut self, _series: SeriesId, _show: bool) {}

    fn on_toggle_smoothing(&mut self, _enabled: bool) {}

    /// A click while hovering over a dated position.
    fn on_date_click(&mut self, _index: usize, _date: &str) {}

    fn on_hover(&mut self, _x01: Option<f64>) {}
}

/// Listener that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl ChartListener for NoopListener {}

impl<T: ChartListener + ?Sized> ChartListener for &mut T {
    fn on_toggle_series(&mut self, series: SeriesId, show: bool) {
        (**self).on_toggle_series(series, show)
    }

    fn on_toggle_smoothing(&mut self, enabled: bool) {
        (**self).on_toggle_smoothing(enabled)
    }

    fn on_date_click(&mut self, index: usize, date: &str) {
        (**self).on_date_click(index, date)
    }

    fn on_hover(&mut self, x01: Option<f64>) {
        (**self).on_hover(x01)
    }
}

/// A recorded callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    SeriesToggled { series: SeriesId, show: bool },
    SmoothingToggled(bool),
    DateClicked { index: usize, date: String },
    Hover(Option<f64>),
}

/// Listener that buffers events for the owner to drain later, e.g. once per
/// GUI frame.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<ChartEvent>,
    record_hover: bool,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also record hover updates, which are otherwise dropped.
    pub fn with_hover(mut self) -> Self {
        self.record_hover = true;
        self
    }

    pub fn drain(&mut self) -> Vec<ChartEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ChartListener for EventQueue {
    fn on_toggle_series(&mut self, series: SeriesId, show: bool) {
        self.events.push(ChartEvent::SeriesToggled { series, show });
    }

    fn on_toggle_smoothing(&mut self, enabled: bool) {
        self.events.push(ChartEvent::SmoothingToggled(enabled));
    }

    fn on_date_click(&mut self, index: usize, date: &str) {
        self.events.push(ChartEvent::DateClicked {
            index,
            date: date.to_string(),
        });
    }

    fn on_hover(&mut self, x01: Option<f64>) {
        if self.record_hover {
            self.events.push(ChartEvent::Hover(x01));
        }
    }
}

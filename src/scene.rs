//! The per-frame renderer.
//!
//! [`render_frame`] is a pure function of prepared series, display flags,
//! hover position, clock time and canvas size. It returns a flat list of
//! [`DrawCommand`]s in paint order; backends in `viz` replay them.
//!
//! Paint order: clear, grid, per visible series (polyline then glow), per
//! visible series sparkles, date ticks, hover guide with dots and tooltip.

use crate::models::{DisplayState, SeriesId};
use crate::preprocess::PreparedSeries;
use crate::resample::{
    date_index, scroll_phase, sparkle_positions, value_at_index, value_at_normalized,
    value_at_pixel,
};
use crate::text::{estimate_text_width_px, month_day_label, truncate_to_width};

/// Upper bound on the device pixel ratio used for the backing store.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;
/// Number of horizontal grid bands.
pub const GRID_ROWS: usize = 5;
/// A date tick is drawn every `TICK_STEP` date indices.
pub const TICK_STEP: usize = 7;

const TOOLTIP_MIN_WIDTH: f64 = 120.0;
const TOOLTIP_MARGIN: f64 = 4.0;
const TOOLTIP_CURSOR_OFFSET: f64 = 8.0;
const TOOLTIP_TOP: f64 = 8.0;
const TOOLTIP_LINE_H: f64 = 16.0;
const TOOLTIP_PADDING: f64 = 16.0;

/// sRGB colour with a fractional alpha, like a canvas `rgba()` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Alpha scaled to a byte, for backends that want integer channels.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// `x` is the left edge of the text.
    Start,
    /// `x` is the horizontal centre of the text.
    Center,
}

/// One backend-independent drawing instruction in backing-store pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f64,
    },
    Polyline {
        points: Vec<Point>,
        color: Rgba,
        width: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: Rgba,
        stroke: Option<(Rgba, f64)>,
    },
    /// `position.y` is the text baseline.
    Text {
        position: Point,
        content: String,
        color: Rgba,
        size_px: f64,
        anchor: TextAnchor,
    },
}

/// Canvas dimensions in CSS (logical) pixels and in backing-store pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub css_width: f64,
    pub css_height: f64,
    /// Effective ratio, `min(2, device ratio)`.
    pub dpr: f64,
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(MAX_DEVICE_PIXEL_RATIO)
        } else {
            1.0
        };
        let css_width = css_width.max(0.0);
        let css_height = css_height.max(0.0);
        Self {
            css_width,
            css_height,
            dpr,
            width: (css_width * dpr).floor() as u32,
            height: (css_height * dpr).floor() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Colours and legend label for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub label: String,
    pub line: Rgba,
    pub glow: Rgba,
    pub sparkle: Rgba,
    pub hover_dot: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub series_a: SeriesStyle,
    pub series_b: SeriesStyle,
    pub grid: Rgba,
    pub tick_label: Rgba,
    pub guide: Rgba,
    pub tooltip_fill: Rgba,
    pub tooltip_border: Rgba,
    pub tooltip_text: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        let pink = Rgba::opaque(255, 105, 180);
        let red = Rgba::opaque(255, 60, 60);
        Self {
            series_a: SeriesStyle {
                label: "IG".into(),
                line: pink.with_alpha(0.9),
                glow: pink.with_alpha(0.15),
                sparkle: pink.with_alpha(0.9),
                hover_dot: pink,
            },
            series_b: SeriesStyle {
                label: "YT".into(),
                line: red.with_alpha(0.85),
                glow: red.with_alpha(0.12),
                sparkle: red.with_alpha(0.9),
                hover_dot: red,
            },
            grid: Rgba::new(255, 255, 255, 0.08),
            tick_label: Rgba::new(255, 255, 255, 0.6),
            guide: Rgba::new(255, 255, 255, 0.25),
            tooltip_fill: Rgba::new(0, 0, 0, 0.6),
            tooltip_border: Rgba::new(255, 255, 255, 0.15),
            tooltip_text: Rgba::opaque(255, 255, 255),
        }
    }
}

impl Palette {
    pub fn series(&self, id: SeriesId) -> &SeriesStyle {
        match id {
            SeriesId::A => &self.series_a,
            SeriesId::B => &self.series_b,
        }
    }
}

/// Everything one frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub prepared: &'a PreparedSeries,
    pub dates: &'a [String],
    pub display: &'a DisplayState,
    pub hover: Option<f64>,
    pub time: f64,
    pub canvas: CanvasSize,
    pub palette: &'a Palette,
}

impl FrameInput<'_> {
    fn visible(&self) -> impl Iterator<Item = (SeriesId, &[f64])> {
        [
            (SeriesId::A, self.prepared.a.as_slice()),
            (SeriesId::B, self.prepared.b.as_slice()),
        ]
        .into_iter()
        .filter(|(id, _)| self.display.is_visible(*id))
    }

    fn y_for(&self, v: f64) -> f64 {
        let h = self.canvas.height as f64;
        h - (v / self.prepared.max_val) * (h * 0.9) - h * 0.05
    }

    fn px(&self, base: f64) -> f64 {
        base.max(self.canvas.dpr * base)
    }
}

/// Alpha of the glow pass, derived from the speed factor.
pub fn glow_alpha(speed_factor: f64) -> f64 {
    (0.12 * speed_factor).clamp(0.06, 0.28)
}

/// Left edge of a tooltip box of `box_width` next to cursor `cursor_x`,
/// kept inside a canvas of `canvas_width`.
pub fn tooltip_x(canvas_width: f64, box_width: f64, cursor_x: f64) -> f64 {
    let beside_cursor = TOOLTIP_MARGIN.max(cursor_x + TOOLTIP_CURSOR_OFFSET);
    (canvas_width - box_width - TOOLTIP_MARGIN).min(beside_cursor)
}

/// Render one frame into draw commands. An empty canvas yields no commands.
pub fn render_frame(input: &FrameInput<'_>) -> Vec<DrawCommand> {
    let canvas = input.canvas;
    if canvas.is_empty() {
        return Vec::new();
    }
    let mut out = vec![DrawCommand::Clear {
        width: canvas.width as f64,
        height: canvas.height as f64,
    }];

    push_grid(&mut out, input);
    for (id, series) in input.visible() {
        push_series_path(&mut out, input, series, input.palette.series(id));
    }
    for (id, series) in input.visible() {
        push_sparkles(&mut out, input, series, input.palette.series(id));
    }
    push_date_ticks(&mut out, input);
    if let Some(hover) = input.hover {
        push_hover(&mut out, input, hover.clamp(0.0, 1.0));
    }
    out
}

fn push_grid(out: &mut Vec<DrawCommand>, input: &FrameInput<'_>) {
    let w = input.canvas.width as f64;
    let h = input.canvas.height as f64;
    let width = input.px(1.0);
    for r in 0..=GRID_ROWS {
        let y = (r as f64 / GRID_ROWS as f64) * h;
        out.push(DrawCommand::Line {
            from: Point::new(0.0, y),
            to: Point::new(w, y),
            color: input.palette.grid,
            width,
        });
    }
}

fn push_series_path(
    out: &mut Vec<DrawCommand>,
    input: &FrameInput<'_>,
    series: &[f64],
    style: &SeriesStyle,
) {
    if series.is_empty() {
        return;
    }
    let width = input.canvas.width as usize;
    let phase = scroll_phase(input.time);
    let points: Vec<Point> = (0..width)
        .map(|i| Point::new(i as f64, input.y_for(value_at_pixel(series, i, width, phase))))
        .collect();

    out.push(DrawCommand::Polyline {
        points: points.clone(),
        color: style.line,
        width: input.px(1.5),
    });
    out.push(DrawCommand::Polyline {
        points,
        color: style.glow.with_alpha(glow_alpha(input.display.speed_factor)),
        width: input.px(4.0),
    });
}

fn push_sparkles(
    out: &mut Vec<DrawCommand>,
    input: &FrameInput<'_>,
    series: &[f64],
    style: &SeriesStyle,
) {
    if series.is_empty() {
        return;
    }
    let span = (series.len() - 1) as f64;
    let w = input.canvas.width as f64;
    let radius = input.px(1.5);
    for p in sparkle_positions(input.time) {
        let v = value_at_index(series, p * span);
        out.push(DrawCommand::Circle {
            center: Point::new((p * w).floor(), input.y_for(v)),
            radius,
            color: style.sparkle,
        });
    }
}

fn push_date_ticks(out: &mut Vec<DrawCommand>, input: &FrameInput<'_>) {
    let dates = input.dates;
    if dates.is_empty() {
        return;
    }
    let w = input.canvas.width as f64;
    let h = input.canvas.height as f64;
    let denom = dates.len().saturating_sub(1).max(1) as f64;
    let tick_len = input.px(8.0);
    let label_lift = input.px(12.0);
    let font = input.px(10.0);

    for i in (0..dates.len()).step_by(TICK_STEP) {
        let x = ((i as f64 / denom) * w).floor();
        out.push(DrawCommand::Line {
            from: Point::new(x, h - 1.0),
            to: Point::new(x, h - tick_len),
            color: input.palette.grid,
            width: input.px(1.0),
        });
        out.push(DrawCommand::Text {
            position: Point::new(x, h - label_lift),
            content: month_day_label(&dates[i]),
            color: input.palette.tick_label,
            size_px: font,
            anchor: TextAnchor::Center,
        });
    }
}

fn push_hover(out: &mut Vec<DrawCommand>, input: &FrameInput<'_>, hover: f64) {
    let w = input.canvas.width as f64;
    let h = input.canvas.height as f64;
    let x = hover * w;
    let palette = input.palette;

    out.push(DrawCommand::Line {
        from: Point::new(x, 0.0),
        to: Point::new(x, h),
        color: palette.guide,
        width: input.px(1.0),
    });

    let mut lines = Vec::new();
    if let Some(idx) = date_index(input.dates.len(), hover) {
        lines.push(input.dates[idx].clone());
    }
    for (id, series) in input.visible() {
        if series.is_empty() {
            continue;
        }
        let style = palette.series(id);
        let v = value_at_normalized(series, hover);
        out.push(DrawCommand::Circle {
            center: Point::new(x, input.y_for(v)),
            radius: input.px(2.0),
            color: style.hover_dot,
        });
        lines.push(format!("{}: {}", style.label, v.round()));
    }
    if lines.is_empty() {
        return;
    }

    let font = input.px(11.0);
    let widest_of = |lines: &[String]| {
        lines
            .iter()
            .map(|l| estimate_text_width_px(l, font))
            .fold(0.0, f64::max)
    };
    let mut widest = widest_of(&lines);
    // clip lines that would push the box past the canvas edges
    let max_text = w - 2.0 * TOOLTIP_MARGIN - TOOLTIP_PADDING;
    if widest > max_text && max_text > 0.0 {
        lines = lines
            .iter()
            .map(|l| truncate_to_width(l, font, max_text))
            .collect();
        widest = widest_of(&lines);
    }
    let box_w = TOOLTIP_MIN_WIDTH.max(widest + TOOLTIP_PADDING);
    let box_h = TOOLTIP_LINE_H * lines.len() as f64 + 10.0;
    let bx = tooltip_x(w, box_w, x);
    let by = TOOLTIP_TOP;

    out.push(DrawCommand::Rect {
        origin: Point::new(bx, by),
        width: box_w,
        height: box_h,
        fill: palette.tooltip_fill,
        stroke: Some((palette.tooltip_border, input.px(1.0))),
    });
    for (i, content) in lines.into_iter().enumerate() {
        out.push(DrawCommand::Text {
            position: Point::new(bx + 8.0, by + 18.0 + i as f64 * TOOLTIP_LINE_H),
            content,
            color: palette.tooltip_text,
            size_px: font,
            anchor: TextAnchor::Start,
        });
    }
}

//! Paints [`DrawCommand`]s with an egui painter.
//!
//! Commands are in backing-store pixels; egui works in points. Dividing by
//! the chart's device pixel ratio maps one onto the other.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, pos2, vec2};

use crate::scene::{DrawCommand, Point, Rgba, TextAnchor};

pub fn to_color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.alpha_u8())
}

/// Draw `commands` inside `rect`. `Clear` fills `rect` with `background`.
pub fn paint_commands(
    painter: &Painter,
    rect: Rect,
    commands: &[DrawCommand],
    device_pixel_ratio: f64,
    background: Color32,
) {
    let scale = if device_pixel_ratio > 0.0 {
        device_pixel_ratio as f32
    } else {
        1.0
    };
    let to_screen = |p: Point| -> Pos2 { rect.min + vec2(p.x as f32 / scale, p.y as f32 / scale) };
    let len = |v: f64| v as f32 / scale;

    let painter = painter.with_clip_rect(rect);
    for cmd in commands {
        match cmd {
            DrawCommand::Clear { .. } => {
                painter.rect_filled(rect, 0.0, background);
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                painter.line_segment(
                    [to_screen(*from), to_screen(*to)],
                    Stroke::new(len(*width), to_color32(*color)),
                );
            }
            DrawCommand::Polyline {
                points,
                color,
                width,
            } => {
                let pts: Vec<Pos2> = points.iter().copied().map(to_screen).collect();
                painter.add(Shape::line(pts, Stroke::new(len(*width), to_color32(*color))));
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(to_screen(*center), len(*radius), to_color32(*color));
            }
            DrawCommand::Rect {
                origin,
                width,
                height,
                fill,
                stroke,
            } => {
                let min = to_screen(*origin);
                let r = Rect::from_min_size(min, vec2(len(*width), len(*height)));
                painter.rect_filled(r, 0.0, to_color32(*fill));
                if let Some((c, w)) = stroke {
                    painter.rect_stroke(r, 0.0, Stroke::new(len(*w), to_color32(*c)));
                }
            }
            DrawCommand::Text {
                position,
                content,
                color,
                size_px,
                anchor,
            } => {
                let align = match anchor {
                    TextAnchor::Start => Align2::LEFT_BOTTOM,
                    TextAnchor::Center => Align2::CENTER_BOTTOM,
                };
                painter.text(
                    to_screen(*position),
                    align,
                    content,
                    FontId::proportional(len(*size_px)),
                    to_color32(*color),
                );
            }
        }
    }
}

/// Full-width band of `rect`, `top` points below its upper edge.
pub fn strip(rect: Rect, top: f32, height: f32) -> Rect {
    Rect::from_min_size(pos2(rect.min.x, rect.min.y + top), vec2(rect.width(), height))
}

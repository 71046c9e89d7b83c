//! Replays [`DrawCommand`]s onto a plotters drawing area (SVG or bitmap).

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::scene::{DrawCommand, Point, Rgba, TextAnchor};

fn color(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a.clamp(0.0, 1.0))
}

fn coord(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn stroke_px(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

/// Draw `commands` onto `area`. `Clear` fills the area with `background`.
///
/// Text that cannot be drawn (no font registered for the bitmap path) is
/// skipped. Returns the number of skipped labels.
pub fn draw_commands<DB>(
    area: &DrawingArea<DB, Shift>,
    commands: &[DrawCommand],
    background: Rgba,
) -> Result<usize>
where
    DB: DrawingBackend,
{
    let mut skipped_text = 0usize;
    for cmd in commands {
        match cmd {
            DrawCommand::Clear { .. } => {
                area.fill(&color(background))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            DrawCommand::Line {
                from,
                to,
                color: c,
                width,
            } => {
                area.draw(&PathElement::new(
                    vec![coord(*from), coord(*to)],
                    color(*c).stroke_width(stroke_px(*width)),
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
            }
            DrawCommand::Polyline {
                points,
                color: c,
                width,
            } => {
                if points.len() < 2 {
                    continue;
                }
                let path: Vec<(i32, i32)> = points.iter().copied().map(coord).collect();
                area.draw(&PathElement::new(
                    path,
                    color(*c).stroke_width(stroke_px(*width)),
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
            }
            DrawCommand::Circle {
                center,
                radius,
                color: c,
            } => {
                let r = radius.round().max(1.0) as i32;
                area.draw(&Circle::new(coord(*center), r, color(*c).filled()))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            DrawCommand::Rect {
                origin,
                width,
                height,
                fill,
                stroke,
            } => {
                let corners = [
                    coord(*origin),
                    coord(Point::new(origin.x + width, origin.y + height)),
                ];
                area.draw(&Rectangle::new(corners, color(*fill).filled()))
                    .map_err(|e| anyhow!("{:?}", e))?;
                if let Some((c, w)) = stroke {
                    area.draw(&Rectangle::new(
                        corners,
                        color(*c).stroke_width(stroke_px(*w)),
                    ))
                    .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
            DrawCommand::Text {
                position,
                content,
                color: c,
                size_px,
                anchor,
            } => {
                let h = match anchor {
                    TextAnchor::Start => HPos::Left,
                    TextAnchor::Center => HPos::Center,
                };
                let text_color = color(*c);
                let style = TextStyle::from((FontFamily::SansSerif, *size_px))
                    .color(&text_color)
                    .pos(Pos::new(h, VPos::Bottom));
                if let Err(e) = area.draw(&Text::new(content.as_str(), coord(*position), style)) {
                    log::debug!("skipping label {content:?}: {e:?}");
                    skipped_text += 1;
                }
            }
        }
    }
    Ok(skipped_text)
}

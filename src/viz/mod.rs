//! Snapshot export and live painting of chart frames.
//!
//! - [`snapshot`] renders one frame (optionally with the wave strip above
//!   it) into draw commands without any host.
//! - [`export_snapshot`] writes it to **SVG** or **PNG**, chosen by the file
//!   extension.
//! - `egui_backend` paints the same commands in the desktop viewer.
//!
//! Bitmap text needs a registered font because `ab_glyph` does not discover
//! OS fonts. [`register_font_file`] loads one explicitly; otherwise a few
//! common system locations are tried once. Labels that still cannot be
//! drawn are skipped.

pub mod egui_backend;
pub mod plotters_backend;

use std::path::Path;
use std::sync::Once;

use anyhow::{Context, Result, anyhow, bail};
use plotters::prelude::*;
use plotters::style::FontStyle;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use crate::config::ChartOptions;
use crate::models::ChartData;
use crate::preprocess::preprocess;
use crate::scene::{CanvasSize, DrawCommand, FrameInput, Rgba, render_frame};
use crate::wave::{DEFAULT_WAVE_HEIGHT_PX, render_wave};

/// Page background used for snapshots.
pub const DEFAULT_BACKGROUND: Rgba = Rgba::opaque(12, 10, 20);

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static INIT_FONTS: Once = Once::new();

/// Register a TTF/OTF file as the `sans-serif` family for bitmap text.
pub fn register_font_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("read font {}", path.display()))?;
    // plotters keeps a &'static reference for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("invalid font {}", path.display()))?;
    log::debug!("registered font {}", path.display());
    Ok(())
}

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        for candidate in SYSTEM_FONTS {
            if Path::new(candidate).is_file() && register_font_file(candidate).is_ok() {
                return;
            }
        }
        log::debug!("no system font found; bitmap labels may be skipped");
    });
}

/// What to draw in a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotRequest<'a> {
    pub data: &'a ChartData,
    pub options: &'a ChartOptions,
    /// Container width in logical pixels.
    pub css_width: f64,
    /// Clock time of the frame.
    pub time: f64,
    /// Normalized hover position, if any.
    pub hover: Option<f64>,
}

/// One rendered frame, laid out top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub width: u32,
    /// Wave strip commands and their band height, when enabled.
    pub wave: Option<(Vec<DrawCommand>, u32)>,
    pub chart: Vec<DrawCommand>,
    pub chart_height: u32,
}

impl Snapshot {
    pub fn height(&self) -> u32 {
        self.chart_height + self.wave.as_ref().map_or(0, |(_, h)| *h)
    }
}

/// Render a frame without a host.
pub fn snapshot(req: &SnapshotRequest<'_>) -> Snapshot {
    let display = req.options.display_state();
    let prepared = preprocess(req.data, &display);
    let canvas = CanvasSize::new(
        req.css_width,
        display.height_px as f64,
        req.options.device_pixel_ratio,
    );
    let palette = req.options.palette();
    let chart = render_frame(&FrameInput {
        prepared: &prepared,
        dates: &req.data.dates,
        display: &display,
        hover: req.hover,
        time: req.time,
        canvas,
        palette: &palette,
    });
    let wave = req.options.wave.then(|| {
        let height = (DEFAULT_WAVE_HEIGHT_PX as f64 * canvas.dpr).round() as u32;
        (render_wave(canvas.width, height, req.time, canvas.dpr), height)
    });
    Snapshot {
        width: canvas.width,
        wave,
        chart,
        chart_height: canvas.height,
    }
}

/// Write a snapshot to `out_path`; `.svg` selects SVG, anything else PNG.
pub fn export_snapshot<P: AsRef<Path>>(
    snap: &Snapshot,
    out_path: P,
    background: Rgba,
) -> Result<()> {
    if snap.width == 0 || snap.chart_height == 0 {
        bail!("nothing to draw: canvas is {}x{}", snap.width, snap.chart_height);
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (snap.width, snap.height());

    let skipped = if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        let skipped = draw_snapshot(&root, snap, background)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
        skipped
    } else {
        ensure_fonts_registered();
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        let skipped = draw_snapshot(&root, snap, background)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
        skipped
    };
    if skipped > 0 {
        log::warn!(
            "{skipped} label(s) skipped in {}; pass a font to draw them",
            out_path.display()
        );
    }
    Ok(())
}

fn draw_snapshot<DB>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    snap: &Snapshot,
    background: Rgba,
) -> Result<usize>
where
    DB: plotters::backend::DrawingBackend,
{
    match &snap.wave {
        Some((wave, wave_h)) => {
            let (top, bottom) = root.split_vertically(*wave_h as i32);
            let a = plotters_backend::draw_commands(&top, wave, background)?;
            let b = plotters_backend::draw_commands(&bottom, &snap.chart, background)?;
            Ok(a + b)
        }
        None => plotters_backend::draw_commands(root, &snap.chart, background),
    }
}

/// Render and export in one step.
pub fn export_frame<P: AsRef<Path>>(req: &SnapshotRequest<'_>, out_path: P) -> Result<()> {
    export_snapshot(&snapshot(req), out_path, DEFAULT_BACKGROUND)
}

//! Decorative three-layer sine strip shown above the activity chart.
//!
//! Carries no data. Each layer is `y = h/2 + sin(x * freq + 3t) * amp`.

use crate::clock::AnimationClock;
use crate::scene::{DrawCommand, Point, Rgba};

pub const DEFAULT_WAVE_SPEED: f64 = 0.015;
pub const DEFAULT_WAVE_HEIGHT_PX: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveLayer {
    pub amplitude: f64,
    pub frequency: f64,
    pub color: Rgba,
}

/// Teal, cyan and pink, back to front.
pub const LAYERS: [WaveLayer; 3] = [
    WaveLayer {
        amplitude: 16.0,
        frequency: 0.012,
        color: Rgba::new(0, 255, 136, 0.35),
    },
    WaveLayer {
        amplitude: 12.0,
        frequency: 0.018,
        color: Rgba::new(0, 204, 255, 0.28),
    },
    WaveLayer {
        amplitude: 22.0,
        frequency: 0.009,
        color: Rgba::new(255, 0, 128, 0.18),
    },
];

/// Draw the strip at time `t` onto a `width` x `height` pixel canvas.
///
/// `scale` is the device pixel ratio of that canvas: the wave keeps its
/// logical wavelength, amplitude and stroke at any ratio.
pub fn render_wave(width: u32, height: u32, t: f64, scale: f64) -> Vec<DrawCommand> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let mid = height as f64 / 2.0;
    let mut out = Vec::with_capacity(LAYERS.len() + 1);
    out.push(DrawCommand::Clear {
        width: width as f64,
        height: height as f64,
    });
    for layer in &LAYERS {
        let points = (0..width)
            .map(|x| {
                let x = x as f64;
                let phase = (x / scale) * layer.frequency + t * 3.0;
                Point::new(x, mid + phase.sin() * layer.amplitude * scale)
            })
            .collect();
        out.push(DrawCommand::Polyline {
            points,
            color: layer.color,
            width: 2.0 * scale,
        });
    }
    out
}

/// A wave strip with its own clock.
#[derive(Debug, Clone)]
pub struct WaveStrip {
    clock: AnimationClock,
    speed: f64,
    pub height_px: u32,
}

impl Default for WaveStrip {
    fn default() -> Self {
        Self::new(DEFAULT_WAVE_SPEED, DEFAULT_WAVE_HEIGHT_PX)
    }
}

impl WaveStrip {
    pub fn new(speed: f64, height_px: u32) -> Self {
        Self {
            clock: AnimationClock::new(),
            speed: if speed.is_finite() { speed } else { DEFAULT_WAVE_SPEED },
            height_px,
        }
    }

    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    /// Advance one frame, then draw it.
    pub fn next_frame(&mut self, width: u32) -> Vec<DrawCommand> {
        self.clock.advance_by(self.speed);
        render_wave(width, self.height_px, self.clock.time(), 1.0)
    }
}

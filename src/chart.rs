//! The live chart component.
//!
//! A [`LiveChart`] owns everything one chart instance needs: the caller's
//! data and display state, the prepared series, its clock, hover position
//! and canvas size. The host drives it:
//!
//! 1. [`LiveChart::mount`] subscribes to resizes and requests the first frame.
//! 2. [`LiveChart::on_frame`] draws the due frame, schedules the next one and
//!    advances the clock.
//! 3. [`LiveChart::dispose`] cancels the pending frame and unsubscribes.
//!
//! Dropping a mounted chart disposes it.

use crate::clock::{AnimationClock, FrameToken, Host, Subscription};
use crate::config::ChartOptions;
use crate::interaction::{ChartListener, HoverState, NoopListener, Toggle, ToggleMode};
use crate::models::{ChartData, ChartMode, DisplayState, SeriesId};
use crate::preprocess::{PreparedSeries, preprocess};
use crate::scene::{CanvasSize, DrawCommand, FrameInput, Palette, render_frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, not mounted yet.
    Idle,
    /// Mounted with a pending frame and a resize subscription.
    Running {
        frame: FrameToken,
        resize: Subscription,
    },
    /// Mounted on a host without a drawing context. Nothing is scheduled.
    Inert,
    Disposed,
}

pub struct LiveChart<H: Host, L: ChartListener = NoopListener> {
    host: H,
    listener: L,
    data: ChartData,
    display: DisplayState,
    toggles: ToggleMode,
    prepared: PreparedSeries,
    palette: Palette,
    clock: AnimationClock,
    hover: HoverState,
    css_width: f64,
    device_pixel_ratio: f64,
    canvas: CanvasSize,
    state: Lifecycle,
    frames_drawn: u64,
}

impl<H: Host> LiveChart<H, NoopListener> {
    /// Chart without callbacks. Toggles are uncontrolled so the overlay
    /// still works on its own.
    pub fn standalone(host: H, data: ChartData) -> Self {
        let options = ChartOptions {
            toggles: ToggleMode::Uncontrolled,
            ..ChartOptions::default()
        };
        Self::new(host, NoopListener, data, &options)
    }
}

impl<H: Host, L: ChartListener> LiveChart<H, L> {
    pub fn new(host: H, listener: L, data: ChartData, options: &ChartOptions) -> Self {
        let display = options.display_state();
        let prepared = preprocess(&data, &display);
        let dpr = options.device_pixel_ratio;
        Self {
            host,
            listener,
            data,
            display,
            toggles: options.toggles,
            prepared,
            palette: options.palette(),
            clock: AnimationClock::new(),
            hover: HoverState::new(),
            css_width: 0.0,
            device_pixel_ratio: dpr,
            canvas: CanvasSize::new(0.0, display.height_px as f64, dpr),
            state: Lifecycle::Idle,
            frames_drawn: 0,
        }
    }

    /// Attach to the host at the given container width.
    ///
    /// Returns `false` when the host has no drawing context; the chart then
    /// stays inert and schedules nothing. Mounting twice is a no-op.
    pub fn mount(&mut self, css_width: f64, device_pixel_ratio: f64) -> bool {
        match self.state {
            Lifecycle::Running { .. } => return true,
            Lifecycle::Inert => return false,
            Lifecycle::Disposed => {
                log::warn!("mount called on a disposed chart");
                return false;
            }
            Lifecycle::Idle => {}
        }
        if !self.host.context_available() {
            log::debug!("no drawing context, chart stays inert");
            self.state = Lifecycle::Inert;
            return false;
        }
        self.resize(css_width, device_pixel_ratio);
        let resize = self.host.subscribe_resize();
        let frame = self.host.request_frame();
        self.state = Lifecycle::Running { frame, resize };
        log::debug!(
            "chart mounted at {}x{} px (dpr {})",
            self.canvas.width,
            self.canvas.height,
            self.canvas.dpr
        );
        true
    }

    /// Host callback for a due frame.
    ///
    /// Returns the commands for this frame, or `None` when `token` is not the
    /// pending frame (stale, cancelled, or the chart is not running).
    pub fn on_frame(&mut self, token: FrameToken) -> Option<Vec<DrawCommand>> {
        let Lifecycle::Running { frame, resize } = self.state else {
            return None;
        };
        if frame != token {
            log::debug!("ignoring stale frame {:?}", token);
            return None;
        }
        let commands = self.render();
        let next = self.host.request_frame();
        self.state = Lifecycle::Running {
            frame: next,
            resize,
        };
        self.clock.advance(self.display.speed_factor);
        self.frames_drawn += 1;
        Some(commands)
    }

    /// Draw the current state without touching the clock or the schedule.
    pub fn render(&self) -> Vec<DrawCommand> {
        render_frame(&FrameInput {
            prepared: &self.prepared,
            dates: &self.data.dates,
            display: &self.display,
            hover: self.hover.position(),
            time: self.clock.time(),
            canvas: self.canvas,
            palette: &self.palette,
        })
    }

    /// Recompute canvas sizes for a new container width or pixel ratio.
    pub fn resize(&mut self, css_width: f64, device_pixel_ratio: f64) {
        self.css_width = css_width;
        self.device_pixel_ratio = device_pixel_ratio;
        self.canvas = CanvasSize::new(
            css_width,
            self.display.height_px as f64,
            device_pixel_ratio,
        );
        log::debug!(
            "canvas resized to {}x{} backing px",
            self.canvas.width,
            self.canvas.height
        );
    }

    /// Cancel the pending frame and drop the resize subscription. Safe to
    /// call more than once.
    pub fn dispose(&mut self) {
        if let Lifecycle::Running { frame, resize } = self.state {
            self.host.cancel_frame(frame);
            self.host.unsubscribe_resize(resize);
            log::debug!("chart disposed after {} frames", self.frames_drawn);
        }
        self.state = Lifecycle::Disposed;
    }

    /// Replace the input data. The source arrays are kept as given.
    pub fn set_data(&mut self, data: ChartData) {
        self.data = data;
        self.prepared = preprocess(&self.data, &self.display);
    }

    /// Push new caller-owned display state (controlled use).
    pub fn set_display(&mut self, display: DisplayState) {
        let display = display.sanitized();
        let height_changed = display.height_px != self.display.height_px;
        self.display = display;
        self.prepared = preprocess(&self.data, &self.display);
        if height_changed {
            self.resize(self.css_width, self.device_pixel_ratio);
        }
    }

    pub fn pointer_move(&mut self, client_x: f64, rect_left: f64, rect_width: f64) {
        let x = self.hover.pointer_move(client_x, rect_left, rect_width);
        self.listener.on_hover(Some(x));
    }

    /// Hover at an already normalized position.
    pub fn hover_at(&mut self, x01: Option<f64>) {
        self.hover.set(x01);
        self.listener.on_hover(self.hover.position());
    }

    pub fn pointer_leave(&mut self) {
        self.hover.pointer_leave();
        self.listener.on_hover(None);
    }

    /// Resolve the date under the cursor and report it. Returns the clicked
    /// index, or `None` without a hover position or dates.
    pub fn click(&mut self) -> Option<usize> {
        let (idx, date) = self.hover.resolve_date(&self.data.dates)?;
        self.listener.on_date_click(idx, date);
        Some(idx)
    }

    /// An overlay checkbox changed to `checked`.
    ///
    /// The overlay only exists in dual mode, so single-mode charts ignore
    /// toggles and return `false`. Controlled charts only report the
    /// change; the caller answers with [`LiveChart::set_display`].
    pub fn toggle(&mut self, toggle: Toggle, checked: bool) -> bool {
        if self.mode() != ChartMode::Dual {
            return false;
        }
        if self.toggles == ToggleMode::Uncontrolled {
            let mut display = self.display;
            match toggle {
                Toggle::Series(id) => display.set_visible(id, checked),
                Toggle::Smoothing => display.smoothing_enabled = checked,
            }
            self.set_display(display);
        }
        match toggle {
            Toggle::Series(id) => self.listener.on_toggle_series(id, checked),
            Toggle::Smoothing => self.listener.on_toggle_smoothing(checked),
        }
        true
    }

    /// State of each overlay checkbox, or `None` in single mode.
    pub fn overlay(&self) -> Option<[(Toggle, bool); 3]> {
        (self.mode() == ChartMode::Dual).then(|| {
            [
                (
                    Toggle::Series(SeriesId::A),
                    self.display.show_series_a,
                ),
                (
                    Toggle::Series(SeriesId::B),
                    self.display.show_series_b,
                ),
                (Toggle::Smoothing, self.display.smoothing_enabled),
            ]
        })
    }

    pub fn mode(&self) -> ChartMode {
        self.data.mode()
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn prepared(&self) -> &PreparedSeries {
        &self.prepared
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn hover(&self) -> Option<f64> {
        self.hover.position()
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}

impl<H: Host, L: ChartListener> Drop for LiveChart<H, L> {
    fn drop(&mut self) {
        self.dispose();
    }
}

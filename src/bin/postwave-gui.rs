/*!
 * Desktop viewer for postwave charts.
 *
 * - Load a chart JSON file or fetch series from the dashboard backend
 * - Live scrolling chart with the wave strip above it
 * - Series and smoothing toggles, speed slider, hover tooltip
 * - Click a day to select it; export the current frame as PNG or SVG
 */

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Result;
use eframe::egui;
use postwave::api::Client;
use postwave::clock::{FrameScheduler, FrameToken, Host, ResizeNotifier, Subscription};
use postwave::interaction::{ChartEvent, EventQueue, Toggle};
use postwave::models::{Metric, Platform};
use postwave::viz::egui_backend::{paint_commands, strip, to_color32};
use postwave::viz::{self, DEFAULT_BACKGROUND, SnapshotRequest};
use postwave::wave::WaveStrip;
use postwave::{ChartData, ChartOptions, DisplayState, LiveChart, SeriesId, Settings, storage};

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let initial = std::env::args().nth(1).map(PathBuf::from);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 520.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("postwave"),
        ..Default::default()
    };

    eframe::run_native(
        "postwave",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc.egui_ctx.clone(), initial)))),
    )
}

/// Frame scheduling on top of egui's repaint requests. A requested frame is
/// due on the next `update`.
struct EguiHost {
    ctx: egui::Context,
    next_id: u64,
    pending: Option<FrameToken>,
    resize: Option<Subscription>,
}

impl EguiHost {
    fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            next_id: 0,
            pending: None,
            resize: None,
        }
    }

    fn take_due(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    fn wants_resize(&self) -> bool {
        self.resize.is_some()
    }
}

impl FrameScheduler for EguiHost {
    fn request_frame(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.pending = Some(token);
        self.ctx.request_repaint();
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}

impl ResizeNotifier for EguiHost {
    fn subscribe_resize(&mut self) -> Subscription {
        self.next_id += 1;
        let sub = Subscription(self.next_id);
        self.resize = Some(sub);
        sub
    }

    fn unsubscribe_resize(&mut self, sub: Subscription) {
        if self.resize == Some(sub) {
            self.resize = None;
        }
    }
}

impl Host for EguiHost {}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SnapshotFormat {
    Png,
    Svg,
}

impl SnapshotFormat {
    fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Png => "png",
            SnapshotFormat::Svg => "svg",
        }
    }
}

#[derive(Debug)]
enum LoadResult {
    Loaded(ChartData, String),
    Failed(String),
}

struct ViewerApp {
    chart: LiveChart<EguiHost, EventQueue>,
    /// Authoritative toggle state; the chart is controlled.
    display: DisplayState,
    wave: WaveStrip,
    show_wave: bool,
    commands: Vec<postwave::DrawCommand>,
    last_size: Option<(f32, f32)>,

    input_path: String,
    api_url: String,
    days: u32,
    metric: Metric,
    output_dir: String,
    snapshot_format: SnapshotFormat,

    selected_date: Option<String>,
    status_message: String,
    error_message: String,
    loader: Option<mpsc::Receiver<LoadResult>>,
}

impl ViewerApp {
    fn new(ctx: egui::Context, initial: Option<PathBuf>) -> Self {
        let options = ChartOptions::default();
        let display = options.display_state();
        let chart = LiveChart::new(
            EguiHost::new(ctx),
            EventQueue::new(),
            ChartData::default(),
            &options,
        );
        let output_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .to_string_lossy()
            .to_string();

        let mut app = Self {
            chart,
            display,
            wave: WaveStrip::default(),
            show_wave: true,
            commands: Vec::new(),
            last_size: None,
            input_path: String::new(),
            api_url: Settings::from_env().api_url,
            days: 30,
            metric: Metric::Posts,
            output_dir,
            snapshot_format: SnapshotFormat::Png,
            selected_date: None,
            status_message: String::new(),
            error_message: String::new(),
            loader: None,
        };
        if let Some(path) = initial {
            app.input_path = path.to_string_lossy().to_string();
            app.load_file();
        }
        app
    }

    fn spawn_load<F>(&mut self, message: &str, job: F)
    where
        F: FnOnce() -> LoadResult + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        self.loader = Some(receiver);
        self.status_message = message.to_string();
        self.error_message.clear();
        thread::spawn(move || {
            let _ = sender.send(job());
        });
    }

    fn load_file(&mut self) {
        let path = PathBuf::from(self.input_path.trim());
        self.spawn_load("Loading file...", move || match storage::load_json(&path) {
            Ok(data) => LoadResult::Loaded(data, format!("Loaded {}", path.display())),
            Err(e) => LoadResult::Failed(format!("Load failed: {e}")),
        });
    }

    fn fetch_api(&mut self) {
        let base = self.api_url.clone();
        let days = self.days;
        let metric = self.metric;
        self.spawn_load("Fetching from backend...", move || {
            let fetched = Client::new(&base).and_then(|client| {
                let ig = client.fetch_timeseries(Platform::Instagram, days)?;
                let yt = client.fetch_timeseries(Platform::Youtube, days)?;
                Ok((client.base_url.clone(), ig, yt))
            });
            match fetched {
                Ok((url, ig, yt)) => LoadResult::Loaded(
                    ChartData::from_platforms(&ig, &yt, metric),
                    format!("Fetched {days} days from {url}"),
                ),
                Err(e) => LoadResult::Failed(format!("Fetch failed: {e}")),
            }
        });
    }

    fn check_loader(&mut self) {
        if let Some(receiver) = &self.loader
            && let Ok(result) = receiver.try_recv()
        {
            self.loader = None;
            match result {
                LoadResult::Loaded(data, message) => {
                    self.chart.set_data(data);
                    self.selected_date = None;
                    self.status_message = message;
                }
                LoadResult::Failed(error) => {
                    self.error_message = error;
                    self.status_message.clear();
                }
            }
        }
    }

    /// Apply toggle and click events reported by the chart.
    fn handle_events(&mut self) {
        for event in self.chart.listener_mut().drain() {
            match event {
                ChartEvent::SeriesToggled { series, show } => {
                    self.display.set_visible(series, show);
                    self.chart.set_display(self.display);
                }
                ChartEvent::SmoothingToggled(enabled) => {
                    self.display.smoothing_enabled = enabled;
                    self.chart.set_display(self.display);
                }
                ChartEvent::DateClicked { index, date } => {
                    log::debug!("date {date} selected (index {index})");
                    self.selected_date = Some(date);
                }
                ChartEvent::Hover(_) => {}
            }
        }
    }

    fn export_snapshot(&mut self, device_pixel_ratio: f64) {
        let options = ChartOptions {
            height_px: self.display.height_px,
            speed_factor: self.display.speed_factor,
            show_series_a: self.display.show_series_a,
            show_series_b: self.display.show_series_b,
            smoothing: self.display.smoothing_enabled,
            device_pixel_ratio,
            wave: self.show_wave,
            ..ChartOptions::default()
        };
        let width = self.chart.canvas().css_width.max(1.0);
        let name = format!(
            "postwave-{}.{}",
            chrono::Local::now().format("%Y%m%d-%H%M%S"),
            self.snapshot_format.extension()
        );
        let path = PathBuf::from(self.output_dir.trim()).join(name);
        let req = SnapshotRequest {
            data: self.chart.data(),
            options: &options,
            css_width: width,
            time: self.chart.time(),
            hover: self.chart.hover(),
        };
        match viz::export_frame(&req, &path) {
            Ok(()) => {
                self.status_message = format!("Saved {}", path.display());
                self.error_message.clear();
            }
            Err(e) => self.error_message = format!("Export failed: {e:#}"),
        }
    }

    fn chart_ui(&mut self, ui: &mut egui::Ui) {
        let ppp = ui.ctx().pixels_per_point() as f64;
        let width = ui.available_width();
        let height = self.display.height_px as f32;
        let background = to_color32(DEFAULT_BACKGROUND);

        if self.show_wave {
            let wave_h = self.wave.height_px as f32;
            let (rect, _) = ui.allocate_exact_size(egui::vec2(width, wave_h), egui::Sense::hover());
            let cmds = self.wave.next_frame(width.max(0.0) as u32);
            paint_commands(ui.painter(), strip(rect, 0.0, wave_h), &cmds, 1.0, background);
        }

        if let Some(overlay) = self.chart.overlay() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // right to left, so the last checkbox is added first
                for (toggle, checked) in overlay.into_iter().rev() {
                    let label = match toggle {
                        Toggle::Series(SeriesId::A) => self.chart.palette().series_a.label.clone(),
                        Toggle::Series(SeriesId::B) => self.chart.palette().series_b.label.clone(),
                        Toggle::Smoothing => "Smooth".to_string(),
                    };
                    let mut value = checked;
                    if ui.checkbox(&mut value, label).changed() {
                        self.chart.toggle(toggle, value);
                    }
                }
            });
        }

        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());

        if self.last_size.is_none() {
            self.chart.mount(width as f64, ppp);
        } else if self.chart.host().wants_resize() && self.last_size != Some((width, ppp as f32)) {
            self.chart.resize(width as f64, ppp);
        }
        self.last_size = Some((width, ppp as f32));

        match response.hover_pos() {
            Some(pos) => self
                .chart
                .pointer_move(pos.x as f64, rect.left() as f64, rect.width() as f64),
            None if self.chart.hover().is_some() => self.chart.pointer_leave(),
            None => {}
        }
        if response.clicked() {
            self.chart.click();
        }

        if let Some(token) = self.chart.host_mut().take_due()
            && let Some(commands) = self.chart.on_frame(token)
        {
            self.commands = commands;
        }
        paint_commands(ui.painter(), rect, &self.commands, self.chart.canvas().dpr, background);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_loader();
        self.handle_events();

        if self.loader.is_some() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Posting activity");
            ui.add_space(6.0);

            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label("File:");
                    ui.text_edit_singleline(&mut self.input_path);
                    if ui.button("Browse").clicked()
                        && let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .pick_file()
                    {
                        self.input_path = path.to_string_lossy().to_string();
                    }
                    if ui.button("Load").clicked() && !self.input_path.trim().is_empty() {
                        self.load_file();
                    }
                });
                ui.horizontal(|ui| {
                    ui.label("Backend:");
                    ui.text_edit_singleline(&mut self.api_url);
                    ui.add(egui::DragValue::new(&mut self.days).range(1..=365).suffix(" days"));
                    egui::ComboBox::from_id_salt("metric")
                        .selected_text(format!("{:?}", self.metric))
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.metric, Metric::Posts, "Posts");
                            ui.selectable_value(&mut self.metric, Metric::Likes, "Likes");
                            ui.selectable_value(&mut self.metric, Metric::Comments, "Comments");
                        });
                    if ui.button("Fetch").clicked() {
                        self.fetch_api();
                    }
                });
            });

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let mut speed = self.display.speed_factor;
                if ui
                    .add(egui::Slider::new(&mut speed, 0.5..=3.0).text("speed"))
                    .changed()
                {
                    self.display.speed_factor = speed;
                    self.chart.set_display(self.display);
                }
                ui.checkbox(&mut self.show_wave, "Wave");
            });

            ui.add_space(6.0);
            self.chart_ui(ui);

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Export to:");
                ui.text_edit_singleline(&mut self.output_dir);
                if ui.button("Browse").clicked()
                    && let Some(path) = rfd::FileDialog::new().pick_folder()
                {
                    self.output_dir = path.to_string_lossy().to_string();
                }
                ui.radio_value(&mut self.snapshot_format, SnapshotFormat::Png, "PNG");
                ui.radio_value(&mut self.snapshot_format, SnapshotFormat::Svg, "SVG");
                if ui.button("Save frame").clicked() {
                    let ppp = ui.ctx().pixels_per_point() as f64;
                    self.export_snapshot(ppp);
                }
            });

            ui.add_space(4.0);
            if let Some(date) = &self.selected_date {
                ui.label(format!("Selected day: {date}"));
            }
            if self.loader.is_some() {
                ui.spinner();
            }
            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            }
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
        });
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Days, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use postwave::api::Client;
use postwave::models::{Metric, Platform};
use postwave::preprocess::preprocess;
use postwave::resample::{date_index, value_at_normalized};
use postwave::viz::{self, SnapshotRequest};
use postwave::{ChartData, ChartMode, ChartOptions, SeriesId, Settings, stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "postwave",
    version,
    about = "Render, probe and summarize animated posting-activity charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one animation frame to .svg or .png.
    Render(RenderArgs),
    /// Report the date and values under a hover position.
    Probe(ProbeArgs),
    /// Print per-series summary statistics.
    Stats(StatsArgs),
    /// Write raw and smoothed series as CSV or JSON.
    Export(ExportArgs),
    /// Write a synthetic dual-series input file.
    Demo(DemoArgs),
    /// Download series from the dashboard backend into an input file.
    Fetch(FetchArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MetricArg {
    Posts,
    Likes,
    Comments,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Posts => Metric::Posts,
            MetricArg::Likes => Metric::Likes,
            MetricArg::Comments => Metric::Comments,
        }
    }
}

/// Display flags shared by the commands that draw or sample the chart.
#[derive(Args, Debug)]
struct DisplayArgs {
    /// Chart options JSON (camelCase keys); flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Apply the 7-sample moving average.
    #[arg(long, default_value_t = false)]
    smooth: bool,
    /// Hide series A.
    #[arg(long, default_value_t = false)]
    hide_a: bool,
    /// Hide series B.
    #[arg(long, default_value_t = false)]
    hide_b: bool,
    /// Scroll speed factor (effective range 0.5 to 3).
    #[arg(long)]
    speed: Option<f64>,
}

impl DisplayArgs {
    fn chart_options(&self) -> Result<ChartOptions> {
        let mut opts = match &self.options {
            Some(path) => ChartOptions::from_json_file(path)
                .with_context(|| format!("load options {}", path.display()))?,
            None => ChartOptions::default(),
        };
        if self.smooth {
            opts.smoothing = true;
        }
        if self.hide_a {
            opts.show_series_a = false;
        }
        if self.hide_b {
            opts.show_series_b = false;
        }
        if let Some(speed) = self.speed {
            opts.speed_factor = speed;
        }
        Ok(opts)
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input JSON (array, chart status object or chart data object).
    #[arg(short, long)]
    input: PathBuf,
    /// Output path (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    /// Container width in logical pixels.
    #[arg(long, default_value_t = 640.0)]
    width: f64,
    /// Chart height in logical pixels.
    #[arg(long)]
    height: Option<u32>,
    /// Device pixel ratio (capped at 2).
    #[arg(long)]
    dpr: Option<f64>,
    /// Clock time of the frame.
    #[arg(long, default_value_t = 0.0)]
    time: f64,
    /// Normalized hover position in [0, 1].
    #[arg(long)]
    hover: Option<f64>,
    /// Draw the decorative wave strip above the chart.
    #[arg(long, default_value_t = false)]
    wave: bool,
    /// TTF/OTF font for PNG labels.
    #[arg(long)]
    font: Option<PathBuf>,
    #[command(flatten)]
    display: DisplayArgs,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    #[arg(short, long)]
    input: PathBuf,
    /// Normalized hover position in [0, 1].
    #[arg(long)]
    at: f64,
    #[command(flatten)]
    display: DisplayArgs,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[arg(short, long)]
    input: PathBuf,
    /// Locale for digit grouping (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Print JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short, long)]
    out: PathBuf,
    /// Output format. If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct DemoArgs {
    #[arg(short, long)]
    out: PathBuf,
    /// Number of days.
    #[arg(long, default_value_t = 28)]
    days: u32,
    /// First date (YYYY-MM-DD).
    #[arg(long, default_value = "2024-05-01")]
    start: String,
}

#[derive(Args, Debug)]
struct FetchArgs {
    #[arg(short, long)]
    out: PathBuf,
    /// Base URL of the backend; defaults to $POSTWAVE_API_URL.
    #[arg(long)]
    api: Option<String>,
    /// Days of history per platform.
    #[arg(long, default_value_t = 30)]
    days: u32,
    #[arg(long, value_enum, default_value = "posts")]
    metric: MetricArg,
    /// Fetch the legacy single-series chart status instead.
    #[arg(long, default_value_t = false)]
    status: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            let s = format!("{:.2}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn load(path: &PathBuf) -> Result<ChartData> {
    storage::load_json(path).with_context(|| format!("load {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Probe(args) => cmd_probe(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Export(args) => cmd_export(args),
        Command::Demo(args) => cmd_demo(args),
        Command::Fetch(args) => cmd_fetch(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    if !(args.width.is_finite() && args.width >= 1.0) {
        bail!("--width must be at least 1");
    }
    let data = load(&args.input)?;
    let mut opts = args.display.chart_options()?;
    if let Some(h) = args.height {
        opts.height_px = h;
    }
    if let Some(dpr) = args.dpr {
        opts.device_pixel_ratio = dpr;
    }
    if args.wave {
        opts.wave = true;
    }
    if let Some(font) = &args.font {
        viz::register_font_file(font)?;
    }
    let req = SnapshotRequest {
        data: &data,
        options: &opts,
        css_width: args.width,
        time: args.time,
        hover: args.hover,
    };
    viz::export_frame(&req, &args.out)?;
    eprintln!("Wrote frame to {}", args.out.display());
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> Result<()> {
    if !(0.0..=1.0).contains(&args.at) {
        bail!("--at must be within [0, 1]");
    }
    let data = load(&args.input)?;
    let opts = args.display.chart_options()?;
    let display = opts.display_state();
    let prepared = preprocess(&data, &display);

    match date_index(data.dates.len(), args.at) {
        Some(i) => println!("date: {} (index {})", data.dates[i], i),
        None => println!("date: -"),
    }
    let slots = [
        (SeriesId::A, &opts.label_a, &prepared.a),
        (SeriesId::B, &opts.label_b, &prepared.b),
    ];
    for (id, label, series) in slots {
        if !display.is_visible(id) || series.is_empty() {
            continue;
        }
        let v = value_at_normalized(series, args.at);
        println!("{label}: {} ({})", v.round(), fmt_opt(Some(v)));
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> Result<()> {
    let data = load(&args.input)?;
    let defaults = ChartOptions::default();
    let summaries = stats::chart_summary(&data, &defaults.label_a, &defaults.label_b);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }
    let locale = stats::map_locale(&args.locale);
    let mode = match data.mode() {
        ChartMode::Dual => "dual",
        ChartMode::Single => "single",
    };
    println!("mode={} dates={}", mode, data.dates.len());
    for s in summaries {
        println!(
            "{}  count={} total={} min={} max={} mean={} median={} peak={}",
            s.label,
            s.count,
            stats::format_count(s.total, locale),
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median),
            s.peak_date.as_deref().unwrap_or("NA"),
        );
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let data = load(&args.input)?;
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv".to_string(),
        Some(OutFormat::Json) => "json".to_string(),
        None => args
            .out
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_ascii_lowercase(),
    };
    match fmt.as_str() {
        "csv" => storage::save_csv(&data, &args.out)?,
        "json" => storage::save_json(&data, &args.out)?,
        other => bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", storage::series_table(&data).len(), args.out.display());
    Ok(())
}

fn demo_data(start: NaiveDate, days: u32) -> Result<ChartData> {
    let mut a = Vec::with_capacity(days as usize);
    let mut b = Vec::with_capacity(days as usize);
    let mut dates = Vec::with_capacity(days as usize);
    for i in 0..days {
        let day = start
            .checked_add_days(Days::new(i as u64))
            .context("date out of range")?;
        let x = i as f64;
        a.push((20.0 + 12.0 * (x * 0.45).sin() + (i % 5) as f64 * 2.0).round().max(0.0));
        b.push((14.0 + 9.0 * (x * 0.3).cos() + (i % 3) as f64 * 3.0).round().max(0.0));
        dates.push(day.format("%Y-%m-%d").to_string());
    }
    Ok(ChartData::dual(a, b, dates))
}

fn cmd_demo(args: DemoArgs) -> Result<()> {
    let start = NaiveDate::parse_from_str(&args.start, "%Y-%m-%d")
        .with_context(|| format!("invalid --start {:?}, expected YYYY-MM-DD", args.start))?;
    if args.days == 0 {
        bail!("--days must be at least 1");
    }
    let data = demo_data(start, args.days)?;
    storage::save_chart_json(&data, &args.out)?;
    eprintln!("Wrote {} days of demo data to {}", args.days, args.out.display());
    Ok(())
}

fn cmd_fetch(args: FetchArgs) -> Result<()> {
    let base = match &args.api {
        Some(url) => url.clone(),
        None => Settings::from_env().api_url,
    };
    let client = Client::new(&base)?;
    let data = if args.status {
        client.fetch_chart_status()?.into_chart_data()
    } else {
        let ig = client.fetch_timeseries(Platform::Instagram, args.days)?;
        let yt = client.fetch_timeseries(Platform::Youtube, args.days)?;
        ChartData::from_platforms(&ig, &yt, args.metric.into())
    };
    storage::save_chart_json(&data, &args.out)?;
    eprintln!("Saved series from {} to {}", client.base_url, args.out.display());
    Ok(())
}

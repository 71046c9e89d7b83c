use serde::{Deserialize, Serialize};

/// Which of the two chart series a value or toggle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesId {
    /// First series (Instagram in the dashboard).
    A,
    /// Second series (YouTube in the dashboard).
    B,
}

/// Whether the chart shows two toggleable series or a single legacy series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    Single,
    Dual,
}

/// Input data for one chart, as supplied by the caller.
///
/// Samples are in temporal order and are never re-sorted. `dates` is
/// index-aligned with the series and may be shorter, longer or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartData {
    #[serde(alias = "igSeries")]
    pub series_a: Vec<f64>,
    #[serde(alias = "ytSeries")]
    pub series_b: Vec<f64>,
    /// Legacy single-series input, used only when both A and B are empty.
    pub points: Vec<f64>,
    pub dates: Vec<String>,
}

impl ChartData {
    /// Dual-series data with shared date labels.
    pub fn dual(series_a: Vec<f64>, series_b: Vec<f64>, dates: Vec<String>) -> Self {
        Self {
            series_a,
            series_b,
            points: Vec::new(),
            dates,
        }
    }

    /// Legacy single-series data.
    pub fn single(points: Vec<f64>, dates: Vec<String>) -> Self {
        Self {
            points,
            dates,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ChartMode {
        if self.series_a.is_empty() && self.series_b.is_empty() {
            ChartMode::Single
        } else {
            ChartMode::Dual
        }
    }

    /// The series drawn in the "A" slot: series A in dual mode, `points` otherwise.
    pub fn effective_a(&self) -> &[f64] {
        match self.mode() {
            ChartMode::Dual => &self.series_a,
            ChartMode::Single => &self.points,
        }
    }

    /// The series drawn in the "B" slot. Always empty in single mode.
    pub fn effective_b(&self) -> &[f64] {
        match self.mode() {
            ChartMode::Dual => &self.series_b,
            ChartMode::Single => &[],
        }
    }

    /// Merge two platform timeseries into dual-mode data for the given metric.
    ///
    /// Dates are taken from whichever platform supplied more labels.
    pub fn from_platforms(
        ig: &PlatformTimeseries,
        yt: &PlatformTimeseries,
        metric: Metric,
    ) -> Self {
        let dates = if ig.dates.len() >= yt.dates.len() {
            ig.dates.clone()
        } else {
            yt.dates.clone()
        };
        Self::dual(
            ig.metric(metric).to_vec(),
            yt.metric(metric).to_vec(),
            dates,
        )
    }
}

/// Caller-owned display configuration. The renderer never persists it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayState {
    pub show_series_a: bool,
    pub show_series_b: bool,
    pub smoothing_enabled: bool,
    pub speed_factor: f64,
    pub height_px: u32,
}

pub const MIN_SPEED_FACTOR: f64 = 0.5;
pub const MAX_SPEED_FACTOR: f64 = 3.0;
pub const DEFAULT_HEIGHT_PX: u32 = 140;

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            show_series_a: true,
            show_series_b: true,
            smoothing_enabled: false,
            speed_factor: 1.0,
            height_px: DEFAULT_HEIGHT_PX,
        }
    }
}

impl DisplayState {
    /// Clamp the speed factor into the effective `[0.5, 3]` range and the
    /// height to at least one pixel. Non-finite speeds fall back to 1.0.
    pub fn sanitized(mut self) -> Self {
        self.speed_factor = if self.speed_factor.is_finite() {
            self.speed_factor.clamp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR)
        } else {
            1.0
        };
        self.height_px = self.height_px.max(1);
        self
    }

    pub fn is_visible(&self, id: SeriesId) -> bool {
        match id {
            SeriesId::A => self.show_series_a,
            SeriesId::B => self.show_series_b,
        }
    }

    pub fn set_visible(&mut self, id: SeriesId, show: bool) {
        match id {
            SeriesId::A => self.show_series_a = show,
            SeriesId::B => self.show_series_b = show,
        }
    }
}

/// Response of `GET /api/chart/status`. The backend has used both `series`
/// and `data` for the same array over time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStatus {
    pub series: Option<Vec<f64>>,
    pub data: Option<Vec<f64>>,
    pub dates: Option<Vec<String>>,
}

impl ChartStatus {
    pub fn samples(&self) -> &[f64] {
        self.series
            .as_deref()
            .or(self.data.as_deref())
            .unwrap_or(&[])
    }

    pub fn into_chart_data(self) -> ChartData {
        let points = self.samples().to_vec();
        ChartData::single(points, self.dates.unwrap_or_default())
    }
}

/// Per-platform analytics series for one time window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlatformTimeseries {
    pub dates: Vec<String>,
    pub post_counts: Vec<f64>,
    pub like_counts: Vec<f64>,
    pub comment_counts: Vec<f64>,
}

impl PlatformTimeseries {
    pub fn metric(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Posts => &self.post_counts,
            Metric::Likes => &self.like_counts,
            Metric::Comments => &self.comment_counts,
        }
    }
}

/// Which count to chart from a [`PlatformTimeseries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Posts,
    Likes,
    Comments,
}

/// Dashboard platforms served by the analytics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Youtube,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Youtube => "youtube",
        }
    }
}

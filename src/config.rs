//! Chart options with documented defaults, and environment settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::normalize_base_url;
use crate::error::{Error, Result};
use crate::interaction::ToggleMode;
use crate::models::{DEFAULT_HEIGHT_PX, DisplayState};
use crate::scene::Palette;

/// Environment variable holding the upstream API base URL.
pub const API_URL_ENV: &str = "POSTWAVE_API_URL";

/// Every optional chart property. Unset fields take the defaults below.
///
/// | field | default |
/// |---|---|
/// | `height_px` | 140 |
/// | `speed_factor` | 1.0 |
/// | `show_series_a` / `show_series_b` | true |
/// | `smoothing` | false |
/// | `toggles` | controlled |
/// | `label_a` / `label_b` | `IG` / `YT` |
/// | `device_pixel_ratio` | 1.0 |
/// | `wave` | false |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOptions {
    pub height_px: u32,
    pub speed_factor: f64,
    pub show_series_a: bool,
    pub show_series_b: bool,
    pub smoothing: bool,
    pub toggles: ToggleMode,
    pub label_a: String,
    pub label_b: String,
    pub device_pixel_ratio: f64,
    /// Draw the decorative wave strip above the chart.
    pub wave: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            height_px: DEFAULT_HEIGHT_PX,
            speed_factor: 1.0,
            show_series_a: true,
            show_series_b: true,
            smoothing: false,
            toggles: ToggleMode::Controlled,
            label_a: "IG".into(),
            label_b: "YT".into(),
            device_pixel_ratio: 1.0,
            wave: false,
        }
    }
}

impl ChartOptions {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Initial display state, sanitised.
    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            show_series_a: self.show_series_a,
            show_series_b: self.show_series_b,
            smoothing_enabled: self.smoothing,
            speed_factor: self.speed_factor,
            height_px: self.height_px,
        }
        .sanitized()
    }

    pub fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        palette.series_a.label = self.label_a.clone();
        palette.series_b.label = self.label_b.clone();
        palette
    }
}

/// Process-level settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(API_URL_ENV).ok().as_deref())
    }

    /// Settings from an explicit (possibly missing) URL value.
    pub fn from_value(api_url: Option<&str>) -> Self {
        Self {
            api_url: normalize_base_url(api_url.unwrap_or_default()),
        }
    }
}

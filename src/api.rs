//! Blocking client for the dashboard backend that supplies chart series.
//!
//! Two endpoints are used:
//! - `GET {base}/api/chart/status` returns a single legacy series under
//!   `series` or `data`, optionally with `dates`.
//! - `GET {base}/api/analytics/timeseries?platform=..&days=..` returns
//!   `{ dates, postCounts, likeCounts, commentCounts }` for one platform.
//!
//! Requests are made once. Retrying is left to the caller.
//!
//! ```no_run
//! # use postwave::api::Client;
//! # use postwave::models::{ChartData, Metric, Platform};
//! let client = Client::new("my-backend.example.com")?;
//! let ig = client.fetch_timeseries(Platform::Instagram, 30)?;
//! let yt = client.fetch_timeseries(Platform::Youtube, 30)?;
//! let data = ChartData::from_platforms(&ig, &yt, Metric::Posts);
//! # Ok::<(), postwave::Error>(())
//! ```

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::models::{ChartStatus, Platform, PlatformTimeseries};

/// Base URL used when nothing usable is configured.
pub const FALLBACK_BASE_URL: &str = "http://localhost:10000";

// Allow -, _, . unescaped in query values
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Clean up a configured base URL.
///
/// - takes the first token of a comma or whitespace separated list
/// - repairs `http//` and `https//`
/// - prefixes `https://` when no scheme is present
/// - strips trailing slashes
///
/// Empty input gives [`FALLBACK_BASE_URL`].
pub fn normalize_base_url(raw: &str) -> String {
    let Some(first) = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .find(|s| !s.is_empty())
    else {
        return FALLBACK_BASE_URL.to_string();
    };

    let lower = first.to_ascii_lowercase();
    let mut source = if lower.starts_with("http//") {
        format!("http://{}", &first[6..])
    } else if lower.starts_with("https//") {
        format!("https://{}", &first[7..])
    } else {
        first.to_string()
    };

    let lower = source.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        source = format!("https://{source}");
    }
    source.trim_end_matches('/').to_string()
}

/// Decode a chart status body.
pub fn parse_chart_status(body: &str) -> Result<ChartStatus> {
    Ok(serde_json::from_str(body)?)
}

/// Decode a platform timeseries body. Count arrays longer than `dates`
/// are accepted; the chart tolerates the mismatch.
pub fn parse_timeseries(body: &str) -> Result<PlatformTimeseries> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Client {
    /// Build a client for `base_url` (normalised first).
    pub fn new(base_url: &str) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("postwave/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: normalize_base_url(base_url),
            http,
        })
    }

    pub fn chart_status_url(&self) -> String {
        format!("{}/api/chart/status", self.base_url)
    }

    pub fn timeseries_url(&self, platform: Platform, days: u32) -> String {
        let platform = percent_encoding::utf8_percent_encode(platform.as_str(), SAFE);
        format!(
            "{}/api/analytics/timeseries?platform={}&days={}",
            self.base_url, platform, days
        )
    }

    pub fn fetch_chart_status(&self) -> Result<ChartStatus> {
        self.get_json(&self.chart_status_url())
    }

    pub fn fetch_timeseries(&self, platform: Platform, days: u32) -> Result<PlatformTimeseries> {
        if days == 0 {
            return Err(Error::InvalidInput("days must be at least 1".into()));
        }
        self.get_json(&self.timeseries_url(platform, days))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {url}");
        let resp = self.http.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text()?;
        serde_json::from_str(&body).map_err(|e| Error::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

//! Live API tests. Run with: `POSTWAVE_API_URL=... cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use postwave::api::Client;
use postwave::models::{ChartData, Metric, Platform};
use postwave::Settings;

fn client() -> Client {
    Client::new(&Settings::from_env().api_url).unwrap()
}

#[test]
fn fetch_week_of_posts() {
    let ts = client().fetch_timeseries(Platform::Instagram, 7).unwrap();
    assert!(ts.dates.len() <= 7);
    assert!(ts.metric(Metric::Posts).iter().all(|v| *v >= 0.0));
}

#[test]
fn both_platforms_merge() {
    let cli = client();
    let ig = cli.fetch_timeseries(Platform::Instagram, 14).unwrap();
    let yt = cli.fetch_timeseries(Platform::Youtube, 14).unwrap();
    let data = ChartData::from_platforms(&ig, &yt, Metric::Likes);
    assert!(data.series_a.len() <= 14);
}

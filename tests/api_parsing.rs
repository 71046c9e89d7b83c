use postwave::api::{
    Client, FALLBACK_BASE_URL, normalize_base_url, parse_chart_status, parse_timeseries,
};
use postwave::models::{ChartData, ChartMode, Metric, Platform};

#[test]
fn base_url_fallback_for_empty_input() {
    assert_eq!(normalize_base_url(""), FALLBACK_BASE_URL);
    assert_eq!(normalize_base_url("  , ,"), FALLBACK_BASE_URL);
}

#[test]
fn base_url_takes_first_token() {
    assert_eq!(
        normalize_base_url("https://a.example.com, https://b.example.com"),
        "https://a.example.com"
    );
    assert_eq!(normalize_base_url(" http://x.test  y.test"), "http://x.test");
}

#[test]
fn base_url_repairs_scheme() {
    assert_eq!(normalize_base_url("http//api.test"), "http://api.test");
    assert_eq!(normalize_base_url("HTTPS//api.test/"), "https://api.test");
    assert_eq!(normalize_base_url("api.test"), "https://api.test");
    assert_eq!(normalize_base_url("Http://api.test"), "Http://api.test");
}

#[test]
fn base_url_strips_trailing_slashes() {
    assert_eq!(normalize_base_url("https://api.test///"), "https://api.test");
    assert_eq!(normalize_base_url("https://api.test/v1/"), "https://api.test/v1");
}

#[test]
fn chart_status_accepts_series_or_data() {
    let s = parse_chart_status(r#"{"series": [1, 2, 3]}"#).unwrap();
    assert_eq!(s.samples(), &[1.0, 2.0, 3.0]);
    let d = parse_chart_status(r#"{"data": [4], "dates": ["2024-01-01"]}"#).unwrap();
    let data = d.into_chart_data();
    assert_eq!(data.mode(), ChartMode::Single);
    assert_eq!(data.points, vec![4.0]);
    assert_eq!(data.dates, vec!["2024-01-01".to_string()]);
    let none = parse_chart_status("{}").unwrap();
    assert!(none.samples().is_empty());
}

#[test]
fn chart_status_prefers_series_over_data() {
    let s = parse_chart_status(r#"{"series": [1], "data": [2]}"#).unwrap();
    assert_eq!(s.samples(), &[1.0]);
}

#[test]
fn timeseries_decodes_camel_case_counts() {
    let body = r#"{
        "dates": ["2024-02-01", "2024-02-02"],
        "postCounts": [3, 5],
        "likeCounts": [120, 98],
        "commentCounts": [4, 0]
    }"#;
    let ts = parse_timeseries(body).unwrap();
    assert_eq!(ts.metric(Metric::Posts), &[3.0, 5.0]);
    assert_eq!(ts.metric(Metric::Likes), &[120.0, 98.0]);
    assert_eq!(ts.metric(Metric::Comments), &[4.0, 0.0]);
}

#[test]
fn malformed_body_is_an_error() {
    assert!(parse_timeseries(r#"{"postCounts": "many"}"#).is_err());
    assert!(parse_chart_status("not json").is_err());
}

#[test]
fn platforms_merge_into_dual_mode() {
    let ig = parse_timeseries(r#"{"dates": ["a", "b", "c"], "postCounts": [1, 2, 3]}"#).unwrap();
    let yt = parse_timeseries(r#"{"dates": ["a"], "postCounts": [9]}"#).unwrap();
    let data = ChartData::from_platforms(&ig, &yt, Metric::Posts);
    assert_eq!(data.mode(), ChartMode::Dual);
    assert_eq!(data.series_a, vec![1.0, 2.0, 3.0]);
    assert_eq!(data.series_b, vec![9.0]);
    assert_eq!(data.dates.len(), 3);
}

#[test]
fn urls_are_built_from_the_normalised_base() {
    let client = Client::new("dash.example.com/").unwrap();
    assert_eq!(client.base_url, "https://dash.example.com");
    assert_eq!(client.chart_status_url(), "https://dash.example.com/api/chart/status");
    assert_eq!(
        client.timeseries_url(Platform::Youtube, 14),
        "https://dash.example.com/api/analytics/timeseries?platform=youtube&days=14"
    );
}

#[test]
fn zero_days_is_rejected_before_any_request() {
    let client = Client::new("http://127.0.0.1:9").unwrap();
    let err = client.fetch_timeseries(Platform::Instagram, 0).unwrap_err();
    assert!(err.to_string().contains("days"));
}

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

use crate::models::{ChartData, ChartMode};

/// Summary statistics for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub label: String,
    /// Finite samples only.
    pub count: usize,
    /// Non-finite samples that were skipped.
    pub skipped: usize,
    pub total: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Index of the first occurrence of the maximum.
    pub peak_index: Option<usize>,
    /// Date label at `peak_index`, when one exists.
    pub peak_date: Option<String>,
}

/// Summarise one series. `dates` may be shorter than `series`.
pub fn summarize(label: &str, series: &[f64], dates: &[String]) -> Summary {
    let mut vals: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();
    let skipped = series.len() - vals.len();

    let peak_index = series
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .fold(None::<(usize, f64)>, |best, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i);

    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let total: f64 = vals.iter().sum();
    let mean = (count > 0).then(|| total / count as f64);
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };

    Summary {
        label: label.to_string(),
        count,
        skipped,
        total,
        min: vals.first().copied(),
        max: vals.last().copied(),
        mean,
        median,
        peak_index,
        peak_date: peak_index.and_then(|i| dates.get(i).cloned()),
    }
}

/// Summaries for every series the chart would draw: both slots in dual
/// mode, the legacy series alone otherwise.
pub fn chart_summary(data: &ChartData, label_a: &str, label_b: &str) -> Vec<Summary> {
    let mut out = vec![summarize(label_a, data.effective_a(), &data.dates)];
    if data.mode() == ChartMode::Dual {
        out.push(summarize(label_b, data.effective_b(), &data.dates));
    }
    out
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `de`, `fr`, `es`, `it`, `pt`,
/// `nl` and their region variants. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Round to an integer and group digits for the locale, e.g. `12,345`.
pub fn format_count(value: f64, locale: &Locale) -> String {
    if !value.is_finite() {
        return "-".into();
    }
    let rounded = value.round() as i64;
    rounded.to_formatted_string(locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_prefers_first_maximum() {
        let s = summarize("IG", &[1.0, 5.0, 5.0, 2.0], &[]);
        assert_eq!(s.peak_index, Some(1));
        assert_eq!(s.peak_date, None);
    }

    #[test]
    fn locale_grouping() {
        assert_eq!(format_count(12345.4, map_locale("en")), "12,345");
        assert_eq!(format_count(12345.0, map_locale("DE")), "12.345");
    }
}

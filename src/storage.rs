use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{ChartData, ChartStatus};
use crate::preprocess::{SMOOTHING_WINDOW, moving_average};

/// Load chart input from a JSON file.
///
/// Three shapes are accepted:
/// - a bare array of numbers (legacy single series)
/// - a chart status object with `series` or `data`
/// - a [`ChartData`] object (`seriesA`/`igSeries`, `seriesB`/`ytSeries`, `points`, `dates`)
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<ChartData> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_chart_json(&raw)
}

/// Same as [`load_json`] for an in-memory document.
pub fn parse_chart_json(raw: &str) -> Result<ChartData> {
    let v: Value = serde_json::from_str(raw)?;
    match &v {
        Value::Array(_) => Ok(ChartData::single(serde_json::from_value(v)?, Vec::new())),
        Value::Object(map) if map.contains_key("series") || map.contains_key("data") => {
            let status: ChartStatus = serde_json::from_value(v)?;
            Ok(status.into_chart_data())
        }
        Value::Object(_) => Ok(serde_json::from_value(v)?),
        _ => Err(Error::InvalidInput(
            "expected a JSON array or object of series".into(),
        )),
    }
}

/// One exported row: raw and smoothed values for both slots at `index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub index: usize,
    pub date: Option<String>,
    pub a: Option<f64>,
    pub a_smoothed: Option<f64>,
    pub b: Option<f64>,
    pub b_smoothed: Option<f64>,
}

/// Tabulate the drawable series with their smoothed variants. Rows run to
/// the longer of the two series; dates past their end are left empty.
pub fn series_table(data: &ChartData) -> Vec<SeriesRow> {
    let a = data.effective_a();
    let b = data.effective_b();
    let sa = moving_average(a, SMOOTHING_WINDOW);
    let sb = moving_average(b, SMOOTHING_WINDOW);
    (0..a.len().max(b.len()))
        .map(|i| SeriesRow {
            index: i,
            date: data.dates.get(i).cloned(),
            a: a.get(i).copied(),
            a_smoothed: sa.get(i).copied(),
            b: b.get(i).copied(),
            b_smoothed: sb.get(i).copied(),
        })
        .collect()
}

/// Save the series table as CSV with header.
pub fn save_csv<P: AsRef<Path>>(data: &ChartData, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for row in series_table(data) {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Save the series table as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(data: &ChartData, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).map_err(|e| Error::io(path, e))?;
    let s = serde_json::to_string_pretty(&series_table(data))?;
    f.write_all(s.as_bytes()).map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Save chart input as JSON that [`load_json`] reads back.
pub fn save_chart_json<P: AsRef<Path>>(data: &ChartData, path: P) -> Result<()> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(data)?;
    std::fs::write(path, s).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_is_single_mode() {
        let d = parse_chart_json("[1, 2, 3]").unwrap();
        assert_eq!(d.points, vec![1.0, 2.0, 3.0]);
        assert!(d.series_a.is_empty());
    }

    #[test]
    fn status_shape_uses_data_key() {
        let d = parse_chart_json(r#"{"data": [4, 5]}"#).unwrap();
        assert_eq!(d.effective_a(), &[4.0, 5.0]);
    }

    #[test]
    fn scalar_is_rejected() {
        assert!(parse_chart_json("42").is_err());
    }
}

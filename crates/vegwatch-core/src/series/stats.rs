//! Summary statistics over a chronologically sorted series.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSpan {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TimeSpan {
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStatistics {
    pub mean_ndvi: f64,
    /// Population standard deviation.
    pub std_ndvi: f64,
    pub min_ndvi: f64,
    pub max_ndvi: f64,
    pub data_points: usize,
    pub time_span: TimeSpan,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population (divide-by-n) standard deviation around `mean`.
pub fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// `values` and `dates` are parallel and non-empty, sorted by date.
pub(crate) fn compute_statistics(values: &[f64], dates: &[NaiveDate]) -> SeriesStatistics {
    let mean_ndvi = mean(values);
    SeriesStatistics {
        mean_ndvi,
        std_ndvi: population_std(values, mean_ndvi),
        min_ndvi: values.iter().cloned().fold(f64::INFINITY, f64::min),
        max_ndvi: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        data_points: values.len(),
        time_span: TimeSpan {
            start_date: dates[0],
            end_date: dates[dates.len() - 1],
        },
    }
}

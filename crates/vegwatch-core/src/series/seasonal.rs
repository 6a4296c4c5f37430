//! Monthly seasonal profile.
//!
//! Samples are grouped by calendar month regardless of year. Peak and low
//! months are the first maximum / minimum in ascending month order; ties
//! resolve to the earlier month.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use super::stats::{mean, population_std};
use crate::sample::Sample;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub mean_ndvi: f64,
    pub std_ndvi: f64,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalPatterns {
    /// Keyed by calendar month, 1 = January.
    pub monthly_averages: BTreeMap<u32, MonthlyStats>,
    pub peak_vegetation_month: u32,
    pub lowest_vegetation_month: u32,
    pub seasonal_variation: f64,
}

/// `samples` must be non-empty.
pub(crate) fn compute_seasonal(samples: &[Sample]) -> SeasonalPatterns {
    let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for s in samples {
        by_month.entry(s.date.month()).or_default().push(s.ndvi_mean);
    }

    let monthly_averages: BTreeMap<u32, MonthlyStats> = by_month
        .into_iter()
        .map(|(month, values)| {
            let m = mean(&values);
            let stats = MonthlyStats {
                mean_ndvi: m,
                std_ndvi: population_std(&values, m),
                data_points: values.len(),
            };
            (month, stats)
        })
        .collect();

    let mut peak: Option<(u32, f64)> = None;
    let mut low: Option<(u32, f64)> = None;
    for (&month, stats) in &monthly_averages {
        let m = stats.mean_ndvi;
        if peak.map_or(true, |(_, best)| m > best) {
            peak = Some((month, m));
        }
        if low.map_or(true, |(_, worst)| m < worst) {
            low = Some((month, m));
        }
    }
    let (peak_month, peak_mean) = peak.unwrap_or((1, 0.0));
    let (low_month, low_mean) = low.unwrap_or((1, 0.0));

    SeasonalPatterns {
        monthly_averages,
        peak_vegetation_month: peak_month,
        lowest_vegetation_month: low_month,
        seasonal_variation: peak_mean - low_mean,
    }
}

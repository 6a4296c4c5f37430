//! Full time-series diagnostics for one parcel.
//!
//! Pipeline:
//!   validate → sort by date → statistics → trend → seasonal (n ≥ 12) →
//!   anomalies → change points → latest pairwise change → mean-health.
//!
//! The analyzer is stateless: every call recomputes from the raw samples.

pub mod anomalies;
pub mod change_points;
pub mod seasonal;
pub mod stats;
pub mod trend;

use chrono::NaiveDate;
use serde::Serialize;

use crate::change::{detect_change, ChangeRecord};
use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::health::{classify, HealthAssessment};
use crate::sample::{Ndvi, Sample};

pub use anomalies::{Anomaly, AnomalySeverity, AnomalyType};
pub use change_points::{ChangePoint, ShiftDirection};
pub use seasonal::{MonthlyStats, SeasonalPatterns};
pub use stats::{SeriesStatistics, TimeSpan};
pub use trend::{OverallTrend, TrendAnalysis, TrendStrength};

use anomalies::detect_anomalies;
use change_points::detect_change_points;
use seasonal::compute_seasonal;
use stats::compute_statistics;
use trend::compute_trend;

/// Minimum series length for trend and pairwise change.
pub const MIN_SAMPLES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesAnalysis {
    pub statistics: SeriesStatistics,
    pub trend_analysis: TrendAnalysis,
    /// Classification of the series mean, not of the latest sample.
    pub health_assessment: HealthAssessment,
    pub anomalies: Vec<Anomaly>,
    pub change_points: Vec<ChangePoint>,
    pub seasonal_patterns: Option<SeasonalPatterns>,
    pub latest_change: Option<ChangeRecord>,
}

impl SeriesAnalysis {
    pub fn has_extreme_anomaly(&self) -> bool {
        self.anomalies
            .iter()
            .any(|a| a.severity == AnomalySeverity::Extreme)
    }
}

/// Analyze a parcel's NDVI history.
///
/// Fails with `InsufficientData` below two samples and `InvalidRange` if any
/// `ndvi_mean` is outside [-1, 1]. Input order is irrelevant; same-date
/// samples keep their relative input order.
pub fn analyze(samples: &[Sample], config: &AnalysisConfig) -> Result<SeriesAnalysis> {
    if samples.len() < MIN_SAMPLES {
        return Err(Error::InsufficientData {
            operation: "time series analysis",
            required: MIN_SAMPLES,
            actual: samples.len(),
        });
    }
    for s in samples {
        s.ndvi()?;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|s| s.date);

    let values: Vec<f64> = sorted.iter().map(|s| s.ndvi_mean).collect();
    let dates: Vec<NaiveDate> = sorted.iter().map(|s| s.date).collect();

    let statistics = compute_statistics(&values, &dates);
    let trend_analysis = compute_trend(&values, &config.trend);

    let seasonal_patterns = if sorted.len() >= config.seasonal_min_samples {
        Some(compute_seasonal(&sorted))
    } else {
        None
    };

    let anomalies = detect_anomalies(
        &values,
        &dates,
        statistics.mean_ndvi,
        statistics.std_ndvi,
        &config.anomaly,
    );
    let change_points = detect_change_points(&values, &dates, &config.change_points);

    let latest_change = latest_pair(&sorted)
        .map(|(prev, last)| -> Result<ChangeRecord> {
            let days = (last.date - prev.date).num_days();
            Ok(detect_change(prev.ndvi()?, last.ndvi()?, days, config))
        })
        .transpose()?;

    // Mean of values in [-1, 1] stays in [-1, 1]; clipping only absorbs rounding.
    let mean_ndvi = Ndvi::clipped(statistics.mean_ndvi)?;
    let health_assessment = classify(mean_ndvi, &config.thresholds);

    log::debug!(
        "analyzed {} samples ({} → {}): mean={:.3} slope={:.5} trend={:?} anomalies={} change_points={} seasonal={}",
        statistics.data_points,
        statistics.time_span.start_date,
        statistics.time_span.end_date,
        statistics.mean_ndvi,
        trend_analysis.trend_slope,
        trend_analysis.overall_trend,
        anomalies.len(),
        change_points.len(),
        seasonal_patterns.is_some(),
    );

    Ok(SeriesAnalysis {
        statistics,
        trend_analysis,
        health_assessment,
        anomalies,
        change_points,
        seasonal_patterns,
        latest_change,
    })
}

fn latest_pair(sorted: &[Sample]) -> Option<(&Sample, &Sample)> {
    match sorted {
        [.., prev, last] => Some((prev, last)),
        _ => None,
    }
}

//! Z-score anomaly detection against the whole-series mean.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::AnomalyParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    Moderate,
    Extreme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    /// Position in the chronologically sorted series.
    pub index: usize,
    pub date: NaiveDate,
    pub ndvi_value: f64,
    pub z_score: f64,
    pub anomaly_type: AnomalyType,
    pub severity: AnomalySeverity,
}

/// Flag samples whose |z| exceeds the threshold.
///
/// A zero-variance series has z = 0 everywhere and therefore no anomalies.
pub(crate) fn detect_anomalies(
    values: &[f64],
    dates: &[NaiveDate],
    mean: f64,
    std: f64,
    params: &AnomalyParams,
) -> Vec<Anomaly> {
    if std == 0.0 {
        log::debug!("zero-variance series, skipping anomaly z-scores");
    }

    values
        .iter()
        .zip(dates.iter())
        .enumerate()
        .filter_map(|(index, (&value, &date))| {
            let z_score = if std > 0.0 { (value - mean).abs() / std } else { 0.0 };
            if z_score <= params.z_threshold {
                return None;
            }
            Some(Anomaly {
                index,
                date,
                ndvi_value: value,
                z_score,
                anomaly_type: if value > mean { AnomalyType::High } else { AnomalyType::Low },
                severity: if z_score > params.extreme_z {
                    AnomalySeverity::Extreme
                } else {
                    AnomalySeverity::Moderate
                },
            })
        })
        .collect()
}

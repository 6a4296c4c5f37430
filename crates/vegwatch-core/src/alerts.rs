//! Threshold alerts for individual observations and for the drop from a
//! parcel's baseline.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Thresholds;
use crate::error::{Error, Result};
use crate::sample::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Deforestation,
    VegetationDegradation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    NdviThreshold,
    BaselineComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub observation_date: NaiveDate,
    pub ndvi_value: f64,
    /// The threshold the reading fell below.
    pub threshold: f64,
    pub detection_method: DetectionMethod,
    pub description: String,
    /// Detector confidence in [0, 1].
    pub confidence_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndvi_baseline: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndvi_drop_percent: Option<f64>,
}

/// Drop from baseline, in percent, above which a baseline alert is high severity.
pub const HIGH_DROP_PERCENT: f64 = 50.0;

/// Confidence of a reading below the critical threshold.
pub const CRITICAL_CONFIDENCE: f64 = 0.95;
/// Confidence of alert-threshold and baseline-comparison alerts.
pub const STANDARD_CONFIDENCE: f64 = 0.85;

/// Alert for a single observation that falls below the critical or alert threshold.
pub fn observation_alert(sample: &Sample, thresholds: &Thresholds) -> Result<Option<Alert>> {
    let value = sample.ndvi()?.value();

    let (alert_type, severity, threshold, confidence_score) = if value < thresholds.critical {
        (
            AlertType::Deforestation,
            AlertSeverity::Critical,
            thresholds.critical,
            CRITICAL_CONFIDENCE,
        )
    } else if value < thresholds.alert {
        (
            AlertType::VegetationDegradation,
            AlertSeverity::Medium,
            thresholds.alert,
            STANDARD_CONFIDENCE,
        )
    } else {
        return Ok(None);
    };

    let description = match alert_type {
        AlertType::Deforestation => format!(
            "Critical NDVI drop detected: {value:.3} below critical threshold {threshold}"
        ),
        AlertType::VegetationDegradation => {
            format!("Vegetation degradation detected: NDVI {value:.3} below alert threshold {threshold}")
        }
    };

    Ok(Some(Alert {
        alert_type,
        severity,
        observation_date: sample.date,
        ndvi_value: value,
        threshold,
        detection_method: DetectionMethod::NdviThreshold,
        description,
        confidence_score,
        ndvi_baseline: None,
        ndvi_drop_percent: None,
    }))
}

/// Compare the latest observation with the earliest one.
///
/// Among same-date samples the first is the baseline and the last is the
/// latest, matching a stable chronological sort.
///
/// Fires only when the latest reading is below the alert threshold. The drop
/// percentage is relative to the baseline and is omitted when the baseline is
/// not positive.
pub fn baseline_drop_alert(samples: &[Sample], thresholds: &Thresholds) -> Result<Option<Alert>> {
    if samples.len() < 2 {
        return Err(Error::InsufficientData {
            operation: "baseline comparison",
            required: 2,
            actual: samples.len(),
        });
    }
    let (Some(baseline), Some(latest)) = (
        samples.iter().min_by_key(|s| s.date),
        samples.iter().max_by_key(|s| s.date),
    ) else {
        return Ok(None);
    };
    let baseline_value = baseline.ndvi()?.value();
    let latest_value = latest.ndvi()?.value();

    if latest_value >= thresholds.alert {
        return Ok(None);
    }

    let drop_percent = (baseline_value > 0.0)
        .then(|| (baseline_value - latest_value) / baseline_value * 100.0);
    let severity = match drop_percent {
        Some(p) if p > HIGH_DROP_PERCENT => AlertSeverity::High,
        _ => AlertSeverity::Medium,
    };
    let description = match drop_percent {
        Some(p) => format!(
            "NDVI fell from baseline {baseline_value:.3} ({}) to {latest_value:.3} ({}), a {p:.1}% drop",
            baseline.date, latest.date
        ),
        None => format!(
            "NDVI at {latest_value:.3} ({}) is below alert threshold {}; baseline {baseline_value:.3} ({})",
            latest.date, thresholds.alert, baseline.date
        ),
    };

    Ok(Some(Alert {
        alert_type: AlertType::Deforestation,
        severity,
        observation_date: latest.date,
        ndvi_value: latest_value,
        threshold: thresholds.alert,
        detection_method: DetectionMethod::BaselineComparison,
        description,
        confidence_score: STANDARD_CONFIDENCE,
        ndvi_baseline: Some(baseline_value),
        ndvi_drop_percent: drop_percent,
    }))
}

/// Sort alerts most severe first; equal severities keep their order.
pub fn rank_alerts(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
}

/// Alert counts per severity, every severity present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertSummary {
    pub total: usize,
    pub by_severity: BTreeMap<AlertSeverity, usize>,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut by_severity: BTreeMap<AlertSeverity, usize> = [
            AlertSeverity::Low,
            AlertSeverity::Medium,
            AlertSeverity::High,
            AlertSeverity::Critical,
        ]
        .into_iter()
        .map(|s| (s, 0))
        .collect();
        for a in alerts {
            *by_severity.entry(a.severity).or_insert(0) += 1;
        }
        Self {
            total: alerts.len(),
            by_severity,
        }
    }
}

//! End-to-end: band grids → scene samples → series report.

use approx::assert_abs_diff_eq;
use chrono::{Months, NaiveDate};
use vegwatch_core::alerts::DetectionMethod;
use vegwatch_core::series::{OverallTrend, TrendStrength};
use vegwatch_core::{
    assess_parcel, assess_parcels, calculate_index, AlertSeverity, AnalysisConfig, BandGrid,
    HealthStatus, ParcelSeries, Priority, Sample,
};

/// 2×2 scene whose three valid pixels read `v`; the fourth has zero signal.
fn scene_sample(date: NaiveDate, v: f64) -> Sample {
    let nir = BandGrid::new(2, 2, vec![1.0 + v, 1.0 + v, 0.0, 1.0 + v]).unwrap();
    let red = BandGrid::new(2, 2, vec![1.0 - v, 1.0 - v, 0.0, 1.0 - v]).unwrap();
    let grid = calculate_index(&nir, &red).unwrap();
    assert_eq!(grid.get(1, 0), None);
    Sample::from_scene(date, &grid).unwrap()
}

fn declining_parcel() -> Vec<Sample> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();
    (0..14u32)
        .map(|i| scene_sample(start + Months::new(i), 0.75 - 0.045 * i as f64))
        .collect()
}

#[test]
fn scene_sample_ignores_missing_pixel() {
    let s = scene_sample(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 0.62);
    assert_abs_diff_eq!(s.ndvi_mean, 0.62, epsilon = 1e-12);
    assert_abs_diff_eq!(s.ndvi_std.unwrap(), 0.0, epsilon = 1e-12);
}

#[test]
fn declining_parcel_report() {
    let samples = declining_parcel();
    let report = assess_parcel("KE-117", &samples, &AnalysisConfig::default()).unwrap();

    let a = &report.analysis;
    assert_eq!(a.statistics.data_points, 14);
    assert_abs_diff_eq!(a.statistics.mean_ndvi, 0.4575, epsilon = 1e-9);
    assert_eq!(a.health_assessment.status, HealthStatus::Moderate);
    assert_eq!(a.trend_analysis.overall_trend, OverallTrend::Declining);
    assert_eq!(a.trend_analysis.trend_strength, TrendStrength::Strong);
    assert!(a.anomalies.is_empty());
    assert!(!a.change_points.is_empty());
    assert!(a.seasonal_patterns.is_some());

    assert_eq!(report.plan.priority, Priority::Medium);
    assert!(!report.plan.action_required);

    assert_eq!(report.alerts.len(), 2);
    assert_eq!(report.alerts[0].severity, AlertSeverity::High);
    assert_eq!(report.alerts[0].detection_method, DetectionMethod::BaselineComparison);
    assert_eq!(report.alerts[1].severity, AlertSeverity::Medium);
    assert_eq!(report.alerts[1].detection_method, DetectionMethod::NdviThreshold);
}

#[test]
fn report_serializes_to_json() {
    let report = assess_parcel("KE-117", &declining_parcel(), &AnalysisConfig::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["parcel_id"], "KE-117");
    assert_eq!(json["analysis"]["health_assessment"]["status"], "moderate");
    assert_eq!(json["plan"]["priority"], "medium");
    assert_eq!(json["alerts"][0]["detection_method"], "baseline_comparison");
    assert!(json["alerts"][1].get("ndvi_baseline").is_none());
    assert_eq!(json["alerts"][0]["confidence_score"], 0.85);
}

#[test]
fn stricter_thresholds_from_toml_change_the_verdict() {
    let config = AnalysisConfig::from_toml_str(
        r#"
        [thresholds]
        healthy = 0.8
        moderate = 0.6
        alert = 0.5
        critical = 0.3
        "#,
    )
    .unwrap();
    let parcels = vec![
        ParcelSeries {
            parcel_id: "declining".into(),
            samples: declining_parcel(),
        },
        ParcelSeries {
            parcel_id: "empty".into(),
            samples: Vec::new(),
        },
    ];
    let results = assess_parcels(&parcels, &config);
    assert_eq!(results.len(), 2);

    let report = results[0].1.as_ref().unwrap();
    assert_eq!(report.analysis.health_assessment.status, HealthStatus::Critical);
    assert_eq!(report.plan.priority, Priority::Critical);
    // Latest reading 0.165 is below the raised critical threshold.
    assert_eq!(report.alerts[0].severity, AlertSeverity::Critical);

    assert!(results[1].1.is_err());
}

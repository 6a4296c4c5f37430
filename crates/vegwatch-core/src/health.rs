//! Vegetation health ladder.
//!
//! A single NDVI scalar maps to exactly one tier. The ladder is an ordered
//! table of (tier, lower bound) pairs scanned from the top; the first bound
//! the value reaches wins and anything below the last bound is
//! `SeverelyDegraded`. With strictly decreasing thresholds this partitions
//! [-1, 1] without gaps or overlaps.

use serde::Serialize;

use crate::config::Thresholds;
use crate::sample::Ndvi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Moderate,
    Degraded,
    Critical,
    SeverelyDegraded,
}

impl HealthStatus {
    /// Tier for `value` under `thresholds`.
    pub fn from_value(value: f64, thresholds: &Thresholds) -> Self {
        let ladder = [
            (HealthStatus::Healthy, thresholds.healthy),
            (HealthStatus::Moderate, thresholds.moderate),
            (HealthStatus::Degraded, thresholds.alert),
            (HealthStatus::Critical, thresholds.critical),
        ];
        ladder
            .iter()
            .find(|(_, lower)| value >= *lower)
            .map(|(status, _)| *status)
            .unwrap_or(HealthStatus::SeverelyDegraded)
    }

    /// Health score on a 0–100 scale.
    pub fn score(self) -> u8 {
        match self {
            HealthStatus::Healthy => 100,
            HealthStatus::Moderate => 70,
            HealthStatus::Degraded => 40,
            HealthStatus::Critical => 20,
            HealthStatus::SeverelyDegraded => 5,
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Continue monitoring. Vegetation is in excellent condition.",
            HealthStatus::Moderate => {
                "Monitor closely. Vegetation health is moderate, watch for declining trends."
            }
            HealthStatus::Degraded => {
                "Alert: Vegetation is degraded. Investigate potential causes and implement conservation measures."
            }
            HealthStatus::Critical => {
                "Critical: Severe vegetation loss detected. Immediate intervention required."
            }
            HealthStatus::SeverelyDegraded => {
                "Emergency: Extreme vegetation loss. Urgent conservation action needed."
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Moderate => "moderate",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Critical => "critical",
            HealthStatus::SeverelyDegraded => "severely_degraded",
        }
    }
}

/// Classification of one NDVI value, with the thresholds that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAssessment {
    pub status: HealthStatus,
    pub health_score: u8,
    pub ndvi_value: f64,
    pub recommendation: &'static str,
    pub thresholds: Thresholds,
}

/// Classify a single NDVI value.
pub fn classify(value: Ndvi, thresholds: &Thresholds) -> HealthAssessment {
    let status = HealthStatus::from_value(value.value(), thresholds);
    HealthAssessment {
        status,
        health_score: status.score(),
        ndvi_value: value.value(),
        recommendation: status.recommendation(),
        thresholds: *thresholds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(v: f64) -> HealthAssessment {
        classify(Ndvi::new(v).unwrap(), &Thresholds::default())
    }

    #[test]
    fn boundaries_are_inclusive_from_below() {
        assert_eq!(assess(0.6).status, HealthStatus::Healthy);
        assert_eq!(assess(0.599).status, HealthStatus::Moderate);
        assert_eq!(assess(0.4).status, HealthStatus::Moderate);
        assert_eq!(assess(0.399).status, HealthStatus::Degraded);
        assert_eq!(assess(0.3).status, HealthStatus::Degraded);
        assert_eq!(assess(0.299).status, HealthStatus::Critical);
        assert_eq!(assess(0.1).status, HealthStatus::Critical);
        assert_eq!(assess(0.099).status, HealthStatus::SeverelyDegraded);
    }

    #[test]
    fn extremes_classify() {
        assert_eq!(assess(1.0).status, HealthStatus::Healthy);
        assert_eq!(assess(-1.0).status, HealthStatus::SeverelyDegraded);
    }

    /// Every value in [-1, 1] lands in exactly one tier, and the tier never
    /// improves as the value decreases.
    #[test]
    fn ladder_partitions_range_monotonically() {
        let t = Thresholds::default();
        let rank = |s: HealthStatus| s.score();
        let mut prev = rank(HealthStatus::from_value(1.0, &t));
        for i in (0..=2000).rev() {
            let v = -1.0 + i as f64 * 0.001;
            let status = HealthStatus::from_value(v, &t);
            let matching = [
                v >= t.healthy,
                v >= t.moderate && v < t.healthy,
                v >= t.alert && v < t.moderate,
                v >= t.critical && v < t.alert,
                v < t.critical,
            ]
            .iter()
            .filter(|&&m| m)
            .count();
            assert_eq!(matching, 1, "value {v} matched {matching} tiers");
            assert!(rank(status) <= prev, "tier improved as value fell at {v}");
            prev = rank(status);
        }
    }

    #[test]
    fn scores_and_recommendations_match_table() {
        let cases = [
            (0.8, 100, "Continue monitoring. Vegetation is in excellent condition."),
            (0.5, 70, "Monitor closely. Vegetation health is moderate, watch for declining trends."),
            (0.35, 40, "Alert: Vegetation is degraded. Investigate potential causes and implement conservation measures."),
            (0.2, 20, "Critical: Severe vegetation loss detected. Immediate intervention required."),
            (0.0, 5, "Emergency: Extreme vegetation loss. Urgent conservation action needed."),
        ];
        for (v, score, text) in cases {
            let a = assess(v);
            assert_eq!(a.health_score, score, "score for {v}");
            assert_eq!(a.recommendation, text, "recommendation for {v}");
            assert_eq!(a.ndvi_value, v);
        }
    }

    #[test]
    fn assessment_echoes_threshold_snapshot() {
        let a = assess(0.45);
        assert_eq!(a.thresholds.healthy, 0.6);
        assert_eq!(a.thresholds.moderate, 0.4);
        assert_eq!(a.thresholds.alert, 0.3);
        assert_eq!(a.thresholds.critical, 0.1);
    }

    #[test]
    fn alternative_regime_shifts_tiers() {
        let strict = Thresholds {
            healthy: 0.7,
            moderate: 0.5,
            alert: 0.35,
            critical: 0.15,
        };
        let v = Ndvi::new(0.65).unwrap();
        assert_eq!(classify(v, &Thresholds::default()).status, HealthStatus::Healthy);
        let a = classify(v, &strict);
        assert_eq!(a.status, HealthStatus::Moderate);
        assert_eq!(a.thresholds, strict);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&HealthStatus::SeverelyDegraded).unwrap();
        assert_eq!(json, "\"severely_degraded\"");
    }
}

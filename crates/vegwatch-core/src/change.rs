//! Pairwise change between two NDVI observations.
//!
//! Magnitude bucket, direction and alert level are three independent reads
//! of the same delta: a +0.01 change is simultaneously "stable" by magnitude
//! and an "improvement" by direction. Only degrading changes escalate the
//! alert level.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::health::{classify, HealthAssessment};
use crate::sample::Ndvi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Stable,
    GradualChange,
    RapidChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Improvement,
    Degradation,
    Stable,
}

impl Direction {
    fn of(change: f64) -> Self {
        if change > 0.0 {
            Direction::Improvement
        } else if change < 0.0 {
            Direction::Degradation
        } else {
            Direction::Stable
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Direction::Improvement => "Vegetation health is improving",
            Direction::Degradation => "Vegetation health is declining",
            Direction::Stable => "Vegetation health is stable",
        }
    }
}

/// Alert level for a change, ordered from none to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    pub change_value: f64,
    pub change_rate_per_day: f64,
    pub change_type: ChangeType,
    pub direction: Direction,
    pub significance: Significance,
    pub trend_description: &'static str,
    pub alert_level: AlertLevel,
    pub time_period_days: i64,
    pub before_analysis: HealthAssessment,
    pub after_analysis: HealthAssessment,
}

/// Characterize the change from `before` to `after` over `days` days.
///
/// A non-positive `days` reports a per-day rate of 0.
pub fn detect_change(before: Ndvi, after: Ndvi, days: i64, config: &AnalysisConfig) -> ChangeRecord {
    let params = &config.change;
    let change = after.value() - before.value();
    let change_rate_per_day = if days > 0 { change / days as f64 } else { 0.0 };

    let (change_type, significance) = if change.abs() < params.stable_delta {
        (ChangeType::Stable, Significance::Low)
    } else if change.abs() < params.gradual_delta {
        (ChangeType::GradualChange, Significance::Moderate)
    } else {
        (ChangeType::RapidChange, Significance::High)
    };

    let direction = Direction::of(change);

    let alert_level = if change < -params.high_alert_drop && after.value() < config.thresholds.alert {
        AlertLevel::High
    } else if change < -params.medium_alert_drop {
        AlertLevel::Medium
    } else if change < -params.low_alert_drop {
        AlertLevel::Low
    } else {
        AlertLevel::None
    };

    ChangeRecord {
        change_value: change,
        change_rate_per_day,
        change_type,
        direction,
        significance,
        trend_description: direction.description(),
        alert_level,
        time_period_days: days,
        before_analysis: classify(before, &config.thresholds),
        after_analysis: classify(after, &config.thresholds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthStatus;
    use approx::assert_abs_diff_eq;

    fn change(before: f64, after: f64, days: i64) -> ChangeRecord {
        detect_change(
            Ndvi::new(before).unwrap(),
            Ndvi::new(after).unwrap(),
            days,
            &AnalysisConfig::default(),
        )
    }

    #[test]
    fn no_change_is_stable_everywhere() {
        let c = change(0.5, 0.5, 10);
        assert_eq!(c.change_value, 0.0);
        assert_eq!(c.change_rate_per_day, 0.0);
        assert_eq!(c.change_type, ChangeType::Stable);
        assert_eq!(c.significance, Significance::Low);
        assert_eq!(c.direction, Direction::Stable);
        assert_eq!(c.alert_level, AlertLevel::None);
        assert_eq!(c.trend_description, "Vegetation health is stable");
    }

    #[test]
    fn sharp_drop_below_alert_threshold_is_high() {
        let c = change(0.5, 0.2, 30);
        assert_abs_diff_eq!(c.change_value, -0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(c.change_rate_per_day, -0.01, epsilon = 1e-12);
        assert_eq!(c.change_type, ChangeType::RapidChange);
        assert_eq!(c.significance, Significance::High);
        assert_eq!(c.direction, Direction::Degradation);
        assert_eq!(c.alert_level, AlertLevel::High);
        assert_eq!(c.before_analysis.status, HealthStatus::Moderate);
        assert_eq!(c.after_analysis.status, HealthStatus::Critical);
    }

    /// A large drop that stays above the alert threshold only reaches medium.
    #[test]
    fn sharp_drop_above_alert_threshold_is_medium() {
        let c = change(0.8, 0.5, 30);
        assert_eq!(c.change_type, ChangeType::RapidChange);
        assert_eq!(c.alert_level, AlertLevel::Medium);
    }

    #[test]
    fn small_drops_escalate_by_size() {
        assert_eq!(change(0.5, 0.47, 5).alert_level, AlertLevel::Low);
        assert_eq!(change(0.5, 0.49, 5).alert_level, AlertLevel::None);
        assert_eq!(change(0.5, 0.43, 5).alert_level, AlertLevel::Medium);
    }

    #[test]
    fn tiny_rise_is_stable_bucket_but_improving() {
        let c = change(0.5, 0.52, 16);
        assert_eq!(c.change_type, ChangeType::Stable);
        assert_eq!(c.direction, Direction::Improvement);
        assert_eq!(c.alert_level, AlertLevel::None);
    }

    #[test]
    fn large_improvement_never_alerts() {
        let c = change(0.1, 0.8, 10);
        assert_eq!(c.change_type, ChangeType::RapidChange);
        assert_eq!(c.direction, Direction::Improvement);
        assert_eq!(c.alert_level, AlertLevel::None);
    }

    #[test]
    fn gradual_bucket() {
        let c = change(0.6, 0.5, 10);
        assert_eq!(c.change_type, ChangeType::GradualChange);
        assert_eq!(c.significance, Significance::Moderate);
    }

    #[test]
    fn zero_days_reports_zero_rate() {
        let c = change(0.6, 0.3, 0);
        assert_eq!(c.change_rate_per_day, 0.0);
        assert_eq!(c.time_period_days, 0);
    }

    #[test]
    fn alert_levels_are_ordered() {
        assert!(AlertLevel::High > AlertLevel::Medium);
        assert!(AlertLevel::Medium > AlertLevel::Low);
        assert!(AlertLevel::Low > AlertLevel::None);
    }
}

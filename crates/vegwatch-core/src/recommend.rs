//! Action plan derived from a series analysis.
//!
//! Rules run in a fixed order and each may append actions, raise the
//! priority and require action. Priority only moves up: a rule asking for
//! `High` after an earlier rule set `Critical` leaves it at `Critical`.

use serde::Serialize;

use crate::health::HealthStatus;
use crate::series::{OverallTrend, SeriesAnalysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringFrequency {
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stakeholder {
    #[serde(rename = "Forest Department")]
    ForestDepartment,
    #[serde(rename = "Local Community Leaders")]
    LocalCommunityLeaders,
    #[serde(rename = "Environmental NGOs")]
    EnvironmentalNgos,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationPlan {
    pub recommendations: Vec<String>,
    pub priority: Priority,
    pub action_required: bool,
    pub monitoring_frequency: MonitoringFrequency,
    pub stakeholders_to_notify: Vec<Stakeholder>,
}

/// What a single rule contributes when it fires.
#[derive(Debug, Default)]
struct RuleOutcome {
    actions: Vec<String>,
    raise_to: Option<Priority>,
    requires_action: bool,
}

type Rule = fn(&SeriesAnalysis) -> Option<RuleOutcome>;

/// Evaluation order matters only for the order of recommendations.
const RULES: [Rule; 3] = [health_rule, declining_trend_rule, anomaly_rule];

fn actions(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn health_rule(analysis: &SeriesAnalysis) -> Option<RuleOutcome> {
    match analysis.health_assessment.status {
        HealthStatus::Critical | HealthStatus::SeverelyDegraded => Some(RuleOutcome {
            actions: actions(&[
                "Immediate field verification required",
                "Implement emergency conservation measures",
                "Contact local forest officials",
            ]),
            raise_to: Some(Priority::Critical),
            requires_action: true,
        }),
        HealthStatus::Degraded => Some(RuleOutcome {
            actions: actions(&[
                "Schedule field inspection within 7 days",
                "Monitor for encroachment or illegal activities",
                "Consider soil conservation measures",
            ]),
            raise_to: Some(Priority::High),
            requires_action: true,
        }),
        HealthStatus::Moderate => Some(RuleOutcome {
            actions: actions(&[
                "Increase monitoring frequency",
                "Check for early signs of degradation",
            ]),
            raise_to: Some(Priority::Medium),
            requires_action: false,
        }),
        HealthStatus::Healthy => None,
    }
}

fn declining_trend_rule(analysis: &SeriesAnalysis) -> Option<RuleOutcome> {
    if analysis.trend_analysis.overall_trend != OverallTrend::Declining {
        return None;
    }
    Some(RuleOutcome {
        actions: actions(&[
            "Investigate causes of vegetation decline",
            "Implement preventive conservation strategies",
        ]),
        raise_to: Some(Priority::Medium),
        requires_action: false,
    })
}

fn anomaly_rule(analysis: &SeriesAnalysis) -> Option<RuleOutcome> {
    if analysis.anomalies.is_empty() {
        return None;
    }
    let extreme = analysis.has_extreme_anomaly();
    Some(RuleOutcome {
        actions: vec![format!(
            "Investigate {} anomalous readings",
            analysis.anomalies.len()
        )],
        raise_to: extreme.then_some(Priority::High),
        requires_action: extreme,
    })
}

/// Build the prioritized plan for one analysis.
pub fn recommend(analysis: &SeriesAnalysis) -> RecommendationPlan {
    let mut recommendations = Vec::new();
    let mut priority = Priority::Low;
    let mut action_required = false;

    for rule in RULES {
        if let Some(outcome) = rule(analysis) {
            recommendations.extend(outcome.actions);
            if let Some(p) = outcome.raise_to {
                priority = priority.max(p);
            }
            action_required |= outcome.requires_action;
        }
    }

    let monitoring_frequency = if priority >= Priority::High {
        MonitoringFrequency::Weekly
    } else {
        MonitoringFrequency::Monthly
    };

    let stakeholders_to_notify = [
        (priority >= Priority::High).then_some(Stakeholder::ForestDepartment),
        action_required.then_some(Stakeholder::LocalCommunityLeaders),
        (priority == Priority::Critical).then_some(Stakeholder::EnvironmentalNgos),
    ]
    .into_iter()
    .flatten()
    .collect();

    RecommendationPlan {
        recommendations,
        priority,
        action_required,
        monitoring_frequency,
        stakeholders_to_notify,
    }
}

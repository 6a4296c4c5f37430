//! Per-parcel pipeline: analysis, action plan and alerts in one call.
//!
//! Parcels never share state, so a batch is a plain map. With the
//! `threading` feature the map runs on the rayon pool; without it the same
//! call runs sequentially.

#[cfg(feature = "threading")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::alerts::{baseline_drop_alert, observation_alert, rank_alerts, Alert};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::recommend::{recommend, RecommendationPlan};
use crate::sample::Sample;
use crate::series::{analyze, SeriesAnalysis};

/// A parcel's identifier and observation history, as supplied by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelSeries {
    pub parcel_id: String,
    pub samples: Vec<Sample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParcelReport {
    pub parcel_id: String,
    pub analysis: SeriesAnalysis,
    pub plan: RecommendationPlan,
    /// Most severe first.
    pub alerts: Vec<Alert>,
}

/// Analyze one parcel and derive its plan and alerts.
///
/// Alerts cover the most recent observation and the drop from the earliest
/// one.
pub fn assess_parcel(
    parcel_id: impl Into<String>,
    samples: &[Sample],
    config: &AnalysisConfig,
) -> Result<ParcelReport> {
    let parcel_id = parcel_id.into();
    let analysis = analyze(samples, config)?;
    let plan = recommend(&analysis);

    let mut alerts = Vec::new();
    if let Some(latest) = samples.iter().max_by_key(|s| s.date) {
        alerts.extend(observation_alert(latest, &config.thresholds)?);
    }
    alerts.extend(baseline_drop_alert(samples, &config.thresholds)?);
    rank_alerts(&mut alerts);

    log::info!(
        "parcel {parcel_id}: health={} trend={:?} priority={:?} alerts={}",
        analysis.health_assessment.status.as_str(),
        analysis.trend_analysis.overall_trend,
        plan.priority,
        alerts.len()
    );

    Ok(ParcelReport {
        parcel_id,
        analysis,
        plan,
        alerts,
    })
}

/// Assess many parcels independently. A failing parcel does not affect the
/// others; results keep the input order.
pub fn assess_parcels(
    parcels: &[ParcelSeries],
    config: &AnalysisConfig,
) -> Vec<(String, Result<ParcelReport>)> {
    #[cfg(feature = "threading")]
    let iter = parcels.par_iter();
    #[cfg(not(feature = "threading"))]
    let iter = parcels.iter();

    iter.map(|p| {
        let result = assess_parcel(p.parcel_id.clone(), &p.samples, config);
        if let Err(e) = &result {
            log::warn!("parcel {} skipped: {e}", p.parcel_id);
        }
        (p.parcel_id.clone(), result)
    })
    .collect()
}

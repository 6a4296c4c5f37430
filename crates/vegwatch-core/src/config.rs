//! Analysis parameters.
//!
//! Every component receives its cutoffs through an explicit `AnalysisConfig`
//! rather than module constants, so different threshold regimes can be run
//! side by side. `Default` reproduces the calibrated field values; partial
//! TOML files fall back to those defaults field by field.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// NDVI cutoffs for the health ladder. Must be strictly decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub healthy: f64,
    pub moderate: f64,
    pub alert: f64,
    pub critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            healthy: 0.6,
            moderate: 0.4,
            alert: 0.3,
            critical: 0.1,
        }
    }
}

impl Thresholds {
    /// Check `1 ≥ healthy > moderate > alert > critical ≥ -1`.
    pub fn validate(&self) -> Result<()> {
        let ladder = [self.healthy, self.moderate, self.alert, self.critical];
        if ladder.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "thresholds must be finite: {ladder:?}"
            )));
        }
        if self.healthy > 1.0 || self.critical < -1.0 {
            return Err(Error::InvalidConfig(format!(
                "thresholds must lie in [-1, 1]: {ladder:?}"
            )));
        }
        if !ladder.windows(2).all(|w| w[0] > w[1]) {
            return Err(Error::InvalidConfig(format!(
                "thresholds must be strictly decreasing (healthy > moderate > alert > critical): {ladder:?}"
            )));
        }
        Ok(())
    }
}

/// Cutoffs for pairwise change classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeParams {
    /// |change| below this is "stable".
    pub stable_delta: f64,
    /// |change| below this (and ≥ stable_delta) is "gradual_change".
    pub gradual_delta: f64,
    /// Drop larger than this, ending below the alert threshold, raises a high alert.
    pub high_alert_drop: f64,
    pub medium_alert_drop: f64,
    pub low_alert_drop: f64,
}

impl Default for ChangeParams {
    fn default() -> Self {
        Self {
            stable_delta: 0.05,
            gradual_delta: 0.15,
            high_alert_drop: 0.10,
            medium_alert_drop: 0.05,
            low_alert_drop: 0.02,
        }
    }
}

/// Slope cutoffs for the trend label and strength. Independent scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendParams {
    pub stable_slope: f64,
    pub strong_slope: f64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            stable_slope: 0.001,
            strong_slope: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyParams {
    /// Samples with z-score strictly above this are anomalies.
    pub z_threshold: f64,
    /// Anomalies with z-score strictly above this are "extreme".
    pub extreme_z: f64,
}

impl Default for AnomalyParams {
    fn default() -> Self {
        Self {
            z_threshold: 2.0,
            extreme_z: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangePointParams {
    /// Upper bound on the sliding window; the effective window is min(max_window, n / 3).
    pub max_window: usize,
    /// Window-mean difference strictly above this is a change point.
    pub min_magnitude: f64,
}

impl Default for ChangePointParams {
    fn default() -> Self {
        Self {
            max_window: 5,
            min_magnitude: 0.1,
        }
    }
}

/// Full parameter set for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub thresholds: Thresholds,
    pub change: ChangeParams,
    pub trend: TrendParams,
    pub anomaly: AnomalyParams,
    pub change_points: ChangePointParams,
    /// Minimum series length before monthly seasonal patterns are computed.
    pub seasonal_min_samples: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            change: ChangeParams::default(),
            trend: TrendParams::default(),
            anomaly: AnomalyParams::default(),
            change_points: ChangePointParams::default(),
            seasonal_min_samples: 12,
        }
    }
}

impl AnalysisConfig {
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    /// Parse a TOML document and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        log::info!("loaded analysis config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;

        let c = &self.change;
        let params = [
            ("change.stable_delta", c.stable_delta),
            ("change.gradual_delta", c.gradual_delta),
            ("change.high_alert_drop", c.high_alert_drop),
            ("change.medium_alert_drop", c.medium_alert_drop),
            ("change.low_alert_drop", c.low_alert_drop),
            ("trend.stable_slope", self.trend.stable_slope),
            ("trend.strong_slope", self.trend.strong_slope),
            ("anomaly.z_threshold", self.anomaly.z_threshold),
            ("anomaly.extreme_z", self.anomaly.extreme_z),
            ("change_points.min_magnitude", self.change_points.min_magnitude),
        ];
        if let Some((name, value)) = params
            .iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(Error::InvalidConfig(format!(
                "{name} must be finite and non-negative, got {value}"
            )));
        }

        if !(c.stable_delta > 0.0 && c.stable_delta < c.gradual_delta) {
            return Err(Error::InvalidConfig(format!(
                "change deltas must satisfy 0 < stable_delta < gradual_delta, got {} and {}",
                c.stable_delta, c.gradual_delta
            )));
        }
        if !(c.low_alert_drop <= c.medium_alert_drop && c.medium_alert_drop <= c.high_alert_drop) {
            return Err(Error::InvalidConfig(
                "alert drops must satisfy low ≤ medium ≤ high".to_string(),
            ));
        }
        if self.anomaly.extreme_z < self.anomaly.z_threshold {
            return Err(Error::InvalidConfig(format!(
                "extreme_z ({}) must not be below z_threshold ({})",
                self.anomaly.extreme_z, self.anomaly.z_threshold
            )));
        }
        if self.change_points.max_window == 0 {
            return Err(Error::InvalidConfig(
                "change_points.max_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

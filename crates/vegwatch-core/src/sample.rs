//! Observation records and the validated NDVI scalar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::index::IndexGrid;

/// An NDVI scalar known to lie in [-1, 1].
///
/// Out-of-range and non-finite inputs are rejected rather than clipped, so a
/// bad upstream reading surfaces as `Error::InvalidRange` instead of silently
/// becoming a plausible value. Use [`Ndvi::clipped`] to opt into clipping.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Ndvi(f64);

impl Ndvi {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && (-1.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidRange { value })
        }
    }

    /// Clip a finite value into [-1, 1]. NaN is still rejected.
    pub fn clipped(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(Error::InvalidRange { value });
        }
        Ok(Self(value.clamp(-1.0, 1.0)))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Ndvi {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

/// One NDVI observation of a parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub ndvi_mean: f64,
    #[serde(default)]
    pub ndvi_min: Option<f64>,
    #[serde(default)]
    pub ndvi_max: Option<f64>,
    #[serde(default)]
    pub ndvi_std: Option<f64>,
    #[serde(default)]
    pub satellite_source: Option<String>,
    #[serde(default)]
    pub cloud_cover_percentage: Option<f64>,
    #[serde(default)]
    pub data_quality_score: Option<f64>,
}

impl Sample {
    /// A bare observation with only date and mean NDVI.
    pub fn new(date: NaiveDate, ndvi_mean: f64) -> Self {
        Self {
            date,
            ndvi_mean,
            ndvi_min: None,
            ndvi_max: None,
            ndvi_std: None,
            satellite_source: None,
            cloud_cover_percentage: None,
            data_quality_score: None,
        }
    }

    /// Build an observation from a computed NDVI scene.
    ///
    /// Mean, min, max and std come from the valid pixels; a scene with no valid
    /// pixel cannot produce a reading.
    pub fn from_scene(date: NaiveDate, scene: &IndexGrid) -> Result<Self> {
        let summary = scene.summary().ok_or(Error::InsufficientData {
            operation: "scene summary",
            required: 1,
            actual: 0,
        })?;
        Ok(Self {
            ndvi_min: Some(summary.min),
            ndvi_max: Some(summary.max),
            ndvi_std: Some(summary.std),
            ..Self::new(date, summary.mean)
        })
    }

    pub fn ndvi(&self) -> Result<Ndvi> {
        Ndvi::new(self.ndvi_mean)
    }
}

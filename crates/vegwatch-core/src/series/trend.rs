//! Linear trend of NDVI against sample index.
//!
//! OLS fit of value vs. index 0..n−1 (not vs. calendar time). The label and
//! the strength use separate cutoffs: a slope can be "improving" yet "weak".

use serde::Serialize;

use crate::config::TrendParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallTrend {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStrength {
    Strong,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendAnalysis {
    pub overall_trend: OverallTrend,
    /// NDVI change per sample step.
    pub trend_slope: f64,
    pub trend_strength: TrendStrength,
}

/// OLS slope of y on x, from centered sums. Returns 0 for fewer than two
/// points or when every x is equal.
pub fn linear_slope(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let x_mean = x.iter().sum::<f64>() / n as f64;
    let y_mean = y.iter().sum::<f64>() / n as f64;

    let (cov, var) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0), |(cov, var), (&xi, &yi)| {
            let dx = xi - x_mean;
            (cov + dx * (yi - y_mean), var + dx * dx)
        });
    if var == 0.0 {
        0.0
    } else {
        cov / var
    }
}

pub(crate) fn compute_trend(values: &[f64], params: &TrendParams) -> TrendAnalysis {
    let x: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    let slope = linear_slope(&x, values);

    let overall_trend = if slope.abs() < params.stable_slope {
        OverallTrend::Stable
    } else if slope > 0.0 {
        OverallTrend::Improving
    } else {
        OverallTrend::Declining
    };
    let trend_strength = if slope.abs() > params.strong_slope {
        TrendStrength::Strong
    } else {
        TrendStrength::Weak
    };

    TrendAnalysis {
        overall_trend,
        trend_slope: slope,
        trend_strength,
    }
}

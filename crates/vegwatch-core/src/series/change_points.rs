//! Sliding-window change-point detection.
//!
//! For each interior index i the mean of the `w` samples before i is compared
//! with the mean of the `w` samples starting at i, where
//! w = min(max_window, n / 3). Adjacent indices around one level shift are
//! usually all reported; consumers that want a single point per shift should
//! keep the largest magnitude in each run.

use chrono::NaiveDate;
use serde::Serialize;

use super::stats::mean;
use crate::config::ChangePointParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangePoint {
    pub index: usize,
    pub date: NaiveDate,
    pub change_magnitude: f64,
    pub change_type: ShiftDirection,
    pub before_mean: f64,
    pub after_mean: f64,
}

pub(crate) fn detect_change_points(
    values: &[f64],
    dates: &[NaiveDate],
    params: &ChangePointParams,
) -> Vec<ChangePoint> {
    let n = values.len();
    if n < 3 {
        return Vec::new();
    }
    let window = params.max_window.min(n / 3);
    if window == 0 {
        return Vec::new();
    }

    (window..n - window)
        .filter_map(|i| {
            let before_mean = mean(&values[i - window..i]);
            let after_mean = mean(&values[i..i + window]);
            let diff = after_mean - before_mean;
            if diff.abs() <= params.min_magnitude {
                return None;
            }
            Some(ChangePoint {
                index: i,
                date: dates[i],
                change_magnitude: diff.abs(),
                change_type: if diff > 0.0 {
                    ShiftDirection::Increase
                } else {
                    ShiftDirection::Decrease
                },
                before_mean,
                after_mean,
            })
        })
        .collect()
}

//! Normalized difference vegetation index from spectral bands.
//!
//! `NDVI = (NIR − Red) / (NIR + Red)`, evaluated per pixel. Pixels where the
//! denominator is zero, or where either band is non-finite, carry an explicit
//! `None` marker instead of NaN or 0, so they can never be averaged in as a
//! real reading. Valid values are clipped to [-1, 1]: reflectance noise can
//! push the raw ratio slightly past the bounds.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single-band reflectance grid, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandGrid {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
}

impl BandGrid {
    /// Wrap row-major data; `data.len()` must equal `width × height`.
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
        let grid = Self { width, height, data };
        grid.check_len()?;
        Ok(grid)
    }

    /// Deserialized grids skip `new`; checked again before use.
    fn check_len(&self) -> Result<()> {
        if self.data.len() != self.width * self.height {
            return Err(Error::ShapeMismatch {
                expected: (self.width, self.height),
                actual: (self.data.len(), 1),
            });
        }
        Ok(())
    }

    /// A grid filled with one value.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }
}

/// Pixel-aligned NDVI output. `None` marks pixels with no valid reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexGrid {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Option<f64>>,
}

/// Aggregate statistics over the valid pixels of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneSummary {
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub valid_pixels: usize,
    /// Valid pixels / total pixels.
    pub valid_fraction: f64,
}

impl IndexGrid {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data[row * self.width + col]
    }

    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().filter_map(|v| *v)
    }

    /// Summary over valid pixels, or `None` when every pixel is missing.
    pub fn summary(&self) -> Option<SceneSummary> {
        let values: Vec<f64> = self.valid_values().collect();
        if values.is_empty() {
            log::warn!(
                "NDVI scene {}x{} has no valid pixels",
                self.width,
                self.height
            );
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Some(SceneSummary {
            mean,
            std,
            min,
            max,
            valid_pixels: values.len(),
            valid_fraction: n / self.data.len() as f64,
        })
    }
}

/// Compute NDVI from near-infrared and red bands of identical shape.
pub fn calculate_index(nir: &BandGrid, red: &BandGrid) -> Result<IndexGrid> {
    nir.check_len()?;
    red.check_len()?;
    if nir.shape() != red.shape() {
        return Err(Error::ShapeMismatch {
            expected: nir.shape(),
            actual: red.shape(),
        });
    }

    let data = nir
        .data
        .iter()
        .zip(red.data.iter())
        .map(|(&n, &r)| normalized_difference(n, r))
        .collect();

    Ok(IndexGrid {
        width: nir.width,
        height: nir.height,
        data,
    })
}

#[inline]
fn normalized_difference(a: f64, b: f64) -> Option<f64> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let sum = a + b;
    if sum == 0.0 {
        return None;
    }
    Some(((a - b) / sum).clamp(-1.0, 1.0))
}

//! Error types for the analysis core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("insufficient data for {operation}: need at least {required} samples, got {actual}")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("NDVI value {value} is outside [-1, 1]")]
    InvalidRange { value: f64 },

    #[error("band shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

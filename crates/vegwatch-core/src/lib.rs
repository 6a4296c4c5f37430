//! NDVI vegetation monitoring core.
//!
//! Band grids go in through [`calculate_index`]; dated samples go through
//! [`analyze`], [`recommend`] and the alert helpers. [`assess_parcel`] chains
//! the series stages for one parcel, [`assess_parcels`] for a batch.

pub mod alerts;
pub mod change;
pub mod config;
pub mod error;
pub mod health;
pub mod index;
pub mod recommend;
pub mod report;
pub mod sample;
pub mod series;

pub use alerts::{Alert, AlertSeverity, AlertSummary};
pub use change::{detect_change, AlertLevel, ChangeRecord};
pub use config::{AnalysisConfig, Thresholds};
pub use error::{Error, Result};
pub use health::{classify, HealthAssessment, HealthStatus};
pub use index::{calculate_index, BandGrid, IndexGrid, SceneSummary};
pub use recommend::{recommend, Priority, RecommendationPlan};
pub use report::{assess_parcel, assess_parcels, ParcelReport, ParcelSeries};
pub use sample::{Ndvi, Sample};
pub use series::{analyze, SeriesAnalysis};

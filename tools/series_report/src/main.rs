/// Parcel NDVI report tool.
///
/// `analyze` reads dated NDVI samples (one parcel or a batch) and prints the
/// analysis, action plan and alerts as JSON. `index` computes NDVI from a
/// pair of band grids and prints the scene summary.
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use serde::{Deserialize, Serialize};
use vegwatch_core::{
    assess_parcel, assess_parcels, calculate_index, AnalysisConfig, BandGrid, ParcelReport,
    ParcelSeries, Sample, SceneSummary,
};

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "series_report", about = "NDVI parcel health reports from sample series or band grids")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one parcel's samples, or a batch of parcels.
    Analyze {
        /// JSON file: a sample array, `{parcel_id, samples}`, or an array of those.
        #[arg(short, long)]
        input: PathBuf,

        /// Parcel id used when the input is a bare sample array.
        #[arg(long, default_value = "parcel")]
        parcel_id: String,

        /// TOML analysis config (defaults apply for omitted fields).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
    /// Compute NDVI from `{nir, red}` band grids.
    Index {
        #[arg(short, long)]
        input: PathBuf,

        /// Observation date; when given, the derived sample is printed too.
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        pretty: bool,
    },
}

// ── JSON schema ──────────────────────────────────────────────────────────────

/// Variant order matters: a single parcel object is tried before the arrays,
/// and a sample array before a parcel array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnalyzeInput {
    Parcel(ParcelSeries),
    Samples(Vec<Sample>),
    Batch(Vec<ParcelSeries>),
}

#[derive(Deserialize)]
struct BandsInput {
    nir: BandGrid,
    red: BandGrid,
}

#[derive(Serialize)]
struct IndexOutput {
    width: usize,
    height: usize,
    summary: Option<SceneSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample: Option<Sample>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum BatchEntry {
    Report(Box<ParcelReport>),
    Failed { parcel_id: String, error: String },
}

// ── I/O helpers ──────────────────────────────────────────────────────────────

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    let mut out = io::stdout().lock();
    writeln!(out, "{text}")?;
    Ok(())
}

// ── Commands ─────────────────────────────────────────────────────────────────

fn batch_entries(parcels: &[ParcelSeries], config: &AnalysisConfig) -> Vec<BatchEntry> {
    let entries: Vec<BatchEntry> = assess_parcels(parcels, config)
        .into_iter()
        .map(|(parcel_id, result)| match result {
            Ok(report) => BatchEntry::Report(Box::new(report)),
            Err(e) => BatchEntry::Failed {
                parcel_id,
                error: e.to_string(),
            },
        })
        .collect();
    let failed = entries
        .iter()
        .filter(|e| matches!(e, BatchEntry::Failed { .. }))
        .count();
    if failed > 0 {
        log::warn!("{failed} of {} parcels failed", entries.len());
    }
    entries
}

fn analyze(input: &Path, parcel_id: String, config: Option<&Path>, pretty: bool) -> Result<()> {
    let config = match config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    match read_json::<AnalyzeInput>(input)? {
        AnalyzeInput::Parcel(p) => {
            let report = assess_parcel(p.parcel_id, &p.samples, &config)?;
            emit(&report, pretty)
        }
        AnalyzeInput::Samples(samples) => {
            let report = assess_parcel(parcel_id, &samples, &config)?;
            emit(&report, pretty)
        }
        AnalyzeInput::Batch(parcels) => {
            log::info!("assessing {} parcels", parcels.len());
            emit(&batch_entries(&parcels, &config), pretty)
        }
    }
}

fn index_output(bands: &BandsInput, date: Option<NaiveDate>) -> Result<IndexOutput> {
    let grid = calculate_index(&bands.nir, &bands.red)?;
    let summary = grid.summary();
    let sample = match date {
        Some(d) => Some(Sample::from_scene(d, &grid)?),
        None => None,
    };
    if let Some(s) = &summary {
        log::info!(
            "{}x{} scene: mean NDVI {:.3}, {:.1}% valid",
            grid.width,
            grid.height,
            s.mean,
            s.valid_fraction * 100.0
        );
    }
    Ok(IndexOutput {
        width: grid.width,
        height: grid.height,
        summary,
        sample,
    })
}

fn index(input: &Path, date: Option<NaiveDate>, pretty: bool) -> Result<()> {
    let bands: BandsInput = read_json(input)?;
    emit(&index_output(&bands, date)?, pretty)
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_secs();
    builder.init();

    let args = Args::parse();
    match args.command {
        Command::Analyze {
            input,
            parcel_id,
            config,
            pretty,
        } => analyze(&input, parcel_id, config.as_deref(), pretty),
        Command::Index { input, date, pretty } => index(&input, date, pretty),
    }
}

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the vibrational spectrum analyzer
mod acquisition;
mod annotation;
mod config;
mod preprocessing;
mod processing;
mod spectral;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use config::Config;
use processing::{Pipeline, ResultsLog};

/// Vibrational spectrum analyzer for molecular dynamics dipole trajectories
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Trajectory tables (.dat) to process
    inputs: Vec<PathBuf>,

    /// Scan a directory for .dat files in addition to explicit inputs
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Configuration file (created with defaults if missing)
    #[arg(long, default_value = "vibspec.yaml")]
    config: PathBuf,

    /// Number of autocorrelation workers (default: all cores)
    #[arg(long)]
    workers: Option<usize>,

    /// Use the width-aware variant: two peaks per band with FWHM, up to 4000 cm⁻¹
    #[arg(long)]
    width_aware: bool,

    /// Results log the peak rows are appended to
    #[arg(long, default_value = "peak_data.txt")]
    results: PathBuf,

    /// Directory for per-file JSON reports (spectra, peaks, annotations)
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::from_file(&args.config)?;
    config.apply_args(args.workers, args.width_aware);

    let inputs = collect_inputs(&args)?;
    if inputs.is_empty() {
        warn!("no input files; pass .dat files or --directory");
        return Ok(());
    }
    info!("{} trajectory file(s) to process", inputs.len());

    let pipeline = Pipeline::new(&config);
    let results_log = ResultsLog::new(&args.results);

    for path in &inputs {
        let identifier = file_stem(path);
        let series = acquisition::load_dipole_series(path, config.processing.time_step)?;
        let report = pipeline.process(&series, &identifier)?;

        results_log.append(&report.with_autocorrelation.records)?;
        results_log.append(&report.without_autocorrelation.records)?;

        if let Some(export_dir) = &args.export {
            fs::create_dir_all(export_dir)?;
            let export_path = export_dir.join(format!("{}_report.json", identifier));
            fs::write(&export_path, serde_json::to_string_pretty(&report)?)?;
            info!("{}: report written to {:?}", identifier, export_path);
        }

        println!(
            "{}: {} peaks (with autocorrelation), {} peaks (without)",
            report.title,
            report.with_autocorrelation.peaks.len(),
            report.without_autocorrelation.peaks.len()
        );
    }

    Ok(())
}

/// Explicit inputs plus an optional directory scan for .dat files
fn collect_inputs(args: &Args) -> Result<Vec<PathBuf>> {
    let mut inputs = args.inputs.clone();
    if let Some(dir) = &args.directory {
        let mut found: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "dat"))
            .collect();
        found.sort();
        inputs.extend(found);
    }
    Ok(inputs)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Trajectory acquisition module
//!
//! This module loads dipole moment transients from the space-delimited `.dat`
//! tables written by the molecular dynamics post-processing step. Each row
//! carries the frame index, the dipole vector components and the dipole
//! magnitude; only the magnitude column feeds the spectral pipeline.
//!
//! The core pipeline never touches files itself: it consumes the
//! [`TimeSeries`] this module produces.

pub mod title;

use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

pub use title::create_title;

/// A uniformly sampled dipole magnitude transient
#[derive(Debug, Clone)]
pub struct TimeSeries {
    /// Dipole magnitude samples, one per trajectory frame
    pub samples: Vec<f64>,
    /// Sample interval in seconds
    pub time_step: f64,
}

impl TimeSeries {
    /// Create a series; rejects empty sample sets
    pub fn new(samples: Vec<f64>, time_step: f64) -> Result<Self> {
        anyhow::ensure!(!samples.is_empty(), "time series must not be empty");
        anyhow::ensure!(time_step > 0.0, "time step must be positive");
        Ok(Self { samples, time_step })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples (never true for a constructed one)
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the transient in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 * self.time_step
    }
}

/// Load the dipole magnitude column from a space-delimited `.dat` table
///
/// The tables are single-space delimited with a header row and runs of
/// repeated spaces between columns, so fields are re-split on whitespace and
/// the magnitude is taken as the last numeric field of each row. Rows that do
/// not parse (stray headers, blank lines) are skipped with a warning.
pub fn load_dipole_series<P: AsRef<Path>>(path: P, time_step: f64) -> Result<TimeSeries> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open trajectory table {:?}", path))?;

    let mut samples = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed to read record from {:?}", path))?;
        // Repeated delimiters produce empty fields; the magnitude is the last
        // non-empty one
        match record
            .iter()
            .filter(|f| !f.is_empty())
            .last()
            .and_then(|f| f.parse::<f64>().ok())
        {
            Some(value) => samples.push(value),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("{:?}: skipped {} non-numeric rows", path, skipped);
    }

    let series = TimeSeries::new(samples, time_step)
        .with_context(|| format!("No usable samples in {:?}", path))?;
    info!(
        "{:?}: {} points, {:.3} ns of trajectory",
        path,
        series.len(),
        series.duration() * 1e9
    );
    Ok(series)
}
